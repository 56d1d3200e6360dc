//! Domain models for operator selections and rendered catalogs.

use std::collections::BTreeMap;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Schema discriminator of channel objects.
pub const CHANNEL_SCHEMA: &str = "olm.channel";
/// Schema discriminator of bundle objects.
pub const BUNDLE_SCHEMA: &str = "olm.bundle";

/// A single `package:channel` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub package: String,
    pub channel: String,
}

/// Selected channel per package. A package appearing twice keeps its last channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorSelection {
    channels: BTreeMap<String, String>,
}

impl OperatorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection entry, replacing any earlier channel for the package.
    pub fn insert(&mut self, entry: SelectionEntry) -> Option<String> {
        self.channels.insert(entry.package, entry.channel)
    }

    /// Channel selected for `package`, if the package is selected at all.
    pub fn channel_for(&self, package: &str) -> Option<&str> {
        self.channels.get(package).map(String::as_str)
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.channels.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.channels
            .iter()
            .map(|(package, channel)| (package.as_str(), channel.as_str()))
    }
}

impl FromIterator<SelectionEntry> for OperatorSelection {
    fn from_iter<T: IntoIterator<Item = SelectionEntry>>(iter: T) -> Self {
        let mut selection = Self::new();
        for entry in iter {
            selection.insert(entry);
        }
        selection
    }
}

/// Encodings a rendered catalog may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum CatalogFormat {
    /// JSON values concatenated back to back.
    #[default]
    Json,
    /// Multi-document YAML stream.
    Yaml,
}

impl CatalogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogFormat::Json => "json",
            CatalogFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for CatalogFormat {
    type Err = CatalogFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(CatalogFormat::Json),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            other => Err(CatalogFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error returned when parsing a [`CatalogFormat`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CatalogFormatParseError {
    #[error("unknown catalog format '{0}'")]
    UnknownFormat(String),
}
