//! Configuration management utilities.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::CatalogFormat;
use crate::infra::fs;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
const FALLBACK_RENDERED_INDEX: &str = "/tmp/index.json";

/// Layered configuration loaded from defaults, user config, an explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    rendered_index: Option<PathBuf>,
    #[serde(default)]
    format: Option<CatalogFormat>,
}

impl Catalog {
    /// Location of the rendered catalog content.
    pub fn rendered_index(&self) -> PathBuf {
        self.rendered_index
            .clone()
            .unwrap_or_else(|| PathBuf::from(FALLBACK_RENDERED_INDEX))
    }

    pub fn format(&self) -> CatalogFormat {
        self.format.unwrap_or_default()
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    rendered_index: Option<String>,
    catalog_format: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            rendered_index: env::var("INDEX_IMAGES_RENDERED_INDEX").ok(),
            catalog_format: env::var("INDEX_IMAGES_CATALOG_FORMAT").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(rendered_index: &str, catalog_format: &str) -> Self {
        Self {
            rendered_index: Some(rendered_index.to_owned()),
            catalog_format: Some(catalog_format.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the user config, an optional explicit file, and env
    /// overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with_layers(global_config_path(), explicit, EnvOverrides::from_env())
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        explicit: Option<&Path>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = vec![Self::from_str(&DEFAULT_CONFIG)?];

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            layers.push(Self::from_file(path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        apply_env_overrides(merged, env_overrides)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_text(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data).with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            catalog: merge_catalog(self.catalog, other.catalog),
        }
    }
}

fn merge_catalog(mut base: Catalog, overlay: Catalog) -> Catalog {
    if let Some(value) = overlay.rendered_index {
        base.rendered_index = Some(value);
    }
    if let Some(value) = overlay.format {
        base.format = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("index-images/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(rendered_index) = env.rendered_index.filter(|value| !value.is_empty()) {
        config.catalog.rendered_index = Some(PathBuf::from(rendered_index));
    }
    if let Some(format) = env.catalog_format.filter(|value| !value.is_empty()) {
        let format = format
            .parse::<CatalogFormat>()
            .context("invalid INDEX_IMAGES_CATALOG_FORMAT")?;
        config.catalog.format = Some(format);
    }
    Ok(config)
}
