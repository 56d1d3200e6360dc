//! Decoding rendered catalogs.
//!
//! A rendered catalog is not a single JSON document: it is a run of independent JSON values
//! written back to back, optionally separated by whitespace. Values are decoded one at a time
//! and the cursor advances by the number of bytes each decode consumed.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::model::CatalogFormat;
use crate::infra::fs;

/// Error returned when rendered catalog text cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON in value #{index} starting at byte {offset}: {source}")]
    Json {
        offset: usize,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid catalog YAML in document #{index}: {source}")]
    Yaml {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Decode every value of a rendered catalog, preserving order of appearance.
pub fn load_catalog(data: &str, format: CatalogFormat) -> Result<Vec<Value>, CatalogError> {
    match format {
        CatalogFormat::Json => decode_json_stream(data),
        CatalogFormat::Yaml => decode_yaml_stream(data),
    }
}

/// Read the rendered catalog at `path` and decode it.
pub fn read_catalog(path: &Path, format: CatalogFormat) -> Result<Vec<Value>> {
    let data = fs::read_text(path)?;
    let objects = load_catalog(&data, format)
        .with_context(|| format!("failed to decode rendered catalog {}", path.display()))?;
    debug!(
        objects = objects.len(),
        format = format.as_str(),
        path = %path.display(),
        "decoded rendered catalog"
    );
    Ok(objects)
}

fn decode_json_stream(data: &str) -> Result<Vec<Value>, CatalogError> {
    let mut objects = Vec::new();
    let mut rest = data.trim_start();
    let mut offset = data.len() - rest.len();

    while !rest.is_empty() {
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => objects.push(value),
            Some(Err(source)) => {
                return Err(CatalogError::Json {
                    offset: offset + stream.byte_offset(),
                    index: objects.len(),
                    source,
                });
            }
            None => break,
        }

        let consumed = stream.byte_offset();
        let remaining = rest[consumed..].trim_start();
        offset += rest.len() - remaining.len();
        rest = remaining;
    }

    Ok(objects)
}

fn decode_yaml_stream(data: &str) -> Result<Vec<Value>, CatalogError> {
    let mut objects = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(data).enumerate() {
        let value =
            Value::deserialize(document).map_err(|source| CatalogError::Yaml { index, source })?;
        if !value.is_null() {
            objects.push(value);
        }
    }
    Ok(objects)
}
