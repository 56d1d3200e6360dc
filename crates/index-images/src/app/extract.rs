//! Joining the operator selection against rendered catalog objects.
//!
//! Two passes over the catalog: channel objects resolve each selected `package:channel` to the
//! last bundle listed in the channel, then bundle objects resolve those bundle names to their
//! related images. Entry order is taken as given; the last entry is the latest.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::{BUNDLE_SCHEMA, CHANNEL_SCHEMA, OperatorSelection};

/// Bundle names resolved as the head of each selected channel.
pub type LatestBundles = BTreeSet<String>;

/// Resolve the latest bundle of every selected channel.
pub fn resolve_latest_bundles(
    selection: &OperatorSelection,
    objects: &[Value],
) -> Result<LatestBundles, DomainError> {
    ensure_objects(objects)?;
    let mut bundles = LatestBundles::new();

    for object in objects.iter().filter(|object| has_schema(object, CHANNEL_SCHEMA)) {
        let Some(package) = str_field(object, "package") else {
            continue;
        };
        let Some(selected) = selection.channel_for(package) else {
            continue;
        };
        if str_field(object, "name") != Some(selected) {
            continue;
        }

        let entries = object
            .get("entries")
            .and_then(Value::as_array)
            .ok_or_else(|| DomainError::MissingField {
                schema: CHANNEL_SCHEMA,
                name: format!("{package}/{selected}"),
                field: "entries",
            })?;
        let latest = entries.last().ok_or_else(|| DomainError::EmptyChannel {
            package: package.to_string(),
            channel: selected.to_string(),
        })?;

        match str_field(latest, "name") {
            Some(bundle) => {
                debug!(package, channel = selected, bundle, "resolved latest bundle");
                bundles.insert(bundle.to_string());
            }
            None => warn!(
                package,
                channel = selected,
                "last channel entry has no bundle name, skipping"
            ),
        }
    }

    Ok(bundles)
}

/// Collect the related images of every resolved bundle whose package is selected, in catalog
/// order. Duplicates are kept.
pub fn resolve_images(
    selection: &OperatorSelection,
    bundles: &LatestBundles,
    objects: &[Value],
) -> Result<Vec<String>, DomainError> {
    ensure_objects(objects)?;
    let mut images = Vec::new();

    for object in objects.iter().filter(|object| has_schema(object, BUNDLE_SCHEMA)) {
        let Some(name) = str_field(object, "name") else {
            continue;
        };
        if !bundles.contains(name) {
            continue;
        }
        if !str_field(object, "package").is_some_and(|package| selection.contains_package(package))
        {
            continue;
        }

        let related = object
            .get("relatedImages")
            .and_then(Value::as_array)
            .ok_or_else(|| missing_bundle_field(name, "relatedImages"))?;
        for entry in related {
            let image = str_field(entry, "image").ok_or_else(|| missing_bundle_field(name, "image"))?;
            images.push(image.to_string());
        }
        debug!(bundle = name, images = related.len(), "collected related images");
    }

    Ok(images)
}

/// Resolve selected channels to bundles, then bundles to their related images.
pub fn extract_images(
    selection: &OperatorSelection,
    objects: &[Value],
) -> Result<Vec<String>, DomainError> {
    let bundles = resolve_latest_bundles(selection, objects)?;
    resolve_images(selection, &bundles, objects)
}

/// Every top-level catalog value must be an object.
fn ensure_objects(objects: &[Value]) -> Result<(), DomainError> {
    match objects.iter().position(|object| !object.is_object()) {
        Some(index) => Err(DomainError::NotAnObject {
            index,
            kind: value_kind(&objects[index]),
        }),
        None => Ok(()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn has_schema(object: &Value, schema: &str) -> bool {
    str_field(object, "schema") == Some(schema)
}

fn str_field<'a>(object: &'a Value, field: &str) -> Option<&'a str> {
    object.get(field).and_then(Value::as_str)
}

fn missing_bundle_field(name: &str, field: &'static str) -> DomainError {
    DomainError::MissingField {
        schema: BUNDLE_SCHEMA,
        name: name.to_string(),
        field,
    }
}
