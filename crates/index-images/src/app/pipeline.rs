//! One end-to-end extraction run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app::catalog::read_catalog;
use crate::app::export::append_image_list;
use crate::app::extract::{resolve_images, resolve_latest_bundles};
use crate::app::selection::read_selection;
use crate::domain::model::CatalogFormat;
use crate::infra::config::Config;

/// Inputs of one extraction run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the catalog was exported to. Informational only; content is read from
    /// `rendered_index`.
    pub index_download_path: PathBuf,
    pub rendered_index: PathBuf,
    pub catalog_format: CatalogFormat,
    pub operators_spec_file: PathBuf,
    pub img_list_file: PathBuf,
}

impl RunOptions {
    /// Build options for the given positional paths using configured catalog settings.
    pub fn from_config(
        config: &Config,
        index_download_path: PathBuf,
        operators_spec_file: PathBuf,
        img_list_file: PathBuf,
    ) -> Self {
        Self {
            index_download_path,
            rendered_index: config.catalog.rendered_index(),
            catalog_format: config.catalog.format(),
            operators_spec_file,
            img_list_file,
        }
    }
}

/// Counts describing a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub packages: usize,
    pub catalog_objects: usize,
    pub bundles: usize,
    pub images: usize,
}

/// Execute one run. Nothing is written unless selection, catalog, and extraction all succeed.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    info!(
        index_download_path = %options.index_download_path.display(),
        rendered_index = %options.rendered_index.display(),
        "extracting related images"
    );

    let selection = read_selection(&options.operators_spec_file)?;
    for (package, channel) in selection.iter() {
        debug!(package, channel, "selected channel");
    }
    let objects = read_catalog(&options.rendered_index, options.catalog_format)?;

    let bundles = resolve_latest_bundles(&selection, &objects)
        .context("failed to resolve latest bundles of selected channels")?;
    let images = resolve_images(&selection, &bundles, &objects)
        .context("failed to resolve related images")?;

    append_image_list(&options.img_list_file, &images)?;

    let summary = RunSummary {
        packages: selection.len(),
        catalog_objects: objects.len(),
        bundles: bundles.len(),
        images: images.len(),
    };
    info!(
        packages = summary.packages,
        catalog_objects = summary.catalog_objects,
        bundles = summary.bundles,
        images = summary.images,
        output = %options.img_list_file.display(),
        "image list appended"
    );
    Ok(summary)
}
