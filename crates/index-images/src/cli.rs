//! Command-line interface.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::app::pipeline::RunOptions;
use crate::domain::model::CatalogFormat;
use crate::infra::config::Config;

/// Extract list of related images from operator index.
#[derive(Debug, Parser)]
#[command(name = "index-images", author, version, long_about = None)]
pub struct Cli {
    /// Path where the operator index is exported
    pub index_download_path: Option<PathBuf>,

    /// Path to the list of packages file, where each line contains a <package>:<channel> record
    pub operators_spec_file: Option<PathBuf>,

    /// Path to the image list file (appended)
    pub img_list_file: Option<PathBuf>,

    /// Rendered catalog to read instead of the configured location
    #[arg(long, value_name = "FILE")]
    pub rendered_index: Option<PathBuf>,

    /// Encoding of the rendered catalog
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub catalog_format: Option<CatalogFormat>,

    /// Additional configuration file layered over the user configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Whether all three positional paths were supplied.
    pub fn has_required_paths(&self) -> bool {
        self.index_download_path.is_some()
            && self.operators_spec_file.is_some()
            && self.img_list_file.is_some()
    }

    /// Resolve run options from the loaded configuration and explicit flags. Returns `None` when
    /// a positional path is missing.
    pub fn run_options(&self, config: &Config) -> Option<RunOptions> {
        let mut options = RunOptions::from_config(
            config,
            self.index_download_path.clone()?,
            self.operators_spec_file.clone()?,
            self.img_list_file.clone()?,
        );
        if let Some(path) = &self.rendered_index {
            options.rendered_index = path.clone();
        }
        if let Some(format) = self.catalog_format {
            options.catalog_format = format;
        }
        Some(options)
    }

    /// Load configuration honoring `--config`.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_output_path_is_incomplete() {
        let cli = Cli::parse_from(["index-images", "/tmp/export", "ops.txt"]);
        assert!(!cli.has_required_paths());
        assert!(cli.run_options(&Config::default()).is_none());
    }

    #[test]
    fn flags_override_configuration() {
        let cli = Cli::parse_from([
            "index-images",
            "--rendered-index",
            "/srv/catalog.yaml",
            "--catalog-format",
            "yaml",
            "-vv",
            "/tmp/export",
            "ops.txt",
            "images.txt",
        ]);
        assert!(cli.has_required_paths());
        assert_eq!(cli.verbose, 2);

        let options = cli.run_options(&Config::default()).unwrap();
        assert_eq!(options.rendered_index, PathBuf::from("/srv/catalog.yaml"));
        assert_eq!(options.catalog_format, CatalogFormat::Yaml);
        assert_eq!(options.img_list_file, PathBuf::from("images.txt"));
    }

    #[test]
    fn configuration_supplies_rendered_index_by_default() {
        let cli = Cli::parse_from(["index-images", "/tmp/export", "ops.txt", "images.txt"]);
        let options = cli.run_options(&Config::default()).unwrap();
        assert_eq!(options.rendered_index, PathBuf::from("/tmp/index.json"));
        assert_eq!(options.index_download_path, PathBuf::from("/tmp/export"));
    }
}
