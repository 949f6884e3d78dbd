//! Run configuration for the off-label nanopub generator.
//! A `Config` is built with [`Config::builder`] or loaded from a JSON file.

use crate::fetch::DEFAULT_SOURCE;
use crate::index::{IndexMetadata, DEFAULT_CREATOR};
use crate::options::{PublishMode, Validation};
use crate::publish::DEFAULT_SERVER_URL;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Builder, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct Config {
    /// URL or local path of the CSV export
    pub source: String,
    // publish to the nanopub server instead of signing locally
    pub publish: bool,
    // check the first statement against the Biolink shapes
    pub validate: bool,
    // rows processed when not publishing
    pub max_rows_in_dry_run: usize,
    /// ORCID of the person the statements are attributed to
    pub creator: String,
    pub server_url: String,
    // RSA key in the nanopub format; defaults to ~/.nanopub/id_rsa
    pub key_path: Option<PathBuf>,
    pub timeout_secs: u64,
    pub index: IndexMetadata,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            publish: false,
            validate: false,
            max_rows_in_dry_run: 10,
            creator: DEFAULT_CREATOR.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            key_path: None,
            timeout_secs: 30,
            index: IndexMetadata::default(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn publish_mode(&self) -> PublishMode {
        self.publish.into()
    }

    pub fn validation(&self) -> Validation {
        self.validate.into()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn save_to_file(&self, file: &Path) -> anyhow::Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    /// Reads a JSON config. Missing keys take their default values.
    pub fn from_file(file: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Prints out the current Config in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Source: {}", self.source);
        println!("  Publish: {}", self.publish);
        println!("  Validate: {}", self.validate);
        println!("  Max rows in dry run: {}", self.max_rows_in_dry_run);
        println!("  Creator: {}", self.creator);
        println!("  Server: {}", self.server_url);
        match &self.key_path {
            Some(p) => println!("  Key: {}", p.display()),
            None => println!("  Key: (default)"),
        }
        println!("  Timeout: {}s", self.timeout_secs);
        println!("  Index title: {}", self.index.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder().publish(true).build().unwrap();
        assert!(config.publish_mode().is_publish());
        assert!(!config.validation().is_enabled());
        assert_eq!(config.max_rows_in_dry_run, 10);
        assert_eq!(config.source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config::builder()
            .source("rows.csv")
            .validate(true)
            .key_path(Some(dir.path().join("key")))
            .build()
            .unwrap();
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"publish": true}"#).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(config.publish);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.index, IndexMetadata::default());
    }
}
