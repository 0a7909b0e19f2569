//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::helpers::is_valid_date_format;

/// Errors raised while loading or validating the site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("site metadata is missing from the configuration")]
    MissingSiteMetadata,

    #[error("site metadata title must not be empty")]
    EmptySiteTitle,

    #[error("invalid date_format {0:?}")]
    InvalidDateFormat(String),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Global description of the site as a whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title: String,
    pub author: String,
}

impl SiteMetadata {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub site_metadata: Option<SiteMetadata>,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Writing
    pub date_format: String,
    pub excerpt_length: usize,
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_metadata: None,

            source_dir: "content".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            date_format: "MMMM DD, YYYY".to_string(),
            excerpt_length: 140,
            render_drafts: false,
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise only fail while rendering
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }

    /// The site metadata, which every rendered page requires
    pub fn site_metadata(&self) -> Result<&SiteMetadata, ConfigError> {
        let metadata = self
            .site_metadata
            .as_ref()
            .ok_or(ConfigError::MissingSiteMetadata)?;
        if metadata.title.trim().is_empty() {
            return Err(ConfigError::EmptySiteTitle);
        }
        Ok(metadata)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
