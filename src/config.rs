//! Page configuration file.
//!
//! ```toml
//! [[carousel]]
//! id = "carousel-suite"
//! interval_ms = 5000
//! images = "photos/suite"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants::DEFAULT_INTERVAL_MS;
use crate::error::{Error, Result};
use crate::page::Mount;

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct PageConfig {
    #[serde(default, rename = "carousel")]
    pub carousels: Vec<CarouselConfig>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct CarouselConfig {
    pub id: String,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Image directory, relative paths resolve against the config file.
    pub images: PathBuf,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl CarouselConfig {
    pub fn mount(&self) -> Mount {
        Mount::new(self.id.clone(), Duration::from_millis(self.interval_ms))
    }
}

impl PageConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content).map_err(|e| match e {
            Error::ConfigParse { source, .. } => Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        let base = path.parent().unwrap_or(Path::new("."));
        for carousel in &mut config.carousels {
            if carousel.images.is_relative() {
                carousel.images = base.join(&carousel.images);
            }
        }
        Ok(config)
    }

    /// Parse and validate TOML text. Relative image paths are left as written.
    pub fn parse(content: &str) -> Result<Self> {
        let config: PageConfig = toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for carousel in &self.carousels {
            if carousel.id.trim().is_empty() {
                return Err(Error::Config("carousel id must not be empty".into()));
            }
            if carousel.interval_ms == 0 {
                return Err(Error::Config(format!(
                    "carousel '{}': interval_ms must be greater than 0",
                    carousel.id
                )));
            }
            if !seen.insert(carousel.id.as_str()) {
                return Err(Error::Config(format!("duplicate carousel id '{}'", carousel.id)));
            }
        }
        Ok(())
    }

    pub fn mounts(&self) -> Vec<Mount> {
        self.carousels.iter().map(CarouselConfig::mount).collect()
    }
}
