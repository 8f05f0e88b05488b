//! Run configuration for directory processing.
//!
//! Values come from an optional `classmap.toml` and are then overridden by
//! command-line flags. Every field has a default so a partial file is valid.

use crate::error::{ClassmapError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Paragraph written at the top of every generated Markdown file
pub const DEFAULT_INTRO: &str = "This file contains the outline of a Java and Kotlin source tree: \
every class with its constants, methods and properties, each paired with the nearest preceding comment.";

/// Configuration for a directory processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Root directory scanned for `.java` and `.kt` files
    pub source_dir: PathBuf,
    /// Base name of the generated files (`<base_name>-1.md`, `<base_name>-2.md`, ...)
    pub base_name: String,
    /// Directory the Markdown files are written to
    pub output_dir: PathBuf,
    /// Line budget per Markdown file before rotating to the next one
    pub max_lines: usize,
    /// Number of parser threads
    pub workers: usize,
    /// Directory for the rolling `error.log`
    pub log_dir: PathBuf,
    /// Introduction paragraph for each Markdown file
    pub intro: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            base_name: "classmap".to_string(),
            output_dir: PathBuf::from("output"),
            max_lines: 100_000,
            workers: num_cpus::get(),
            log_dir: PathBuf::from("logs"),
            intro: DEFAULT_INTRO.to_string(),
        }
    }
}

/// Command-line values that replace configuration file values when present
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub base_name: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub max_lines: Option<usize>,
    pub workers: Option<usize>,
    pub log_dir: Option<PathBuf>,
}

impl ProcessorConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing file is not an error: defaults are returned and a warning is logged.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Configuration file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: ProcessorConfig = toml::from_str(&content).map_err(|e| ClassmapError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate().map_err(|message| ClassmapError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Write this configuration as pretty TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ClassmapError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        debug!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Apply command-line overrides, then validate the merged result
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(source_dir) = overrides.source_dir {
            self.source_dir = source_dir;
        }
        if let Some(base_name) = overrides.base_name {
            self.base_name = base_name;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(max_lines) = overrides.max_lines {
            self.max_lines = max_lines;
        }
        if let Some(workers) = overrides.workers {
            self.workers = workers;
        }
        if let Some(log_dir) = overrides.log_dir {
            self.log_dir = log_dir;
        }

        self.validate().map_err(ClassmapError::InvalidConfig)?;
        Ok(self)
    }

    /// Check value ranges; the message names the offending field
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_lines == 0 {
            return Err("max_lines must be greater than zero".to_string());
        }
        if self.workers == 0 {
            return Err("workers must be greater than zero".to_string());
        }
        if self.base_name.trim().is_empty() {
            return Err("base_name must not be empty".to_string());
        }
        Ok(())
    }
}
