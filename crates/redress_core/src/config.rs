//! Configuration for the redressal pipeline.
//!
//! Loads settings from `<data_dir>/config.toml` or falls back to defaults.
//! Paths default to locations under the per-user data directory so the
//! CLI works without any setup step.

use crate::error::{RedressError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name under the platform data dir.
pub const APP_DIR: &str = "redress";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Serialized classifier artifact (vectorizer + weights).
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// SQLite complaint store.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Sentiment valence lexicon, self-initialized on first use.
    #[serde(default = "default_lexicon_path")]
    pub lexicon_path: PathBuf,

    /// Directory grievance report documents are written to.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// How many keywords the extractor keeps per complaint.
    #[serde(default = "default_keyword_top_n")]
    pub keyword_top_n: usize,

    /// Gradient-descent iteration cap for classifier training.
    #[serde(default = "default_max_train_iterations")]
    pub max_train_iterations: usize,

    /// Gradient-descent learning rate.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_model_path() -> PathBuf {
    data_dir().join("model").join("classifier.json")
}

fn default_db_path() -> PathBuf {
    data_dir().join("complaints.db")
}

fn default_lexicon_path() -> PathBuf {
    data_dir().join("vader_lexicon.tsv")
}

fn default_reports_dir() -> PathBuf {
    data_dir().join("reports")
}

fn default_keyword_top_n() -> usize {
    5
}

fn default_max_train_iterations() -> usize {
    1000
}

fn default_learning_rate() -> f64 {
    0.5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            db_path: default_db_path(),
            lexicon_path: default_lexicon_path(),
            reports_dir: default_reports_dir(),
            keyword_top_n: default_keyword_top_n(),
            max_train_iterations: default_max_train_iterations(),
            learning_rate: default_learning_rate(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> PathBuf {
        data_dir().join("config.toml")
    }

    /// Load from the default location, falling back to defaults when the
    /// file is absent.
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load from an explicit path. A missing file yields defaults; a file
    /// that exists but does not parse is reported as a config error by
    /// `try_load_from`, here it degrades with a warning.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from(path.as_ref()) {
            Ok(config) => config,
            Err(err) => {
                warn!("Config load failed ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| RedressError::Config(e.to_string()))
    }
}
