//! Run settings
//!
//! Defaults, overlaid by an optional TOML file, overlaid by CLI flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dvora_core::{ClientConfig, DEFAULT_USER_AGENT};

/// Catalog file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPaths {
    pub shows: PathBuf,
    pub movies: PathBuf,
    pub api_sites: PathBuf,
    pub manual: PathBuf,
}

impl Default for CatalogPaths {
    fn default() -> Self {
        Self {
            shows: PathBuf::from("shows.txt"),
            movies: PathBuf::from("movies.txt"),
            api_sites: PathBuf::from("api_sites.txt"),
            manual: PathBuf::from("manual_checks.txt"),
        }
    }
}

/// Everything a run needs besides the term and category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub catalogs: CatalogPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            concurrency: 1,
            catalogs: CatalogPaths::default(),
        }
    }
}

/// Flag values that override the file, `None` when not given
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
    pub shows: Option<PathBuf>,
    pub movies: Option<PathBuf>,
    pub api_sites: Option<PathBuf>,
    pub manual: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(user_agent) = overrides.user_agent {
            self.user_agent = user_agent;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(shows) = overrides.shows {
            self.catalogs.shows = shows;
        }
        if let Some(movies) = overrides.movies {
            self.catalogs.movies = movies;
        }
        if let Some(api_sites) = overrides.api_sites {
            self.catalogs.api_sites = api_sites;
        }
        if let Some(manual) = overrides.manual {
            self.catalogs.manual = manual;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }
}
