//! Layered configuration.
//!
//! Built-in defaults are merged with `recipe-matcher.toml` (if present) and
//! `RECIPE_*` environment variables, in that order of priority.
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILE: &str = "recipe-matcher.toml";
pub const ENV_PREFIX: &str = "RECIPE_";

pub const DEFAULT_TARGET_COUNT: usize = 100;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.1;
pub const DEFAULT_MAX_QUERY_TERMS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// RecipeNLG-style CSV file
    pub data_path: PathBuf,
    /// Prebuilt CBOR index; preferred over `data_path` when it exists
    pub snapshot_path: Option<PathBuf>,
    pub target_count: usize,
    /// Cosine similarity a recipe needs to reach the full-match test
    pub similarity_threshold: f64,
    /// Upper bound on distinct query terms (the search is exponential in it)
    pub max_query_terms: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/reduced_100000_no_duplicates_filtered__RecipeNLG_dataset.csv"),
            snapshot_path: None,
            target_count: DEFAULT_TARGET_COUNT,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
        }
    }
}

impl Config {
    /// Load from the default config file in the working directory
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load with an explicit TOML file. A missing file is not an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::figment(path.as_ref()).extract()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
