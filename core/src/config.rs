use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Dimension of node and relation vectors.
    pub dim: usize,
    /// Seed for the vector generator; fixed seed means reproducible runs.
    pub seed: u64,
    /// Size of the relation-vector pool.
    pub relation_slots: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dim: 128,
            seed: 42,
            relation_slots: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum frontier entries retained per expansion round.
    pub beam_width: usize,
    /// Number of expansion rounds.
    pub max_depth: usize,
    /// Default size of the ranked result list.
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: 50,
            max_depth: 4,
            top_k: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("CAREPATH").separator("__"));

        builder.build()?.try_deserialize()
    }
}
