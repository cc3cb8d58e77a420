use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::application::services::{ChunkingOptions, IngestionOptions};

use super::Environment;

pub const CONFIG_FILE_STEM: &str = "folio";
pub const ENV_PREFIX: &str = "FOLIO";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub paths: PathSettings,
    pub chunking: ChunkingSettings,
    pub ingestion: IngestionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    pub pdf_dir: PathBuf,
    pub chunks_dir: PathBuf,
    pub metadata_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEstimatorKind {
    CharRatio,
    Tiktoken,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub target_tokens: usize,
    pub overlap_tokens: usize,
    pub min_block_chars: usize,
    pub anchor_window_chars: usize,
    pub progress_every: usize,
    pub estimator: TokenEstimatorKind,
    pub chars_per_token: usize,
}

impl ChunkingSettings {
    pub fn to_options(&self) -> ChunkingOptions {
        ChunkingOptions {
            target_tokens: self.target_tokens,
            overlap_tokens: self.overlap_tokens,
            min_block_chars: self.min_block_chars,
            anchor_window_chars: self.anchor_window_chars,
            progress_every: self.progress_every,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestionSettings {
    pub concurrency: usize,
    pub require_ready_metadata: bool,
}

impl IngestionSettings {
    pub fn to_options(&self) -> IngestionOptions {
        IngestionOptions {
            require_ready_metadata: self.require_ready_metadata,
            concurrency: self.concurrency,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Loads `folio.toml` and `folio.<environment>.toml` from the working
    /// directory, then `FOLIO_*` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), environment)
    }

    /// Same as [`Settings::load`], reading the optional files from `dir`.
    pub fn load_from(dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let base = dir.join(format!("{}.toml", CONFIG_FILE_STEM));
        let per_env = dir.join(format!("{}.{}.toml", CONFIG_FILE_STEM, environment.as_str()));

        let configuration = Config::builder()
            .set_default("paths.pdf_dir", "data/pdfs")?
            .set_default("paths.chunks_dir", "data/chunks")?
            .set_default("paths.metadata_dir", "data/metadata")?
            .set_default("chunking.target_tokens", 1000_i64)?
            .set_default("chunking.overlap_tokens", 180_i64)?
            .set_default("chunking.min_block_chars", 20_i64)?
            .set_default("chunking.anchor_window_chars", 160_i64)?
            .set_default("chunking.progress_every", 1000_i64)?
            .set_default("chunking.estimator", "char_ratio")?
            .set_default("chunking.chars_per_token", 4_i64)?
            .set_default("ingestion.concurrency", 2_i64)?
            .set_default("ingestion.require_ready_metadata", true)?
            .set_default("logging.level", "info,folio=debug")?
            .set_default("logging.enable_json", false)?
            .add_source(File::new(&base.to_string_lossy(), FileFormat::Toml).required(false))
            .add_source(File::new(&per_env.to_string_lossy(), FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
