mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CONFIG_FILE_STEM, ChunkingSettings, ENV_PREFIX, IngestionSettings, LoggingSettings,
    PathSettings, Settings, TokenEstimatorKind,
};
