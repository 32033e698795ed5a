use thiserror::Error;

/// Errors raised while turning raw image data into a traced contour set
#[derive(Debug, Error)]
pub enum DigitizeError {
    /// The pixel buffer does not describe a `width` x `height` RGBA image
    #[error("invalid image: {width}x{height} with {len} bytes of RGBA data")]
    InvalidImage {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("failed to decode image: {0}")]
    Decode(String),
}

/// Errors raised while building, rendering or delivering an artifact
#[derive(Debug, Error)]
pub enum ExportError {
    /// Neither traced contours nor strokes are available
    #[error("nothing to export: the canvas has no traced or drawn content")]
    NothingToExport,

    #[error("failed to render thumbnail: {0}")]
    Render(String),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by record stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to access record storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while saving a session into a record store
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type DigitizeResult<T> = Result<T, DigitizeError>;
pub type StoreResult<T> = Result<T, StoreError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
