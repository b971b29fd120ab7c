use thiserror::Error;

/// Errors raised while turning external input (form values, catalog files,
/// CLI scenes) into store values. Store operations themselves never fail.
#[derive(Error, Debug)]
pub enum BenchtopError {
    #[error("unsupported benchtop width: {0}mm")]
    UnsupportedWidth(u32),
    #[error("unknown tap orientation: {0:?}")]
    UnknownOrientation(String),
    #[error("unknown hole slot: {0:?}")]
    UnknownSlot(String),
    #[error("unknown shape: {0:?}")]
    UnknownShape(String),
    #[error("no catalog entry with item code {0:?}")]
    UnknownItem(String),
    #[error("catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BenchtopError>;
