use crate::probe::ProbeId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BakeError {
    #[error("bake failed for probe {probe}: {reason}")]
    BakeFailed { probe: ProbeId, reason: String },

    #[error("asset not found: {0}")]
    AssetNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown probe: {0}")]
    ProbeNotFound(ProbeId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BakeError>;
