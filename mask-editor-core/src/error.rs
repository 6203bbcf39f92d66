//! Error type for the fallible edges of the editor
//!
//! Editing itself never fails; only loading and saving can.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MaskEditorError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Unsupported project version '{0}'")]
    UnsupportedVersion(String),

    #[error("No project file at {}", .0.display())]
    NoProjectFile(PathBuf),

    #[error("Nothing has been saved yet")]
    NothingSaved,
}

pub type Result<T> = std::result::Result<T, MaskEditorError>;
