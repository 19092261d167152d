//! Error types for render model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The preview named by the export call is not mounted
    #[error("Source not found: no mounted preview named '{0}'")]
    SourceNotFound(String),

    #[error("Layout error: {0}")]
    Layout(#[from] layout_engine::LayoutError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
