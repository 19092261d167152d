//! Error types for layout operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
