//! Error types for document model operations

use crate::SectionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Section not found: {0}")]
    SectionNotFound(SectionId),

    #[error("Duplicate section id: {0}")]
    DuplicateSection(SectionId),

    #[error("Invalid move: from {from} to {to}, length {len}")]
    InvalidMove { from: usize, to: usize, len: usize },

    #[error("Invalid item index {index} in section {section}")]
    InvalidItemIndex { section: SectionId, index: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
