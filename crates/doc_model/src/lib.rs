//! Document Model - Resume document structure and customization settings
//!
//! This crate provides the foundational data model for the resume studio:
//! an ordered collection of sections with stable IDs, the personal header
//! data, and the customization profile that drives layout and export.

mod customize;
mod document;
mod error;
mod personal;
mod section;
mod template;

pub use customize::*;
pub use document::*;
pub use error::*;
pub use personal::*;
pub use section::*;
pub use template::*;
