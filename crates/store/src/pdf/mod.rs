//! PDF Assembly
//!
//! This module turns rasterized page bitmaps into a single downloadable
//! PDF document sized to the configured page format.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `writer`: file structure (header, body, xref, trailer), compression
//! - `assembler`: page image encoding and document assembly; multi-page
//!   mode (one sheet per bitmap) and overflow mode (one tall bitmap
//!   sliced by page-height increments)
//! - `api`: public entry points
//!
//! Pages carry exactly one image XObject each; there is no text or vector
//! content in the output.

mod api;
mod assembler;
mod objects;
mod writer;

pub use api::*;
pub use assembler::*;
pub use objects::{PdfDictionary, PdfObject, PdfStream};
pub use writer::PdfError;
