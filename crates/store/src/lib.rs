//! Store - Durable snapshots, settings, PDF assembly, and export
//!
//! This crate handles everything that leaves the in-memory model: the
//! named JSON snapshot blobs written on explicit save, application
//! settings, the PDF assembly stage, the user-facing status notices, and
//! the top-level export orchestration that ties normalization,
//! rasterization, and assembly together.

mod error;
mod export;
mod filename;
mod format;
mod notify;
pub mod pdf;
mod settings;
mod snapshot;

pub use error::*;
pub use export::*;
pub use filename::*;
pub use format::*;
pub use notify::*;
pub use settings::*;
pub use snapshot::*;
