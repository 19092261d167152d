//! Render Model - Export render mode
//!
//! Converts the resume document into positioned render items at canonical
//! page dimensions. The document is rendered a second time for export,
//! off-screen and with zoom forced to 1, instead of cloning and patching
//! live preview state; the preview's scale therefore never leaks into the
//! export geometry.

mod error;
mod export_render;
mod preview;
mod render_item;
mod wrap;

pub use error::*;
pub use export_render::*;
pub use preview::*;
pub use render_item::*;
pub use wrap::*;
