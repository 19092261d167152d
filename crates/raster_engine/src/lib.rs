//! Raster Engine - Export page rasterization
//!
//! Converts one export page at a time into an RGBA bitmap at
//! `supersampling x canonical` resolution for print sharpness. Rectangles
//! and rules are painted with tiny-skia; text is shaped with rustybuzz and
//! filled from glyph outlines; fonts are resolved through font-kit with a
//! sans-serif fallback. Missing fonts and unloadable photos degrade their
//! region and never abort the page.

mod bitmap;
mod error;
mod fonts;
mod painter;
mod photo;
mod text;

pub use bitmap::*;
pub use error::*;
pub use fonts::*;
pub use painter::*;
pub use photo::*;
