//! Error types for rasterization

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Invalid page dimensions: {width}x{height} at supersampling {supersampling}")]
    InvalidDimensions {
        width: f32,
        height: f32,
        supersampling: f32,
    },

    #[error("Failed to allocate a {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, RasterError>;
