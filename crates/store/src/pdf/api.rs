//! PDF assembly public API

use super::assembler::{PdfAssembler, PdfOptions};
use super::writer::{PdfError, Result};
use raster_engine::PageBitmap;

/// Assemble one sheet per bitmap (multi-page mode)
///
/// # Example
///
/// ```ignore
/// use store::pdf::{assemble_pdf, PdfOptions};
///
/// let bytes = assemble_pdf(&bitmaps, (595.28, 841.89), PdfOptions::new())?;
/// ```
pub fn assemble_pdf(
    bitmaps: &[PageBitmap],
    page_size_pts: (f32, f32),
    options: PdfOptions,
) -> Result<Vec<u8>> {
    validate_bitmaps(bitmaps)?;

    let mut assembler = PdfAssembler::new(options, page_size_pts);
    for bitmap in bitmaps {
        assembler.add_page(bitmap)?;
    }
    assembler.write_to_bytes()
}

/// Assemble a single tall bitmap by slicing it into sheets (overflow mode)
pub fn assemble_overflow_pdf(
    bitmap: &PageBitmap,
    page_size_pts: (f32, f32),
    options: PdfOptions,
) -> Result<Vec<u8>> {
    validate_bitmaps(std::slice::from_ref(bitmap))?;

    let mut assembler = PdfAssembler::new(options, page_size_pts);
    assembler.add_tall_bitmap(bitmap)?;
    assembler.write_to_bytes()
}

/// Check that bitmaps are present and non-degenerate
pub fn validate_bitmaps(bitmaps: &[PageBitmap]) -> Result<()> {
    if bitmaps.is_empty() {
        return Err(PdfError::InvalidDocument("No pages to export".to_string()));
    }
    for (i, bitmap) in bitmaps.iter().enumerate() {
        if bitmap.width == 0 || bitmap.height == 0 {
            return Err(PdfError::InvalidDocument(format!(
                "Page {} has empty dimensions: {}x{}",
                i, bitmap.width, bitmap.height
            )));
        }
    }
    Ok(())
}
