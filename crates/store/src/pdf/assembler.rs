//! Document assembly
//!
//! Collects rasterized page bitmaps and emits the final PDF. Bitmaps are
//! encoded the moment they are added, so the caller can drop each one
//! before rasterizing the next; peak memory stays bounded by a single
//! page.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::writer::{PdfError, PdfWriter, Result};
use raster_engine::PageBitmap;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How page bitmaps are embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "camelCase")]
pub enum PageImageEncoding {
    /// JPEG (DCTDecode), quality 0-100
    Jpeg { quality: u8 },
    /// Lossless flate-compressed RGB
    Flate,
}

impl Default for PageImageEncoding {
    fn default() -> Self {
        PageImageEncoding::Jpeg { quality: 90 }
    }
}

/// Options for PDF assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Whether non-image streams are flate-compressed
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default)]
    pub page_image_encoding: PageImageEncoding,
}

fn default_compress() -> bool {
    true
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: Vec::new(),
            compress: true,
            page_image_encoding: PageImageEncoding::default(),
        }
    }
}

impl PdfOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_page_image_encoding(mut self, encoding: PageImageEncoding) -> Self {
        self.page_image_encoding = encoding;
        self
    }
}

/// One page image, already encoded for embedding
#[derive(Debug)]
struct EncodedPageImage {
    width_px: u32,
    height_px: u32,
    data: Vec<u8>,
    filter: &'static str,
    /// Sheet-relative image height in points; `None` fills the sheet
    height_pts: Option<f32>,
}

/// Assembles encoded page images into a PDF document
pub struct PdfAssembler {
    options: PdfOptions,
    page_width_pts: f32,
    page_height_pts: f32,
    pages: Vec<EncodedPageImage>,
}

impl PdfAssembler {
    /// New assembler for sheets of the given size in points
    pub fn new(options: PdfOptions, page_size_pts: (f32, f32)) -> Self {
        Self {
            options,
            page_width_pts: page_size_pts.0,
            page_height_pts: page_size_pts.1,
            pages: Vec::new(),
        }
    }

    /// Number of sheets added so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sheet dimensions in points
    pub fn page_size_pts(&self) -> (f32, f32) {
        (self.page_width_pts, self.page_height_pts)
    }

    /// Add one bitmap as one full sheet (multi-page mode)
    ///
    /// Encodes immediately; the bitmap can be dropped afterwards.
    pub fn add_page(&mut self, bitmap: &PageBitmap) -> Result<()> {
        let encoded = self.encode(bitmap.width, bitmap.height, &bitmap.to_rgb(), None)?;
        self.pages.push(encoded);
        Ok(())
    }

    /// Add a single tall bitmap, slicing it into sheets by page-height
    /// increments until the remaining height is exhausted (overflow mode)
    pub fn add_tall_bitmap(&mut self, bitmap: &PageBitmap) -> Result<()> {
        if bitmap.width == 0 || bitmap.height == 0 {
            return Err(PdfError::InvalidDocument(
                "empty bitmap cannot be paginated".to_string(),
            ));
        }

        // Pixel rows that correspond to one full sheet at this width.
        let rows_per_sheet = ((self.page_height_pts / self.page_width_pts)
            * bitmap.width as f32)
            .round()
            .max(1.0) as u32;

        let row_bytes = bitmap.width as usize * 4;
        let mut top = 0u32;
        while top < bitmap.height {
            let rows = rows_per_sheet.min(bitmap.height - top);
            let start = top as usize * row_bytes;
            let end = (top + rows) as usize * row_bytes;

            let slice = PageBitmap::from_rgba(
                bitmap.width,
                rows,
                bitmap.pixels[start..end].to_vec(),
            );

            let height_pts = if rows == rows_per_sheet {
                None
            } else {
                Some(rows as f32 / rows_per_sheet as f32 * self.page_height_pts)
            };

            let encoded = self.encode(slice.width, slice.height, &slice.to_rgb(), height_pts)?;
            self.pages.push(encoded);
            top += rows;
        }

        Ok(())
    }

    fn encode(
        &self,
        width: u32,
        height: u32,
        rgb: &[u8],
        height_pts: Option<f32>,
    ) -> Result<EncodedPageImage> {
        let (data, filter) = match self.options.page_image_encoding {
            PageImageEncoding::Jpeg { quality } => {
                let mut buf = Vec::new();
                let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    &mut buf,
                    quality.clamp(1, 100),
                );
                image::ImageEncoder::write_image(
                    encoder,
                    rgb,
                    width,
                    height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| PdfError::ImageEncoding(e.to_string()))?;
                (buf, "DCTDecode")
            }
            PageImageEncoding::Flate => {
                use flate2::write::ZlibEncoder;
                use flate2::Compression;

                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(rgb)?;
                (encoder.finish()?, "FlateDecode")
            }
        };

        Ok(EncodedPageImage {
            width_px: width,
            height_px: height,
            data,
            filter,
            height_pts,
        })
    }

    /// Write the assembled document
    pub fn write<W: Write>(self, writer: W) -> Result<()> {
        if self.pages.is_empty() {
            return Err(PdfError::InvalidDocument("No pages to export".to_string()));
        }

        let mut pdf = PdfWriter::new(writer);
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        let mut sheet_refs = Vec::with_capacity(self.pages.len());
        for _ in &self.pages {
            // XObject, content stream, page dictionary per sheet.
            let xobject = pdf.allocate_object();
            let content = pdf.allocate_object();
            let page = pdf.allocate_object();
            sheet_refs.push((xobject, content, page));
        }

        let mut catalog = PdfDictionary::new().with_type("Catalog");
        catalog.insert("Pages", PdfObject::Reference(pages_ref, 0));
        pdf.write_object(catalog_ref, PdfObject::Dictionary(catalog))?;

        let kids: Vec<PdfObject> = sheet_refs
            .iter()
            .map(|(_, _, page)| PdfObject::Reference(*page, 0))
            .collect();
        let mut pages_dict = PdfDictionary::new().with_type("Pages");
        pages_dict.insert("Count", PdfObject::Integer(kids.len() as i64));
        pages_dict.insert("Kids", PdfObject::Array(kids));
        pdf.write_object(pages_ref, PdfObject::Dictionary(pages_dict))?;

        pdf.write_object(info_ref, PdfObject::Dictionary(self.info_dictionary()))?;

        for (image, (xobject_ref, content_ref, page_ref)) in
            self.pages.iter().zip(sheet_refs.iter())
        {
            let mut image_dict = PdfDictionary::new().with_type("XObject");
            image_dict.insert("Subtype", PdfObject::name("Image"));
            image_dict.insert("Width", PdfObject::Integer(image.width_px as i64));
            image_dict.insert("Height", PdfObject::Integer(image.height_px as i64));
            image_dict.insert("ColorSpace", PdfObject::name("DeviceRGB"));
            image_dict.insert("BitsPerComponent", PdfObject::Integer(8));
            image_dict.insert("Filter", PdfObject::name(image.filter));

            let image_stream = PdfStream {
                dict: image_dict,
                data: image.data.clone(),
                compressed: true,
            };
            pdf.write_stream_object(*xobject_ref, image_stream)?;

            let content = self.content_stream(image);
            pdf.write_stream_object(*content_ref, PdfStream::new(content.into_bytes()))?;

            let mut resources = PdfDictionary::new();
            let mut xobjects = PdfDictionary::new();
            xobjects.insert("Im0", PdfObject::Reference(*xobject_ref, 0));
            resources.insert("XObject", PdfObject::Dictionary(xobjects));
            resources.insert(
                "ProcSet",
                PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("ImageC")]),
            );

            let mut page_dict = PdfDictionary::new().with_type("Page");
            page_dict.insert("Parent", PdfObject::Reference(pages_ref, 0));
            page_dict.insert(
                "MediaBox",
                PdfObject::Array(vec![
                    PdfObject::Real(0.0),
                    PdfObject::Real(0.0),
                    PdfObject::Real(self.page_width_pts as f64),
                    PdfObject::Real(self.page_height_pts as f64),
                ]),
            );
            page_dict.insert("Contents", PdfObject::Reference(*content_ref, 0));
            page_dict.insert("Resources", PdfObject::Dictionary(resources));
            pdf.write_object(*page_ref, PdfObject::Dictionary(page_dict))?;
        }

        pdf.write_xref_and_trailer(catalog_ref, info_ref)?;
        pdf.finish()?;
        Ok(())
    }

    /// Write the assembled document to bytes
    pub fn write_to_bytes(self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }

    /// Content stream placing the sheet's image
    ///
    /// A full sheet fills the media box; a partial (last overflow) sheet
    /// is anchored to the top edge.
    fn content_stream(&self, image: &EncodedPageImage) -> String {
        let width = self.page_width_pts;
        let height = image.height_pts.unwrap_or(self.page_height_pts);
        let y = self.page_height_pts - height;
        format!("q\n{} 0 0 {} 0 {} cm\n/Im0 Do\nQ\n", width, height, y)
    }

    fn info_dictionary(&self) -> PdfDictionary {
        let mut info = PdfDictionary::new();
        if let Some(title) = &self.options.title {
            info.insert("Title", PdfObject::string(title.clone()));
        }
        if let Some(author) = &self.options.author {
            info.insert("Author", PdfObject::string(author.clone()));
        }
        if let Some(subject) = &self.options.subject {
            info.insert("Subject", PdfObject::string(subject.clone()));
        }
        if !self.options.keywords.is_empty() {
            info.insert(
                "Keywords",
                PdfObject::string(self.options.keywords.join(", ")),
            );
        }
        info.insert("Producer", PdfObject::string("resume-studio"));
        let date = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        info.insert("CreationDate", PdfObject::string(date));
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4_PTS: (f32, f32) = (595.28, 841.89);

    fn solid_bitmap(width: u32, height: u32) -> PageBitmap {
        PageBitmap::from_rgba(width, height, vec![255u8; (width * height * 4) as usize])
    }

    #[test]
    fn test_empty_assembler_is_an_error() {
        let assembler = PdfAssembler::new(PdfOptions::default(), A4_PTS);
        assert!(matches!(
            assembler.write_to_bytes(),
            Err(PdfError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_multi_page_structure() {
        let mut assembler = PdfAssembler::new(PdfOptions::default(), A4_PTS);
        assembler.add_page(&solid_bitmap(100, 141)).unwrap();
        assembler.add_page(&solid_bitmap(100, 141)).unwrap();
        assembler.add_page(&solid_bitmap(100, 141)).unwrap();
        assert_eq!(assembler.page_count(), 3);

        let bytes = assembler.write_to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text.contains("/Count 3"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Subtype /Image"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_overflow_mode_slices_by_page_height() {
        let mut assembler = PdfAssembler::new(PdfOptions::default(), A4_PTS);

        // rows_per_sheet = round(841.89 / 595.28 * 100) = 141.
        // 300 rows -> 141 + 141 + 18: three sheets, last one partial.
        assembler.add_tall_bitmap(&solid_bitmap(100, 300)).unwrap();
        assert_eq!(assembler.page_count(), 3);

        let last = assembler.pages.last().unwrap();
        assert_eq!(last.height_px, 18);
        let expected = 18.0 / 141.0 * A4_PTS.1;
        assert!((last.height_pts.unwrap() - expected).abs() < 0.01);
    }

    #[test]
    fn test_overflow_mode_exact_fit_has_no_partial_sheet() {
        let mut assembler = PdfAssembler::new(PdfOptions::default(), A4_PTS);
        assembler.add_tall_bitmap(&solid_bitmap(100, 282)).unwrap();

        assert_eq!(assembler.page_count(), 2);
        assert!(assembler.pages.iter().all(|p| p.height_pts.is_none()));
    }

    #[test]
    fn test_flate_encoding_round_trip_marker() {
        let options =
            PdfOptions::default().with_page_image_encoding(PageImageEncoding::Flate);
        let mut assembler = PdfAssembler::new(options, A4_PTS);
        assembler.add_page(&solid_bitmap(10, 14)).unwrap();

        let bytes = assembler.write_to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn test_metadata_reaches_info_dictionary() {
        let options = PdfOptions::new()
            .with_title("Ada Lovelace Resume")
            .with_author("Ada Lovelace");
        let mut assembler = PdfAssembler::new(options, A4_PTS);
        assembler.add_page(&solid_bitmap(10, 14)).unwrap();

        let bytes = assembler.write_to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Ada Lovelace Resume"));
        assert!(text.contains("/Producer"));
    }

    #[test]
    fn test_media_box_matches_page_format() {
        let mut assembler = PdfAssembler::new(PdfOptions::default(), (612.0, 792.0));
        assembler.add_page(&solid_bitmap(10, 14)).unwrap();

        let bytes = assembler.write_to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox [0.0 0.0 612.0 792.0]"));
    }
}
