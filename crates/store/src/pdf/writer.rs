//! PDF file writer
//!
//! Emits the physical file structure: header, numbered indirect objects,
//! the cross-reference table, and the trailer. Stream payloads are
//! flate-compressed unless the stream already carries a filter.

use super::objects::{write_object, PdfDictionary, PdfObject, PdfStream};
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Image encoding error: {0}")]
    ImageEncoding(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Emitted PDF version
pub const PDF_VERSION: &str = "1.4";

/// Low-level writer tracking object numbers and byte offsets
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// (object number, byte offset) of every written object
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn emit(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Allocate the next object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the file header with a binary marker
    pub fn write_header(&mut self) -> Result<()> {
        self.emit(format!("%PDF-{}\n", PDF_VERSION).as_bytes())?;
        self.emit(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: PdfObject) -> Result<()> {
        self.offsets.push((obj_num, self.position));
        self.emit(format!("{} 0 obj\n", obj_num).as_bytes())?;

        let mut body = Vec::new();
        write_object(&mut body, &object);
        self.emit(&body)?;

        self.emit(b"\nendobj\n")
    }

    /// Write a stream object, compressing the payload if enabled and the
    /// stream carries no filter yet
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));
        self.write_object(obj_num, PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: u32) -> Result<()> {
        let xref_offset = self.position;
        self.offsets.sort_by_key(|(num, _)| *num);

        self.emit(b"xref\n")?;
        self.emit(format!("0 {}\n", self.next_obj_num).as_bytes())?;
        self.emit(b"0000000000 65535 f \n")?;

        let entries = self.offsets.clone();
        let mut expected = 1u32;
        for (obj_num, offset) in entries {
            while expected < obj_num {
                self.emit(b"0000000000 65535 f \n")?;
                expected += 1;
            }
            self.emit(format!("{:010} 00000 n \n", offset).as_bytes())?;
            expected = obj_num + 1;
        }

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(self.next_obj_num as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref, 0));
        trailer.insert("Info", PdfObject::Reference(info_ref, 0));

        self.emit(b"trailer\n")?;
        let mut body = Vec::new();
        write_object(&mut body, &PdfObject::Dictionary(trailer));
        self.emit(&body)?;
        self.emit(format!("\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Flate-compress a stream payload and tag the filter
fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.compressed = true;
    stream
        .dict
        .insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}
