//! PDF object model
//!
//! The handful of primitive object types the assembler needs, plus their
//! serialized forms. Dictionaries preserve insertion order so emitted
//! files are stable run to run.

/// A PDF object
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Literal string, written in parentheses with escaping
    Str(String),
    /// Name object, written with a leading slash
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    /// Indirect reference: object number, generation number
    Reference(u32, u16),
}

impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        PdfObject::Str(s.into())
    }
}

/// A PDF dictionary with insertion-ordered keys
#[derive(Debug, Clone, Default)]
pub struct PdfDictionary {
    entries: Vec<(String, PdfObject)>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key
    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builder-style Type entry
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.insert("Type", PdfObject::name(type_name));
        self
    }
}

/// A PDF stream: dictionary plus raw data
#[derive(Debug, Clone)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// Already compressed (a Filter entry is present); the writer must
    /// not compress it again
    pub compressed: bool,
}

impl PdfStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            compressed: false,
        }
    }
}

/// Serialize an object into the output buffer
pub(crate) fn write_object(out: &mut Vec<u8>, obj: &PdfObject) {
    match obj {
        PdfObject::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
        PdfObject::Real(n) => out.extend_from_slice(format_real(*n).as_bytes()),
        PdfObject::Str(s) => write_literal_string(out, s.as_bytes()),
        PdfObject::Name(name) => write_name(out, name),
        PdfObject::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                write_object(out, item);
            }
            out.push(b']');
        }
        PdfObject::Dictionary(dict) => write_dictionary(out, dict),
        PdfObject::Stream(stream) => {
            write_dictionary(out, &stream.dict);
            out.extend_from_slice(b"\nstream\n");
            out.extend_from_slice(&stream.data);
            out.extend_from_slice(b"\nendstream");
        }
        PdfObject::Reference(num, gen) => {
            out.extend_from_slice(format!("{} {} R", num, gen).as_bytes());
        }
    }
}

fn write_dictionary(out: &mut Vec<u8>, dict: &PdfDictionary) {
    out.extend_from_slice(b"<<");
    for (key, value) in &dict.entries {
        out.push(b' ');
        write_name(out, key);
        out.push(b' ');
        write_object(out, value);
    }
    out.extend_from_slice(b" >>");
}

/// Real numbers without scientific notation or trailing noise
fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        return format!("{:.1}", n);
    }
    let s = format!("{:.6}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn write_literal_string(out: &mut Vec<u8>, data: &[u8]) {
    out.push(b'(');
    for &byte in data {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            0x0A => out.extend_from_slice(b"\\n"),
            0x0D => out.extend_from_slice(b"\\r"),
            0x09 => out.extend_from_slice(b"\\t"),
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\{:03o}", byte).as_bytes()),
        }
    }
    out.push(b')');
}

fn write_name(out: &mut Vec<u8>, name: &str) {
    out.push(b'/');
    for byte in name.bytes() {
        let delimiter = matches!(
            byte,
            b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
        );
        if (0x21..=0x7E).contains(&byte) && !delimiter {
            out.push(byte);
        } else {
            out.extend_from_slice(format!("#{:02X}", byte).as_bytes());
        }
    }
}
