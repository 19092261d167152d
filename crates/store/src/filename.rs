//! Export filename convention
//!
//! `{FirstName}_{LastName}_Resume.pdf` when both name parts are present,
//! falling back to a generic default. Names are sanitized before they
//! reach the filesystem.

use doc_model::PersonalInfo;
use regex_lite::Regex;
use std::sync::OnceLock;

/// Fallback filename when no usable name parts exist
pub const DEFAULT_FILENAME: &str = "Resume.pdf";

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\-]").expect("static pattern"))
}

/// Strip characters that are unsafe in filenames, collapsing runs of
/// whitespace into single underscores
pub fn sanitize_component(part: &str) -> String {
    let collapsed = whitespace().replace_all(part.trim(), "_");
    unsafe_chars().replace_all(&collapsed, "").to_string()
}

/// Derive the export filename from the personal header
pub fn export_filename(personal: &PersonalInfo) -> String {
    let first = sanitize_component(&personal.first_name);
    let last = sanitize_component(&personal.last_name);

    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{}_{}_Resume.pdf", first, last),
        (false, true) => format!("{}_Resume.pdf", first),
        (true, false) => format!("{}_Resume.pdf", last),
        (true, true) => DEFAULT_FILENAME.to_string(),
    }
}

/// Sanitize a caller-supplied filename, enforcing the `.pdf` extension
pub fn sanitize_filename(name: &str) -> String {
    let stem = name.strip_suffix(".pdf").unwrap_or(name);
    let clean = sanitize_component(stem);
    if clean.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{}.pdf", clean)
    }
}
