//! Personal header data
//!
//! The personal block renders at the top of the first page: name, headline,
//! contact details, and an optional photo.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A labeled external link (portfolio, LinkedIn, GitHub)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

impl ContactLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Where the profile photo comes from
///
/// Remote sources are resolved through a fetcher seam at raster time and
/// degrade to a blank region when unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PhotoSource {
    /// Local image file
    File { path: PathBuf },
    /// Raw encoded image bytes (PNG or JPEG)
    Bytes { data: Vec<u8> },
    /// data: URI with base64 payload
    DataUri { uri: String },
    /// Third-party hosted URL
    Remote { url: String },
}

/// The personal header block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    /// One-line professional headline under the name
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub links: Vec<ContactLink>,
    pub photo: Option<PhotoSource>,
}

impl PersonalInfo {
    /// Full display name, or empty when both parts are blank
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => String::new(),
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{} {}", first, last),
        }
    }

    /// Contact line entries in render order, skipping blanks
    pub fn contact_entries(&self) -> Vec<&str> {
        [
            self.email.as_str(),
            self.phone.as_str(),
            self.location.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect()
    }
}
