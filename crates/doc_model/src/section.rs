//! Resume sections
//!
//! A section is a named, ordered, user-editable block of resume content.
//! Sections carry a stable identifier so that reordering mutates only
//! position, never identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(Uuid);

impl SectionId {
    /// Generate a new unique section id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (used when loading snapshots)
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single named value inside a custom section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Field label shown next to the value
    pub name: String,
    /// Field value
    pub value: String,
}

impl CustomField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Typed content payload of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SectionContent {
    /// Free-form text (summary, objective)
    Text { text: String },
    /// Ordered list of entries (skills, achievements)
    List { items: Vec<String> },
    /// Ordered mapping of custom field names to values
    Custom { fields: Vec<CustomField> },
}

impl SectionContent {
    /// Create empty text content
    pub fn empty_text() -> Self {
        SectionContent::Text {
            text: String::new(),
        }
    }

    /// Number of user-visible entries in this payload
    pub fn item_count(&self) -> usize {
        match self {
            SectionContent::Text { text } => usize::from(!text.is_empty()),
            SectionContent::List { items } => items.len(),
            SectionContent::Custom { fields } => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text { text } => text.trim().is_empty(),
            SectionContent::List { items } => items.is_empty(),
            SectionContent::Custom { fields } => fields.is_empty(),
        }
    }
}

/// A named, ordered, user-editable block of resume content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Stable identifier
    pub id: SectionId,
    /// Display title
    pub title: String,
    /// Whether the section participates in preview and export
    pub visible: bool,
    /// Typed content payload
    pub content: SectionContent,
}

impl Section {
    /// Create a new visible section with the given title and content
    pub fn new(title: impl Into<String>, content: SectionContent) -> Self {
        Self {
            id: SectionId::new(),
            title: title.into(),
            visible: true,
            content,
        }
    }

    /// Create a new text section
    pub fn text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, SectionContent::Text { text: text.into() })
    }

    /// Create a new list section
    pub fn list(title: impl Into<String>, items: Vec<String>) -> Self {
        Self::new(title, SectionContent::List { items })
    }

    /// Create a new custom-fields section
    pub fn custom(title: impl Into<String>, fields: Vec<CustomField>) -> Self {
        Self::new(title, SectionContent::Custom { fields })
    }
}
