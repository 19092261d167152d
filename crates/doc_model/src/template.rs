//! Resume templates
//!
//! A template is a named customization patch. Selecting one replaces the
//! groups it carries on top of the current profile; it never touches the
//! document content. Template selection is an input to pagination, so the
//! surrounding app re-paginates after applying one.

use crate::{
    BulletGlyph, Color, ColorPalette, CustomizationPatch, CustomizationProfile, Decorations,
    RoleStyle, Spacing, Typography,
};
use serde::{Deserialize, Serialize};

/// A named preset of customization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable template identifier (kebab-case)
    pub id: String,
    /// Display name
    pub name: String,
    /// Groups this template replaces when selected
    pub patch: CustomizationPatch,
}

impl Template {
    /// Apply this template on top of a profile
    pub fn apply(&self, profile: &CustomizationProfile) -> CustomizationProfile {
        profile.merged(&self.patch)
    }
}

/// The built-in template catalog
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// The catalog of built-in templates
    pub fn builtin() -> Self {
        Self {
            templates: vec![classic(), modern(), compact()],
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Find a template by id
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }
}

fn classic() -> Template {
    Template {
        id: "classic".to_string(),
        name: "Classic".to_string(),
        patch: CustomizationPatch {
            typography: Some(Typography {
                family: "Georgia".to_string(),
                ..Typography::default()
            }),
            colors: Some(ColorPalette {
                primary: Color::rgb(0x1c, 0x1c, 0x1c),
                secondary: Color::rgb(0x55, 0x55, 0x55),
                accent: Color::rgb(0x8b, 0x1a, 0x1a),
                text: Color::rgb(0x20, 0x20, 0x20),
            }),
            decorations: Some(Decorations {
                borders: true,
                shadows: false,
                corner_radius: 0.0,
                bullet: BulletGlyph::Dash,
            }),
            ..Default::default()
        },
    }
}

fn modern() -> Template {
    Template {
        id: "modern".to_string(),
        name: "Modern".to_string(),
        patch: CustomizationPatch {
            colors: Some(ColorPalette::default()),
            decorations: Some(Decorations::default()),
            ..Default::default()
        },
    }
}

fn compact() -> Template {
    Template {
        id: "compact".to_string(),
        name: "Compact".to_string(),
        patch: CustomizationPatch {
            typography: Some(Typography {
                body: RoleStyle {
                    size: 12.0,
                    weight: 400,
                    line_height: 1.35,
                },
                small: RoleStyle {
                    size: 10.0,
                    weight: 400,
                    line_height: 1.3,
                },
                ..Typography::default()
            }),
            spacing: Some(Spacing {
                page_margin: 64.0,
                section_gap: 16.0,
                item_gap: 8.0,
                line_gap: 2.0,
            }),
            ..Default::default()
        },
    }
}
