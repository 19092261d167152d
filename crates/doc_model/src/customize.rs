//! Customization profile
//!
//! The customization profile is the full set of visual and layout settings
//! applied to the rendered document. It is a value object: every update
//! produces a new profile by replacing whole settings groups, never by
//! mutating in place.

use serde::{Deserialize, Serialize};

/// Standard page formats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "camelCase")]
pub enum PageFormat {
    /// A4 (210mm x 297mm)
    A4,
    /// US Letter (8.5" x 11")
    Letter,
    /// US Legal (8.5" x 14")
    Legal,
    /// Custom size in inches
    Custom { width: f32, height: f32 },
}

impl PageFormat {
    /// Portrait width and height in inches
    pub fn dimensions_inches(&self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (8.267_717, 11.692_913), // 210mm x 297mm
            PageFormat::Letter => (8.5, 11.0),
            PageFormat::Legal => (8.5, 14.0),
            PageFormat::Custom { width, height } => (*width, *height),
        }
    }

    /// Width and height in PostScript points (72 per inch)
    pub fn dimensions_points(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_inches();
        (w * 72.0, h * 72.0)
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        PageFormat::A4
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// How page breaks are decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageBreakPolicy {
    /// Break wherever the estimated height runs out
    #[default]
    Automatic,
    /// Break only at user-inserted markers
    Manual,
    /// Prefer squeezing content over introducing a break
    Avoid,
}

/// Page geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSetup {
    pub format: PageFormat,
    pub orientation: Orientation,
    /// Hard ceiling on the number of pages; pagination truncates past it
    pub max_pages: usize,
    pub break_policy: PageBreakPolicy,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            format: PageFormat::A4,
            orientation: Orientation::Portrait,
            max_pages: 2,
            break_policy: PageBreakPolicy::Automatic,
        }
    }
}

impl PageSetup {
    /// Effective page dimensions in inches, honoring orientation
    pub fn effective_dimensions_inches(&self) -> (f32, f32) {
        let (w, h) = self.format.dimensions_inches();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Semantic text roles used throughout the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    /// The candidate name at the top of the first page
    Name,
    /// Section titles
    Heading,
    /// Body text and list items
    Body,
    /// Contact line, field labels
    Small,
}

/// Size, weight, and line height for one text role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleStyle {
    /// Font size in pixels at canonical scale
    pub size: f32,
    /// CSS-style numeric weight (400 regular, 700 bold)
    pub weight: u16,
    /// Line height as a multiplier of the font size
    pub line_height: f32,
}

/// Typography settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Font family for the whole document
    pub family: String,
    pub name: RoleStyle,
    pub heading: RoleStyle,
    pub body: RoleStyle,
    pub small: RoleStyle,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            name: RoleStyle {
                size: 36.0,
                weight: 700,
                line_height: 1.2,
            },
            heading: RoleStyle {
                size: 20.0,
                weight: 600,
                line_height: 1.3,
            },
            body: RoleStyle {
                size: 14.0,
                weight: 400,
                line_height: 1.5,
            },
            small: RoleStyle {
                size: 12.0,
                weight: 400,
                line_height: 1.4,
            },
        }
    }
}

impl Typography {
    /// Style for a semantic role
    pub fn role(&self, role: TextRole) -> RoleStyle {
        match role {
            TextRole::Name => self.name,
            TextRole::Heading => self.heading,
            TextRole::Body => self.body,
            TextRole::Small => self.small,
        }
    }
}

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Format as a `#rrggbb` hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

/// Color palette settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x1f, 0x29, 0x37),
            secondary: Color::rgb(0x6b, 0x72, 0x80),
            accent: Color::rgb(0x25, 0x63, 0xeb),
            text: Color::rgb(0x11, 0x18, 0x27),
        }
    }
}

/// Spacing settings, all in pixels at canonical scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    /// Margin between page edge and content
    pub page_margin: f32,
    /// Vertical gap between sections
    pub section_gap: f32,
    /// Vertical gap between items inside a section
    pub item_gap: f32,
    /// Extra gap between wrapped lines
    pub line_gap: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            page_margin: 96.0,
            section_gap: 24.0,
            item_gap: 12.0,
            line_gap: 4.0,
        }
    }
}

/// Bullet glyph used for list items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulletGlyph {
    #[default]
    Disc,
    Circle,
    Square,
    Dash,
}

impl BulletGlyph {
    /// The character rendered for this glyph style
    pub fn as_char(&self) -> char {
        match self {
            BulletGlyph::Disc => '\u{2022}',
            BulletGlyph::Circle => '\u{25E6}',
            BulletGlyph::Square => '\u{25AA}',
            BulletGlyph::Dash => '\u{2013}',
        }
    }
}

/// Decorative settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorations {
    pub borders: bool,
    pub shadows: bool,
    pub corner_radius: f32,
    pub bullet: BulletGlyph,
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            borders: false,
            shadows: false,
            corner_radius: 8.0,
            bullet: BulletGlyph::Disc,
        }
    }
}

/// The full set of visual/layout settings applied to the rendered document
///
/// Immutable-by-replacement: updates go through [`CustomizationPatch`] and
/// [`CustomizationProfile::merged`], which replace whole groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationProfile {
    pub page: PageSetup,
    pub typography: Typography,
    pub colors: ColorPalette,
    pub spacing: Spacing,
    pub decorations: Decorations,
}

/// A partial profile update: one optional slot per settings group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationPatch {
    pub page: Option<PageSetup>,
    pub typography: Option<Typography>,
    pub colors: Option<ColorPalette>,
    pub spacing: Option<Spacing>,
    pub decorations: Option<Decorations>,
}

impl CustomizationPatch {
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.typography.is_none()
            && self.colors.is_none()
            && self.spacing.is_none()
            && self.decorations.is_none()
    }
}

impl CustomizationProfile {
    /// Produce a new profile with the patch's groups replacing this one's
    pub fn merged(&self, patch: &CustomizationPatch) -> Self {
        Self {
            page: patch.page.clone().unwrap_or_else(|| self.page.clone()),
            typography: patch
                .typography
                .clone()
                .unwrap_or_else(|| self.typography.clone()),
            colors: patch.colors.clone().unwrap_or_else(|| self.colors.clone()),
            spacing: patch
                .spacing
                .clone()
                .unwrap_or_else(|| self.spacing.clone()),
            decorations: patch
                .decorations
                .clone()
                .unwrap_or_else(|| self.decorations.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_format_dimensions() {
        let (w, h) = PageFormat::Letter.dimensions_points();
        assert_eq!((w, h), (612.0, 792.0));

        let (w, h) = PageFormat::A4.dimensions_points();
        assert!((w - 595.28).abs() < 0.1);
        assert!((h - 841.89).abs() < 0.1);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let setup = PageSetup {
            orientation: Orientation::Landscape,
            ..Default::default()
        };
        let (w, h) = setup.effective_dimensions_inches();
        assert!(w > h);
    }

    #[test]
    fn test_color_hex_round_trip() {
        let c = Color::from_hex("#2563eb").unwrap();
        assert_eq!(c, Color::rgb(0x25, 0x63, 0xeb));
        assert_eq!(c.to_hex(), "#2563eb");

        assert!(Color::from_hex("not-a-color").is_none());
        assert!(Color::from_hex("#12345").is_none());
    }

    #[test]
    fn test_merged_replaces_whole_groups() {
        let profile = CustomizationProfile::default();
        let patch = CustomizationPatch {
            spacing: Some(Spacing {
                page_margin: 48.0,
                ..Default::default()
            }),
            ..Default::default()
        };

        let updated = profile.merged(&patch);
        assert_eq!(updated.spacing.page_margin, 48.0);
        // Untouched groups are carried over unchanged.
        assert_eq!(updated.typography, profile.typography);
        // The original is not mutated.
        assert_eq!(profile.spacing.page_margin, 96.0);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let profile = CustomizationProfile::default();
        let patch = CustomizationPatch::default();
        assert!(patch.is_empty());
        assert_eq!(profile.merged(&patch), profile);
    }
}
