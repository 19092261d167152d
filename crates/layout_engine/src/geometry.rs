//! Canonical page geometry
//!
//! Geometry is derived from the customization profile at a fixed density of
//! 96 pixels per inch. These are the dimensions the export path renders at;
//! the on-screen zoom scale is applied elsewhere and never changes them.

use crate::{LayoutError, Result};
use doc_model::CustomizationProfile;
use serde::{Deserialize, Serialize};

/// Canonical render density in pixels per inch
pub const CANONICAL_DPI: f32 = 96.0;

/// Fixed allowance for page chrome (page footer strip, break indicator)
/// subtracted from the usable content height
pub const CHROME_ALLOWANCE: f32 = 89.0;

/// Pixel dimensions of one page at canonical scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    /// Full page width in pixels
    pub page_width: f32,
    /// Full page height in pixels
    pub page_height: f32,
    /// Margin between page edge and content, in pixels
    pub margin: f32,
}

impl PageGeometry {
    /// Derive canonical geometry from a customization profile
    pub fn from_profile(profile: &CustomizationProfile) -> Result<Self> {
        let (width_in, height_in) = profile.page.effective_dimensions_inches();
        if width_in <= 0.0 || height_in <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "non-positive page dimensions: {}in x {}in",
                width_in, height_in
            )));
        }

        let geometry = Self {
            page_width: (width_in * CANONICAL_DPI).round(),
            page_height: (height_in * CANONICAL_DPI).round(),
            margin: profile.spacing.page_margin,
        };

        if geometry.usable_height() <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "margins leave no usable height on a {}px page",
                geometry.page_height
            )));
        }

        Ok(geometry)
    }

    /// Content width between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Usable content height: page height minus both margins and the fixed
    /// chrome allowance
    pub fn usable_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin - CHROME_ALLOWANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{CustomizationPatch, Orientation, PageSetup, Spacing};

    #[test]
    fn test_default_a4_geometry() {
        let geometry = PageGeometry::from_profile(&CustomizationProfile::default()).unwrap();
        assert_eq!(geometry.page_width, 794.0);
        assert_eq!(geometry.page_height, 1123.0);
        // The documented default budget: A4 portrait, default margins.
        assert_eq!(geometry.usable_height(), 842.0);
    }

    #[test]
    fn test_landscape_swaps() {
        let profile = CustomizationProfile::default().merged(&CustomizationPatch {
            page: Some(PageSetup {
                orientation: Orientation::Landscape,
                ..Default::default()
            }),
            ..Default::default()
        });
        let geometry = PageGeometry::from_profile(&profile).unwrap();
        assert_eq!(geometry.page_width, 1123.0);
        assert_eq!(geometry.page_height, 794.0);
    }

    #[test]
    fn test_oversized_margin_is_rejected() {
        let profile = CustomizationProfile::default().merged(&CustomizationPatch {
            spacing: Some(Spacing {
                page_margin: 600.0,
                ..Default::default()
            }),
            ..Default::default()
        });
        assert!(PageGeometry::from_profile(&profile).is_err());
    }
}
