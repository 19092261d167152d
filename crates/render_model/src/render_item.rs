//! Render item types

use doc_model::{Color, PhotoSource};
use serde::{Deserialize, Serialize};

/// A rectangle in canonical page coordinates (pixels, top-left origin)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Color with alpha, as used by the painter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        Rgba::rgb(c.r, c.g, c.b)
    }
}

/// A positioned line of styled text
///
/// `y` is the text baseline. Wrapping has already happened by the time a
/// run exists; a run never spans lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    pub font_family: String,
    /// Font size in pixels at canonical scale
    pub font_size: f32,
    /// CSS-style numeric weight
    pub weight: u16,
    pub color: Rgba,
    pub x: f32,
    pub y: f32,
}

/// One drawable element on an export page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderItem {
    /// Filled and/or stroked rectangle
    Rect {
        bounds: Rect,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
        corner_radius: f32,
    },
    /// Straight line segment
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgba,
        width: f32,
    },
    /// A line of text
    Text(TextRun),
    /// The profile photo region; resolved (or degraded) at raster time
    Photo {
        bounds: Rect,
        source: PhotoSource,
        corner_radius: f32,
    },
}

/// One export page: canonical dimensions plus its render items in paint order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRender {
    /// Zero-based page index
    pub page_index: usize,
    /// Canonical page width in pixels
    pub width: f32,
    /// Canonical page height in pixels
    pub height: f32,
    pub items: Vec<RenderItem>,
}

impl PageRender {
    pub fn new(page_index: usize, width: f32, height: f32) -> Self {
        Self {
            page_index,
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    /// All text runs on this page, in paint order
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Text(run) => Some(run),
            _ => None,
        })
    }
}
