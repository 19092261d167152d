//! Approximate line wrapping
//!
//! The export renderer wraps text with a width heuristic rather than real
//! glyph metrics: break opportunities come from the Unicode line breaking
//! algorithm, and width is estimated from the grapheme count at an average
//! advance per grapheme. Real metrics are the raster stage's concern; the
//! estimate only has to be stable and conservative enough for layout.

use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Average glyph advance as a fraction of the font size
const AVERAGE_ADVANCE: f32 = 0.55;

/// Estimated pixel width of `text` at `font_size`
pub fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.graphemes(true).count() as f32 * font_size * AVERAGE_ADVANCE
}

/// Wrap `text` into lines no wider than `max_width` pixels (estimated)
///
/// Mandatory breaks are always honored. A fragment that alone exceeds the
/// width limit is emitted as its own over-long line rather than split
/// mid-word.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut line_start = 0usize;
    let mut last_fit = None::<usize>;

    for (offset, opportunity) in linebreaks(text) {
        let candidate = text[line_start..offset].trim_end_matches(['\n', '\r']);

        if opportunity == BreakOpportunity::Mandatory {
            lines.push(candidate.trim_end().to_string());
            line_start = offset;
            last_fit = None;
            continue;
        }

        if estimate_width(candidate.trim_end(), font_size) <= max_width {
            last_fit = Some(offset);
        } else {
            // The current fragment no longer fits; close the line at the
            // last break that did, or emit the over-long fragment whole.
            let break_at = last_fit.unwrap_or(offset);
            lines.push(text[line_start..break_at].trim_end().to_string());
            line_start = break_at;
            last_fit = if break_at == offset { None } else { Some(offset) };
            // Re-check the tail after moving the line start.
            let tail = &text[line_start..offset];
            if estimate_width(tail.trim_end(), font_size) <= max_width {
                last_fit = Some(offset);
            }
        }
    }

    if line_start < text.len() {
        let tail = text[line_start..].trim_end().to_string();
        if !tail.is_empty() {
            lines.push(tail);
        }
    }

    lines.retain(|l| !l.is_empty());
    lines
}
