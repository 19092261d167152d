//! Text rasterization
//!
//! Runs are shaped with rustybuzz and painted by filling glyph outlines as
//! tiny-skia paths. Coordinates stay in canonical page space; the caller's
//! transform applies the supersampling factor.

use crate::FontLibrary;
use render_model::TextRun;
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Collects a glyph outline into a path builder, mapping font units to
/// page pixels and flipping the y axis
struct GlyphSink<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl OutlineBuilder for GlyphSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder
            .move_to(self.origin_x + x * self.scale, self.origin_y - y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder
            .line_to(self.origin_x + x * self.scale, self.origin_y - y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.origin_x + x1 * self.scale,
            self.origin_y - y1 * self.scale,
            self.origin_x + x * self.scale,
            self.origin_y - y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.origin_x + x1 * self.scale,
            self.origin_y - y1 * self.scale,
            self.origin_x + x2 * self.scale,
            self.origin_y - y2 * self.scale,
            self.origin_x + x * self.scale,
            self.origin_y - y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Paint one text run; returns false when the run was degraded because no
/// font could be resolved for it
pub(crate) fn draw_text_run(
    pixmap: &mut Pixmap,
    run: &TextRun,
    transform: Transform,
    fonts: &FontLibrary,
) -> bool {
    let Some(font) = fonts.resolve(&run.font_family, run.weight) else {
        return false;
    };
    let Some(face) = font.as_face() else {
        tracing::warn!(family = %run.font_family, "font data failed to parse; run degraded");
        return false;
    };

    let units_per_em = face.units_per_em() as f32;
    if units_per_em <= 0.0 {
        return false;
    }
    let scale = run.font_size / units_per_em;

    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(&run.text);
    let shaped = rustybuzz::shape(&face, &[], buffer);

    let infos = shaped.glyph_infos();
    let positions = shaped.glyph_positions();

    let mut builder = PathBuilder::new();
    let mut pen_x = run.x;

    for (info, pos) in infos.iter().zip(positions.iter()) {
        let origin_x = pen_x + pos.x_offset as f32 * scale;
        let origin_y = run.y - pos.y_offset as f32 * scale;

        let mut sink = GlyphSink {
            builder: &mut builder,
            scale,
            origin_x,
            origin_y,
        };
        face.outline_glyph(GlyphId(info.glyph_id as u16), &mut sink);

        pen_x += pos.x_advance as f32 * scale;
    }

    let Some(path) = builder.finish() else {
        // Whitespace-only runs produce no outline; nothing to paint.
        return true;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(run.color.r, run.color.g, run.color.b, run.color.a);
    paint.anti_alias = true;

    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    true
}
