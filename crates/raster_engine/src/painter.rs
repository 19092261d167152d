//! Page painting
//!
//! Executes a page's render items in order against a supersampled pixmap.
//! Rasterization is the dominant export cost and is invoked once per page,
//! sequentially, so only one page bitmap is alive at a time.

use crate::{
    load_photo, text::draw_text_run, FontLibrary, PageBitmap, PhotoFetcher, RasterError, Result,
};
use render_model::{PageRender, Rect as PageRect, RenderItem, Rgba};
use tiny_skia::{
    FillRule, IntSize, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Rasterization settings
#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    /// Resolution multiplier over canonical pixels, for print sharpness
    pub supersampling: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { supersampling: 2.0 }
    }
}

/// Rasterize one export page into an RGBA bitmap at
/// `supersampling x canonical` resolution
pub fn rasterize_page(
    page: &PageRender,
    options: RasterOptions,
    fonts: &FontLibrary,
    fetcher: &dyn PhotoFetcher,
) -> Result<PageBitmap> {
    let ss = options.supersampling;
    let width = (page.width * ss).round();
    let height = (page.height * ss).round();

    if !(ss > 0.0) || width < 1.0 || height < 1.0 {
        return Err(RasterError::InvalidDimensions {
            width: page.width,
            height: page.height,
            supersampling: ss,
        });
    }

    let (width, height) = (width as u32, height as u32);
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(RasterError::PixmapAllocation { width, height })?;
    let transform = Transform::from_scale(ss, ss);

    let mut degraded_runs = 0usize;
    for item in &page.items {
        match item {
            RenderItem::Rect {
                bounds,
                fill,
                stroke,
                stroke_width,
                corner_radius,
            } => {
                if let Some(path) = rect_path(bounds, *corner_radius) {
                    if let Some(color) = fill {
                        pixmap.fill_path(
                            &path,
                            &solid(*color),
                            FillRule::Winding,
                            transform,
                            None,
                        );
                    }
                    if let Some(color) = stroke {
                        let stroke = Stroke {
                            width: *stroke_width,
                            ..Stroke::default()
                        };
                        pixmap.stroke_path(&path, &solid(*color), &stroke, transform, None);
                    }
                }
            }
            RenderItem::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width: line_width,
            } => {
                let mut builder = PathBuilder::new();
                builder.move_to(*x1, *y1);
                builder.line_to(*x2, *y2);
                if let Some(path) = builder.finish() {
                    let stroke = Stroke {
                        width: *line_width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &solid(*color), &stroke, transform, None);
                }
            }
            RenderItem::Text(run) => {
                if !draw_text_run(&mut pixmap, run, transform, fonts) {
                    degraded_runs += 1;
                }
            }
            RenderItem::Photo { bounds, source, .. } => {
                match load_photo(fetcher, source) {
                    Some(photo) => draw_photo(&mut pixmap, bounds, &photo, ss),
                    // Degraded: the region stays blank.
                    None => {}
                }
            }
        }
    }

    if degraded_runs > 0 {
        tracing::warn!(
            page = page.page_index,
            degraded_runs,
            "text runs degraded for unresolvable fonts"
        );
    }

    Ok(PageBitmap::from_rgba(width, height, pixmap.take()))
}

fn solid(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Rectangle path, optionally with rounded corners
fn rect_path(bounds: &PageRect, corner_radius: f32) -> Option<Path> {
    let (x, y, w, h) = (bounds.x, bounds.y, bounds.width, bounds.height);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    let r = corner_radius.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return PathBuilder::from_rect(tiny_skia::Rect::from_xywh(x, y, w, h)?).into();
    }

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Draw a decoded photo scaled into its bounds
fn draw_photo(pixmap: &mut Pixmap, bounds: &PageRect, photo: &image::RgbaImage, ss: f32) {
    let (img_w, img_h) = photo.dimensions();
    if img_w == 0 || img_h == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return;
    }

    // tiny-skia expects premultiplied alpha.
    let mut data = photo.as_raw().clone();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a < 255 {
            px[0] = (px[0] as u16 * a / 255) as u8;
            px[1] = (px[1] as u16 * a / 255) as u8;
            px[2] = (px[2] as u16 * a / 255) as u8;
        }
    }

    let Some(size) = IntSize::from_wh(img_w, img_h) else {
        return;
    };
    let Some(source) = Pixmap::from_vec(data, size) else {
        return;
    };

    let sx = bounds.width * ss / img_w as f32;
    let sy = bounds.height * ss / img_h as f32;
    let transform = Transform::from_row(sx, 0.0, 0.0, sy, bounds.x * ss, bounds.y * ss);

    pixmap.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &PixmapPaint::default(),
        transform,
        None,
    );
}
