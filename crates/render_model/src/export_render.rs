//! Export rendering
//!
//! Renders the document directly at canonical page dimensions. This is the
//! declarative replacement for cloning the live preview and patching its
//! inline styles: zoom is forced to 1, the page width is explicit, and
//! every page carries the canonical height.

use crate::{estimate_width, wrap_text, PageRender, Rect, RenderItem, Result, Rgba, TextRun};
use doc_model::{
    CustomizationProfile, PersonalInfo, ResumeDocument, Section, SectionContent, TextRole,
};
use layout_engine::{Page, PageGeometry, Pagination};

/// Side of the square photo region in the header, in pixels
const PHOTO_SIDE: f32 = 96.0;

/// Length of the accent rule under a section title
const TITLE_RULE_LENGTH: f32 = 48.0;

/// Indent for wrapped list item lines, past the bullet
const LIST_INDENT: f32 = 18.0;

/// Renders a document into export pages
#[derive(Debug, Default)]
pub struct ExportRenderer;

impl ExportRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render one page per pagination entry at canonical dimensions
    pub fn render(
        &self,
        document: &ResumeDocument,
        profile: &CustomizationProfile,
        pagination: &Pagination,
    ) -> Result<Vec<PageRender>> {
        let geometry = PageGeometry::from_profile(profile)?;

        let mut pages = Vec::with_capacity(pagination.pages.len());
        for page in &pagination.pages {
            pages.push(self.render_page(document, profile, &geometry, page));
        }
        Ok(pages)
    }

    /// Render the whole document as one continuous tall page
    ///
    /// Used by the overflow export mode, where a single tall bitmap is
    /// later sliced into physical pages. The page is never shorter than
    /// one canonical page height.
    pub fn render_continuous(
        &self,
        document: &ResumeDocument,
        profile: &CustomizationProfile,
    ) -> Result<PageRender> {
        let geometry = PageGeometry::from_profile(profile)?;

        let mut body = Vec::new();
        let mut cursor = geometry.margin;
        cursor = self.emit_header(&mut body, &document.personal, profile, &geometry, cursor);

        for section in document.visible_sections() {
            cursor = self.emit_section(&mut body, section, profile, &geometry, cursor);
        }

        let height = (cursor + geometry.margin).max(geometry.page_height);
        let mut page = PageRender::new(0, geometry.page_width, height);
        page.push(background(geometry.page_width, height));
        page.items.extend(body);
        Ok(page)
    }

    fn render_page(
        &self,
        document: &ResumeDocument,
        profile: &CustomizationProfile,
        geometry: &PageGeometry,
        page: &Page,
    ) -> PageRender {
        let mut out = PageRender::new(page.index, geometry.page_width, geometry.page_height);
        out.push(background(geometry.page_width, geometry.page_height));

        let mut cursor = geometry.margin;
        if page.index == 0 {
            cursor = self.emit_header(&mut out.items, &document.personal, profile, geometry, cursor);
        }

        for id in &page.sections {
            if let Some(section) = document.section(*id) {
                cursor = self.emit_section(&mut out.items, section, profile, geometry, cursor);
            }
        }

        out
    }

    /// Emit the personal header block; returns the new cursor position
    fn emit_header(
        &self,
        items: &mut Vec<RenderItem>,
        personal: &PersonalInfo,
        profile: &CustomizationProfile,
        geometry: &PageGeometry,
        top: f32,
    ) -> f32 {
        let typography = &profile.typography;
        let colors = &profile.colors;
        let x = geometry.margin;
        let mut cursor = top;

        if let Some(photo) = &personal.photo {
            items.push(RenderItem::Photo {
                bounds: Rect::new(
                    geometry.page_width - geometry.margin - PHOTO_SIDE,
                    top,
                    PHOTO_SIDE,
                    PHOTO_SIDE,
                ),
                source: photo.clone(),
                corner_radius: profile.decorations.corner_radius,
            });
        }

        let name = personal.full_name();
        if !name.is_empty() {
            let style = typography.role(TextRole::Name);
            cursor += style.size;
            items.push(text_run(
                &name,
                &typography.family,
                style.size,
                style.weight,
                colors.primary.into(),
                x,
                cursor,
            ));
            cursor += style.size * (style.line_height - 1.0);
        }

        if !personal.headline.trim().is_empty() {
            let style = typography.role(TextRole::Body);
            cursor += style.size * style.line_height;
            items.push(text_run(
                &personal.headline,
                &typography.family,
                style.size,
                style.weight,
                colors.secondary.into(),
                x,
                cursor,
            ));
        }

        let contact = personal.contact_entries().join("  \u{2022}  ");
        if !contact.is_empty() {
            let style = typography.role(TextRole::Small);
            cursor += style.size * style.line_height;
            items.push(text_run(
                &contact,
                &typography.family,
                style.size,
                style.weight,
                colors.secondary.into(),
                x,
                cursor,
            ));
        }

        cursor += profile.spacing.item_gap;
        items.push(RenderItem::Line {
            x1: x,
            y1: cursor,
            x2: x + geometry.content_width(),
            y2: cursor,
            color: colors.accent.into(),
            width: 2.0,
        });

        cursor + profile.spacing.section_gap
    }

    /// Emit one section block; returns the new cursor position
    fn emit_section(
        &self,
        items: &mut Vec<RenderItem>,
        section: &Section,
        profile: &CustomizationProfile,
        geometry: &PageGeometry,
        top: f32,
    ) -> f32 {
        let typography = &profile.typography;
        let colors = &profile.colors;
        let spacing = &profile.spacing;
        let x = geometry.margin;
        let content_width = geometry.content_width();

        // Lay the block out first so a border card can be sized to it.
        let mut block: Vec<RenderItem> = Vec::new();
        let mut cursor = top;

        let heading = typography.role(TextRole::Heading);
        cursor += heading.size;
        block.push(text_run(
            &section.title,
            &typography.family,
            heading.size,
            heading.weight,
            colors.primary.into(),
            x,
            cursor,
        ));
        let rule_y = cursor + 6.0;
        block.push(RenderItem::Line {
            x1: x,
            y1: rule_y,
            x2: x + TITLE_RULE_LENGTH,
            y2: rule_y,
            color: colors.accent.into(),
            width: 3.0,
        });
        cursor = rule_y + spacing.item_gap;

        let body = typography.role(TextRole::Body);
        let line_advance = body.size * body.line_height + spacing.line_gap;

        match &section.content {
            SectionContent::Text { text } => {
                for line in wrap_text(text, content_width, body.size) {
                    cursor += line_advance;
                    block.push(text_run(
                        &line,
                        &typography.family,
                        body.size,
                        body.weight,
                        colors.text.into(),
                        x,
                        cursor,
                    ));
                }
            }
            SectionContent::List { items: entries } => {
                let bullet = profile.decorations.bullet.as_char().to_string();
                for entry in entries {
                    let lines = wrap_text(entry, content_width - LIST_INDENT, body.size);
                    for (i, line) in lines.iter().enumerate() {
                        cursor += line_advance;
                        if i == 0 {
                            block.push(text_run(
                                &bullet,
                                &typography.family,
                                body.size,
                                body.weight,
                                colors.accent.into(),
                                x,
                                cursor,
                            ));
                        }
                        block.push(text_run(
                            line,
                            &typography.family,
                            body.size,
                            body.weight,
                            colors.text.into(),
                            x + LIST_INDENT,
                            cursor,
                        ));
                    }
                    cursor += spacing.item_gap - spacing.line_gap;
                }
            }
            SectionContent::Custom { fields } => {
                let small = typography.role(TextRole::Small);
                for field in fields {
                    cursor += line_advance;
                    block.push(text_run(
                        &field.name,
                        &typography.family,
                        small.size,
                        small.weight,
                        colors.secondary.into(),
                        x,
                        cursor,
                    ));
                    let value_x =
                        x + estimate_width(&field.name, small.size).max(90.0) + 12.0;
                    for (i, line) in
                        wrap_text(&field.value, content_width - (value_x - x), body.size)
                            .iter()
                            .enumerate()
                    {
                        if i > 0 {
                            cursor += line_advance;
                        }
                        block.push(text_run(
                            line,
                            &typography.family,
                            body.size,
                            body.weight,
                            colors.text.into(),
                            value_x,
                            cursor,
                        ));
                    }
                    cursor += spacing.item_gap - spacing.line_gap;
                }
            }
        }

        if profile.decorations.borders {
            let pad = spacing.item_gap;
            items.push(RenderItem::Rect {
                bounds: Rect::new(
                    x - pad,
                    top - pad,
                    content_width + 2.0 * pad,
                    (cursor - top) + 2.0 * pad,
                ),
                fill: None,
                stroke: Some(colors.secondary.into()),
                stroke_width: 1.0,
                corner_radius: profile.decorations.corner_radius,
            });
        }
        items.append(&mut block);

        cursor + spacing.section_gap
    }
}

fn background(width: f32, height: f32) -> RenderItem {
    RenderItem::Rect {
        bounds: Rect::new(0.0, 0.0, width, height),
        fill: Some(Rgba::WHITE),
        stroke: None,
        stroke_width: 0.0,
        corner_radius: 0.0,
    }
}

#[allow(clippy::too_many_arguments)]
fn text_run(
    text: &str,
    family: &str,
    size: f32,
    weight: u16,
    color: Rgba,
    x: f32,
    y: f32,
) -> RenderItem {
    RenderItem::Text(TextRun {
        text: text.to_string(),
        font_family: family.to_string(),
        font_size: size,
        weight,
        color,
        x,
        y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{CustomField, CustomizationPatch, Decorations, PersonalInfo, Spacing};
    use layout_engine::Paginator;

    fn sample_document() -> ResumeDocument {
        let mut doc = ResumeDocument::new();
        doc.personal = PersonalInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            headline: "Analytical Engine Programmer".into(),
            email: "ada@example.com".into(),
            location: "London".into(),
            ..Default::default()
        };
        doc.add_section(Section::text("Summary", "First programmer."))
            .unwrap();
        doc.add_section(Section::list(
            "Skills",
            vec!["Mathematics".into(), "Punched cards".into()],
        ))
        .unwrap();
        doc.add_section(Section::custom(
            "Details",
            vec![CustomField::new("Era", "Victorian")],
        ))
        .unwrap();
        doc
    }

    fn paginate(doc: &ResumeDocument, profile: &CustomizationProfile) -> Pagination {
        let sections = doc.visible_sections();
        Paginator::new().paginate(&sections, profile).unwrap()
    }

    #[test]
    fn test_pages_have_canonical_dimensions() {
        let doc = sample_document();
        let profile = CustomizationProfile::default();
        let pagination = paginate(&doc, &profile);

        let pages = ExportRenderer::new()
            .render(&doc, &profile, &pagination)
            .unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].width, 794.0);
        assert_eq!(pages[0].height, 1123.0);
    }

    #[test]
    fn test_header_only_on_first_page() {
        let doc = sample_document();
        let profile = CustomizationProfile::default();
        let pagination = paginate(&doc, &profile);

        let pages = ExportRenderer::new()
            .render(&doc, &profile, &pagination)
            .unwrap();

        let name_runs: Vec<_> = pages[0]
            .text_runs()
            .filter(|r| r.text == "Ada Lovelace")
            .collect();
        assert_eq!(name_runs.len(), 1);
    }

    #[test]
    fn test_hidden_sections_are_not_rendered() {
        let mut doc = sample_document();
        let hidden = doc.sections()[0].id;
        doc.set_visible(hidden, false).unwrap();

        let profile = CustomizationProfile::default();
        let pagination = paginate(&doc, &profile);
        let pages = ExportRenderer::new()
            .render(&doc, &profile, &pagination)
            .unwrap();

        assert!(pages[0].text_runs().all(|r| r.text != "Summary"));
        assert!(pages[0].text_runs().any(|r| r.text == "Skills"));
    }

    #[test]
    fn test_continuous_page_is_at_least_one_page_tall() {
        let doc = sample_document();
        let profile = CustomizationProfile::default();

        let page = ExportRenderer::new()
            .render_continuous(&doc, &profile)
            .unwrap();

        assert_eq!(page.width, 794.0);
        assert!(page.height >= 1123.0);
    }

    #[test]
    fn test_borders_add_section_cards() {
        let doc = sample_document();
        let profile = CustomizationProfile::default().merged(&CustomizationPatch {
            decorations: Some(Decorations {
                borders: true,
                ..Default::default()
            }),
            ..Default::default()
        });
        let pagination = paginate(&doc, &profile);
        let pages = ExportRenderer::new()
            .render(&doc, &profile, &pagination)
            .unwrap();

        let cards = pages[0]
            .items
            .iter()
            .filter(|item| matches!(item, RenderItem::Rect { stroke: Some(_), .. }))
            .count();
        assert_eq!(cards, 3);
    }

    #[test]
    fn test_custom_spacing_moves_content() {
        let doc = sample_document();
        let wide = CustomizationProfile::default();
        let tight = wide.merged(&CustomizationPatch {
            spacing: Some(Spacing {
                page_margin: 48.0,
                ..Default::default()
            }),
            ..Default::default()
        });

        let first_x = |profile: &CustomizationProfile| -> f32 {
            let pagination = paginate(&doc, profile);
            let pages = ExportRenderer::new()
                .render(&doc, profile, &pagination)
                .unwrap();
            let x = pages[0].text_runs().next().unwrap().x;
            x
        };

        assert_eq!(first_x(&wide), 96.0);
        assert_eq!(first_x(&tight), 48.0);
    }
}
