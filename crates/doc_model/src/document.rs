//! The resume document
//!
//! An ordered collection of sections plus the personal header. Section
//! ordering is a total order with no duplicate identifiers; reordering
//! mutates only position, never identity.

use crate::{DocModelError, PersonalInfo, Result, Section, SectionContent, SectionId};
use serde::{Deserialize, Serialize};

/// The complete in-memory resume document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    sections: Vec<Section>,
}

impl ResumeDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// All sections in order, visible or not
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Ordered references to visible sections only
    pub fn visible_sections(&self) -> Vec<&Section> {
        self.sections.iter().filter(|s| s.visible).collect()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Current section id ordering
    pub fn section_order(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id).collect()
    }

    /// Look up a section by id
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Look up a section mutably by id
    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    fn index_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Append a section, rejecting duplicate ids
    pub fn add_section(&mut self, section: Section) -> Result<SectionId> {
        if self.index_of(section.id).is_some() {
            return Err(DocModelError::DuplicateSection(section.id));
        }
        let id = section.id;
        self.sections.push(section);
        Ok(id)
    }

    /// Remove a section, returning it
    pub fn remove_section(&mut self, id: SectionId) -> Result<Section> {
        let index = self
            .index_of(id)
            .ok_or(DocModelError::SectionNotFound(id))?;
        Ok(self.sections.remove(index))
    }

    /// Replace a section's content
    pub fn set_content(&mut self, id: SectionId, content: SectionContent) -> Result<()> {
        let section = self
            .section_mut(id)
            .ok_or(DocModelError::SectionNotFound(id))?;
        section.content = content;
        Ok(())
    }

    /// Rename a section
    pub fn rename_section(&mut self, id: SectionId, title: impl Into<String>) -> Result<()> {
        let section = self
            .section_mut(id)
            .ok_or(DocModelError::SectionNotFound(id))?;
        section.title = title.into();
        Ok(())
    }

    /// Show or hide a section
    pub fn set_visible(&mut self, id: SectionId, visible: bool) -> Result<()> {
        let section = self
            .section_mut(id)
            .ok_or(DocModelError::SectionNotFound(id))?;
        section.visible = visible;
        Ok(())
    }

    /// Move the section at `from` to position `to`, preserving all other
    /// relative order
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.sections.len();
        if from >= len || to >= len {
            return Err(DocModelError::InvalidMove { from, to, len });
        }
        if from == to {
            return Ok(());
        }
        let section = self.sections.remove(from);
        self.sections.insert(to, section);
        Ok(())
    }

    /// Move a list item inside a section from index `from` to `to`
    pub fn move_item(&mut self, id: SectionId, from: usize, to: usize) -> Result<()> {
        let section = self
            .section_mut(id)
            .ok_or(DocModelError::SectionNotFound(id))?;

        match &mut section.content {
            SectionContent::List { items } => {
                let len = items.len();
                if from >= len || to >= len {
                    return Err(DocModelError::InvalidItemIndex {
                        section: id,
                        index: from.max(to),
                    });
                }
                if from != to {
                    let item = items.remove(from);
                    items.insert(to, item);
                }
                Ok(())
            }
            SectionContent::Custom { fields } => {
                let len = fields.len();
                if from >= len || to >= len {
                    return Err(DocModelError::InvalidItemIndex {
                        section: id,
                        index: from.max(to),
                    });
                }
                if from != to {
                    let field = fields.remove(from);
                    fields.insert(to, field);
                }
                Ok(())
            }
            SectionContent::Text { .. } => Err(DocModelError::InvalidOperation(
                "text sections have no reorderable items".to_string(),
            )),
        }
    }

    /// Reorder sections to match `order`; unknown ids are ignored and
    /// sections absent from `order` keep their relative position at the end.
    ///
    /// Used when reconciling a stored ordering blob against the document.
    pub fn apply_order(&mut self, order: &[SectionId]) {
        let mut reordered: Vec<Section> = Vec::with_capacity(self.sections.len());
        for id in order {
            if let Some(index) = self.sections.iter().position(|s| s.id == *id) {
                reordered.push(self.sections.remove(index));
            }
        }
        reordered.append(&mut self.sections);
        self.sections = reordered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn doc_with_titles(titles: &[&str]) -> ResumeDocument {
        let mut doc = ResumeDocument::new();
        for title in titles {
            doc.add_section(Section::text(*title, "body")).unwrap();
        }
        doc
    }

    fn titles(doc: &ResumeDocument) -> Vec<String> {
        doc.sections().iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut doc = ResumeDocument::new();
        let section = Section::text("Summary", "hello");
        let dup = section.clone();

        doc.add_section(section).unwrap();
        let err = doc.add_section(dup).unwrap_err();
        assert!(matches!(err, DocModelError::DuplicateSection(_)));
    }

    #[test]
    fn test_move_section_preserves_relative_order() {
        let mut doc = doc_with_titles(&["a", "b", "c", "d"]);
        doc.move_section(0, 2).unwrap();
        assert_eq!(titles(&doc), vec!["b", "c", "a", "d"]);

        doc.move_section(3, 0).unwrap();
        assert_eq!(titles(&doc), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_section_out_of_range() {
        let mut doc = doc_with_titles(&["a"]);
        assert!(doc.move_section(0, 5).is_err());
        assert!(doc.move_section(5, 0).is_err());
    }

    #[test]
    fn test_visible_sections_filters_and_preserves_order() {
        let mut doc = doc_with_titles(&["a", "b", "c"]);
        let hidden = doc.sections()[1].id;
        doc.set_visible(hidden, false).unwrap();

        let visible: Vec<_> = doc
            .visible_sections()
            .iter()
            .map(|s| s.title.clone())
            .collect();
        assert_eq!(visible, vec!["a", "c"]);
    }

    #[test]
    fn test_move_item_in_list_section() {
        let mut doc = ResumeDocument::new();
        let id = doc
            .add_section(Section::list(
                "Skills",
                vec!["Rust".into(), "SQL".into(), "Go".into()],
            ))
            .unwrap();

        doc.move_item(id, 2, 0).unwrap();
        match &doc.section(id).unwrap().content {
            SectionContent::List { items } => {
                assert_eq!(items, &["Go".to_string(), "Rust".into(), "SQL".into()]);
            }
            _ => panic!("expected list content"),
        }
    }

    #[test]
    fn test_move_item_rejects_text_section() {
        let mut doc = ResumeDocument::new();
        let id = doc.add_section(Section::text("Summary", "hi")).unwrap();
        assert!(doc.move_item(id, 0, 0).is_err());
    }

    #[test]
    fn test_apply_order_reconciles() {
        let mut doc = doc_with_titles(&["a", "b", "c"]);
        let ids = doc.section_order();

        // Reversed order plus an unknown id; "c" omitted.
        let stored = vec![SectionId::new(), ids[1], ids[0]];
        doc.apply_order(&stored);

        assert_eq!(titles(&doc), vec!["b", "a", "c"]);
    }

    proptest! {
        #[test]
        fn prop_move_section_keeps_id_set(count in 1usize..8, from in 0usize..8, to in 0usize..8) {
            let names: Vec<String> = (0..count).map(|i| format!("s{}", i)).collect();
            let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
            let mut doc = doc_with_titles(&refs);
            let before: std::collections::HashSet<_> =
                doc.section_order().into_iter().collect();

            let _ = doc.move_section(from % count, to % count);

            let after: std::collections::HashSet<_> =
                doc.section_order().into_iter().collect();
            prop_assert_eq!(before, after);
            prop_assert_eq!(doc.len(), count);
        }
    }
}
