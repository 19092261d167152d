//! Preview pagination
//!
//! Splits the ordered, visible sections into fixed-size pages using height
//! estimates. The paginator is a pure function of its inputs and is
//! re-invoked on every document, template, or profile change; it keeps no
//! state across calls.
//!
//! Heights are estimated, not measured: each section contributes a fixed
//! estimate and the personal header contributes a fixed first-page
//! estimate. A section whose estimate alone exceeds the usable height is
//! still placed alone on its own page. Pages past `max_pages` are dropped,
//! and the dropped section ids are reported rather than silently emitted.

use crate::{PageGeometry, Result};
use doc_model::{CustomizationProfile, PageBreakPolicy, Section, SectionId};
use serde::{Deserialize, Serialize};

/// Estimates the vertical space a piece of content will occupy
///
/// The default implementation uses fixed estimates. A measuring estimator
/// can be plugged in here without touching the pagination loop.
pub trait HeightEstimator {
    /// Estimated height of the personal header on the first page
    fn header_height(&self) -> f32;

    /// Estimated height of one section
    fn section_height(&self, section: &Section) -> f32;
}

/// Fixed per-section and header estimates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedHeightEstimator {
    pub header: f32,
    pub section: f32,
}

impl Default for FixedHeightEstimator {
    fn default() -> Self {
        Self {
            header: 200.0,
            section: 150.0,
        }
    }
}

impl HeightEstimator for FixedHeightEstimator {
    fn header_height(&self) -> f32 {
        self.header
    }

    fn section_height(&self, _section: &Section) -> f32 {
        self.section
    }
}

/// A derived grouping of sections sized to fit one sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Zero-based page index
    pub index: usize,
    /// Ordered section ids placed on this page
    pub sections: Vec<SectionId>,
}

/// The outcome of one pagination pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Pages in order; never longer than the configured maximum
    pub pages: Vec<Page>,
    /// Section ids dropped because they fell past the page limit
    pub overflow: Vec<SectionId>,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether content was lost to the page limit
    pub fn is_truncated(&self) -> bool {
        !self.overflow.is_empty()
    }

    /// All placed section ids, in page order
    pub fn placed_sections(&self) -> Vec<SectionId> {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter().copied())
            .collect()
    }
}

/// Splits sections into pages
pub struct Paginator<E: HeightEstimator = FixedHeightEstimator> {
    estimator: E,
}

impl Paginator<FixedHeightEstimator> {
    /// Paginator with the default fixed estimates
    pub fn new() -> Self {
        Self {
            estimator: FixedHeightEstimator::default(),
        }
    }
}

impl Default for Paginator<FixedHeightEstimator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HeightEstimator> Paginator<E> {
    /// Paginator with a custom estimator
    pub fn with_estimator(estimator: E) -> Self {
        Self { estimator }
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Split the visible sections into pages for the given profile
    pub fn paginate(
        &self,
        sections: &[&Section],
        profile: &CustomizationProfile,
    ) -> Result<Pagination> {
        let geometry = PageGeometry::from_profile(profile)?;
        let usable = self.budget_for(profile, &geometry);
        let max_pages = profile.page.max_pages.max(1);

        let mut pages: Vec<Page> = Vec::new();
        let mut overflow: Vec<SectionId> = Vec::new();

        // The first page starts with the header already accounted for.
        let mut used = self.estimator.header_height();
        let mut current: Vec<SectionId> = Vec::new();

        for section in sections {
            let height = self.estimator.section_height(section);

            let breaks = match profile.page.break_policy {
                PageBreakPolicy::Manual => false,
                _ => used + height > usable && !current.is_empty(),
            };

            if breaks {
                if pages.len() + 1 >= max_pages && !current.is_empty() {
                    // This was the last allowed page; everything from here
                    // on is dropped, not silently flowed onto extra pages.
                    pages.push(Page {
                        index: pages.len(),
                        sections: std::mem::take(&mut current),
                    });
                    overflow.push(section.id);
                    overflow.extend(
                        sections
                            .iter()
                            .skip_while(|s| s.id != section.id)
                            .skip(1)
                            .map(|s| s.id),
                    );
                    return Ok(Pagination { pages, overflow });
                }

                pages.push(Page {
                    index: pages.len(),
                    sections: std::mem::take(&mut current),
                });
                used = 0.0;
            }

            current.push(section.id);
            used += height;
        }

        if !current.is_empty() || pages.is_empty() {
            pages.push(Page {
                index: pages.len(),
                sections: current,
            });
        }

        Ok(Pagination { pages, overflow })
    }

    /// Usable height budget, adjusted for the break policy
    fn budget_for(&self, profile: &CustomizationProfile, geometry: &PageGeometry) -> f32 {
        let usable = geometry.usable_height();
        match profile.page.break_policy {
            // Squeeze up to 10% past the budget before breaking.
            PageBreakPolicy::Avoid => usable * 1.1,
            _ => usable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{CustomizationPatch, PageSetup, Section};
    use proptest::prelude::*;

    fn sections(count: usize) -> Vec<Section> {
        (0..count)
            .map(|i| Section::text(format!("Section {}", i), "body"))
            .collect()
    }

    fn paginate(
        sections: &[Section],
        profile: &CustomizationProfile,
    ) -> Pagination {
        let refs: Vec<&Section> = sections.iter().collect();
        Paginator::new().paginate(&refs, profile).unwrap()
    }

    fn profile_with_max_pages(max_pages: usize) -> CustomizationProfile {
        CustomizationProfile::default().merged(&CustomizationPatch {
            page: Some(PageSetup {
                max_pages,
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    #[test]
    fn test_three_sections_fit_one_page() {
        // Header 200 + 3 x 150 = 650 <= 842.
        let sections = sections(3);
        let result = paginate(&sections, &CustomizationProfile::default());

        assert_eq!(result.page_count(), 1);
        assert_eq!(result.pages[0].sections.len(), 3);
        assert!(!result.is_truncated());
    }

    #[test]
    fn test_order_is_preserved_across_pages() {
        let sections = sections(12);
        let result = paginate(&sections, &profile_with_max_pages(10));

        let placed = result.placed_sections();
        let expected: Vec<_> = sections.iter().map(|s| s.id).collect();
        assert_eq!(placed, expected[..placed.len()]);
    }

    #[test]
    fn test_truncation_at_max_pages() {
        // Header 200 + 4 x 150 = 800 fits page one; the fifth breaks, but
        // only one page is allowed, so sections five onward are dropped.
        let sections = sections(10);
        let result = paginate(&sections, &profile_with_max_pages(1));

        assert_eq!(result.page_count(), 1);
        assert_eq!(result.pages[0].sections.len(), 4);
        assert!(result.is_truncated());
        assert_eq!(result.overflow.len(), 6);
    }

    #[test]
    fn test_oversized_section_gets_own_page() {
        let profile = profile_with_max_pages(5);
        let tall = FixedHeightEstimator {
            header: 200.0,
            section: 2000.0,
        };
        let sections = sections(2);
        let refs: Vec<&Section> = sections.iter().collect();

        let result = Paginator::with_estimator(tall)
            .paginate(&refs, &profile)
            .unwrap();

        // Each oversized section still lands alone on a page.
        assert_eq!(result.page_count(), 2);
        assert_eq!(result.pages[0].sections.len(), 1);
        assert_eq!(result.pages[1].sections.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_single_empty_page() {
        let result = paginate(&[], &CustomizationProfile::default());
        assert_eq!(result.page_count(), 1);
        assert!(result.pages[0].sections.is_empty());
    }

    #[test]
    fn test_manual_policy_never_breaks() {
        let profile = CustomizationProfile::default().merged(&CustomizationPatch {
            page: Some(PageSetup {
                break_policy: PageBreakPolicy::Manual,
                max_pages: 3,
                ..Default::default()
            }),
            ..Default::default()
        });
        let sections = sections(20);
        let result = paginate(&sections, &profile);

        assert_eq!(result.page_count(), 1);
        assert_eq!(result.pages[0].sections.len(), 20);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_max_pages(count in 0usize..40, max_pages in 1usize..6) {
            let sections = sections(count);
            let result = paginate(&sections, &profile_with_max_pages(max_pages));
            prop_assert!(result.page_count() <= max_pages);
        }

        #[test]
        fn prop_placed_is_order_preserving_prefix(count in 0usize..40, max_pages in 1usize..6) {
            let sections = sections(count);
            let result = paginate(&sections, &profile_with_max_pages(max_pages));

            let input: Vec<_> = sections.iter().map(|s| s.id).collect();
            let placed = result.placed_sections();

            // No duplicates, and placement is a prefix of the input order.
            prop_assert_eq!(&input[..placed.len()], placed.as_slice());

            // Placed plus overflow covers the whole input exactly once.
            let mut all = placed;
            all.extend(result.overflow.iter().copied());
            prop_assert_eq!(all, input);
        }
    }
}
