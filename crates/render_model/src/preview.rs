//! Preview registry and export normalization
//!
//! The registry holds the live, mounted previews by name; the export
//! call's source lookup goes through it. Normalization takes a snapshot of
//! a mounted preview and fixes it to canonical geometry with zoom forced
//! to 1; the snapshot's scratch state is tracked with an RAII guard so
//! tests can assert that nothing an export created outlives it, on the
//! success and the failure path alike.

use crate::{RenderError, Result};
use doc_model::{CustomizationProfile, ResumeDocument};
use layout_engine::PageGeometry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A live, on-screen preview of the document at some zoom scale
#[derive(Debug, Clone)]
pub struct PreviewDocument {
    pub document: ResumeDocument,
    pub profile: CustomizationProfile,
    /// Display-only scale currently applied to this preview
    pub zoom: f32,
}

impl PreviewDocument {
    pub fn new(document: ResumeDocument, profile: CustomizationProfile) -> Self {
        Self {
            document,
            profile,
            zoom: 1.0,
        }
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }
}

/// Named mount points for live previews
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    mounted: Mutex<HashMap<String, PreviewDocument>>,
    scratch: Arc<AtomicUsize>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount (or replace) a preview under a name
    pub fn mount(&self, id: impl Into<String>, preview: PreviewDocument) {
        self.mounted.lock().unwrap().insert(id.into(), preview);
    }

    /// Unmount a preview
    pub fn unmount(&self, id: &str) -> bool {
        self.mounted.lock().unwrap().remove(id).is_some()
    }

    /// Number of mounted previews
    pub fn len(&self) -> usize {
        self.mounted.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the preview mounted under `id`, if any
    pub fn snapshot(&self, id: &str) -> Option<PreviewDocument> {
        self.mounted.lock().unwrap().get(id).cloned()
    }

    /// Number of live export scratch states
    ///
    /// Returns to its pre-export value after every export, success or
    /// failure (the cleanup invariant).
    pub fn scratch_count(&self) -> usize {
        self.scratch.load(Ordering::SeqCst)
    }

    fn begin_scratch(&self) -> ScratchGuard {
        self.scratch.fetch_add(1, Ordering::SeqCst);
        ScratchGuard {
            counter: Arc::clone(&self.scratch),
        }
    }
}

/// RAII handle for one export's scratch state
#[derive(Debug)]
pub struct ScratchGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A preview snapshot fixed to canonical geometry, ready to render
///
/// The preview's zoom is recorded but never applied: the export renders at
/// scale 1 regardless of what the screen shows.
#[derive(Debug)]
pub struct NormalizedDocument {
    pub document: ResumeDocument,
    pub profile: CustomizationProfile,
    pub geometry: PageGeometry,
    /// The zoom the preview was displayed at when the export started
    pub source_zoom: f32,
    _guard: ScratchGuard,
}

impl NormalizedDocument {
    /// The scale the export renders at; always 1
    pub fn scale(&self) -> f32 {
        1.0
    }
}

/// Produce the export input from a mounted preview
///
/// Fails fast with [`RenderError::SourceNotFound`] when nothing is mounted
/// under `source_id`; nothing is allocated in that case.
pub fn normalize(registry: &PreviewRegistry, source_id: &str) -> Result<NormalizedDocument> {
    let preview = registry
        .snapshot(source_id)
        .ok_or_else(|| RenderError::SourceNotFound(source_id.to_string()))?;

    let geometry = PageGeometry::from_profile(&preview.profile)?;
    let guard = registry.begin_scratch();

    Ok(NormalizedDocument {
        document: preview.document,
        profile: preview.profile,
        geometry,
        source_zoom: preview.zoom,
        _guard: guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_preview(zoom: f32) -> PreviewRegistry {
        let registry = PreviewRegistry::new();
        registry.mount(
            "resume-preview",
            PreviewDocument::new(ResumeDocument::new(), CustomizationProfile::default())
                .with_zoom(zoom),
        );
        registry
    }

    #[test]
    fn test_normalize_unknown_source_fails_fast() {
        let registry = PreviewRegistry::new();
        let err = normalize(&registry, "missing").unwrap_err();
        assert!(matches!(err, RenderError::SourceNotFound(_)));
        assert_eq!(registry.scratch_count(), 0);
    }

    #[test]
    fn test_normalize_neutralizes_zoom() {
        let registry = registry_with_preview(1.5);
        let normalized = normalize(&registry, "resume-preview").unwrap();

        assert_eq!(normalized.source_zoom, 1.5);
        assert_eq!(normalized.scale(), 1.0);
        // Canonical geometry, independent of the preview scale.
        assert_eq!(normalized.geometry.page_width, 794.0);
    }

    #[test]
    fn test_scratch_guard_releases_on_drop() {
        let registry = registry_with_preview(1.0);
        assert_eq!(registry.scratch_count(), 0);

        {
            let _normalized = normalize(&registry, "resume-preview").unwrap();
            assert_eq!(registry.scratch_count(), 1);
        }

        assert_eq!(registry.scratch_count(), 0);
    }

    #[test]
    fn test_mount_replace_and_unmount() {
        let registry = registry_with_preview(1.0);
        assert_eq!(registry.len(), 1);

        registry.mount(
            "resume-preview",
            PreviewDocument::new(ResumeDocument::new(), CustomizationProfile::default()),
        );
        assert_eq!(registry.len(), 1);

        assert!(registry.unmount("resume-preview"));
        assert!(!registry.unmount("resume-preview"));
        assert!(registry.is_empty());
    }
}
