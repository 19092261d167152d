//! Export orchestration
//!
//! The single entry point that ties the pipeline together: preview lookup,
//! normalization, sequential per-page rasterization, PDF assembly, and the
//! artifact write. One export may be in flight at a time; a re-entrant
//! call is rejected, not queued. Scratch state and the loading indicator
//! are RAII guards, so cleanup happens on the success and failure exit
//! paths alike and no partial artifact is ever written.

use crate::pdf::{PdfAssembler, PdfError, PdfOptions};
use crate::{export_filename, sanitize_filename, Notice, NoticeCenter, NoticeKind, StatusSink};
use layout_engine::{LayoutError, Paginator};
use raster_engine::{
    rasterize_page, FontLibrary, LocalPhotoFetcher, PhotoFetcher, RasterError, RasterOptions,
};
use render_model::{normalize, ExportRenderer, NormalizedDocument, PreviewRegistry, RenderError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Error type for the export flow
#[derive(Debug, Error)]
pub enum ExportError {
    /// A re-entrant export attempt was rejected
    #[error("An export is already in progress")]
    ExportInProgress,

    /// The element to export does not exist at call time
    #[error("Source not found: no mounted preview named '{0}'")]
    SourceNotFound(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rasterization error: {0}")]
    Raster(#[from] RasterError),

    #[error("PDF assembly error: {0}")]
    Assembly(#[from] PdfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for ExportError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::SourceNotFound(id) => ExportError::SourceNotFound(id),
            RenderError::Layout(e) => ExportError::Layout(e),
        }
    }
}

/// How the document is mapped onto sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// One sheet per paginated page
    #[default]
    Paged,
    /// One continuous render, sliced into sheets by the assembler
    Continuous,
}

/// Settings for one export run
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub mode: ExportMode,
    pub raster: RasterOptions,
    pub pdf: PdfOptions,
}

/// The finished, written artifact
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub path: PathBuf,
    /// Number of sheets in the PDF
    pub page_count: usize,
    /// Sheet size in points
    pub page_size_pts: (f32, f32),
    /// Size of the written file in bytes
    pub bytes: u64,
}

/// Drives exports against a preview registry
pub struct Exporter {
    registry: Arc<PreviewRegistry>,
    notices: Arc<NoticeCenter>,
    fonts: FontLibrary,
    fetcher: Box<dyn PhotoFetcher>,
    output_dir: PathBuf,
    options: ExportOptions,
    in_flight: AtomicBool,
}

impl Exporter {
    pub fn new(
        registry: Arc<PreviewRegistry>,
        notices: Arc<NoticeCenter>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            notices,
            fonts: FontLibrary::new(),
            fetcher: Box::new(LocalPhotoFetcher),
            output_dir: output_dir.into(),
            options: ExportOptions::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn PhotoFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Whether an export is currently running
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Export the preview mounted under `source_id` to a PDF file
    ///
    /// `filename` overrides the `{First}_{Last}_Resume.pdf` convention.
    /// Rejects on any stage failure with the failure notice posted and all
    /// scratch state released; never leaves a partial artifact behind.
    pub async fn export_document(
        &self,
        source_id: &str,
        filename: Option<&str>,
    ) -> Result<ExportArtifact, ExportError> {
        let _flight = self.try_acquire()?;
        let _loading = self.notices.begin_loading();
        self.notices
            .notify(Notice::new(NoticeKind::Started, "Export started"));

        match self.run(source_id, filename).await {
            Ok(artifact) => {
                self.notices.notify(Notice::new(
                    NoticeKind::Succeeded,
                    format!("Exported {}", artifact.filename),
                ));
                Ok(artifact)
            }
            Err(e) => {
                tracing::warn!(error = %e, source_id, "export failed");
                self.notices
                    .notify(Notice::new(NoticeKind::Failed, format!("Export failed: {}", e)));
                Err(e)
            }
        }
    }

    fn try_acquire(&self) -> Result<FlightGuard<'_>, ExportError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::ExportInProgress);
        }
        Ok(FlightGuard { flag: &self.in_flight })
    }

    async fn run(
        &self,
        source_id: &str,
        filename: Option<&str>,
    ) -> Result<ExportArtifact, ExportError> {
        // Lookup and normalization; the scratch guard lives until the end
        // of this function on every exit path.
        let normalized = normalize(&self.registry, source_id)?;

        let filename = match filename {
            Some(name) => sanitize_filename(name),
            None => export_filename(&normalized.document.personal),
        };

        let (width_in, height_in) = normalized.profile.page.effective_dimensions_inches();
        let page_size_pts = (width_in * 72.0, height_in * 72.0);

        let mut pdf_options = self.options.pdf.clone();
        if pdf_options.title.is_none() {
            let name = normalized.document.personal.full_name();
            if !name.is_empty() {
                pdf_options.title = Some(format!("{} - Resume", name));
            }
        }

        let mut assembler = PdfAssembler::new(pdf_options, page_size_pts);
        self.rasterize_into(&mut assembler, &normalized).await?;
        let page_count = assembler.page_count();

        let bytes = assembler.write_to_bytes()?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(&filename);
        tokio::fs::write(&path, &bytes).await?;
        tracing::debug!(path = %path.display(), page_count, "export written");

        Ok(ExportArtifact {
            filename,
            path,
            page_count,
            page_size_pts,
            bytes: bytes.len() as u64,
        })
    }

    /// Rasterize sequentially, one page at a time, feeding the assembler
    /// so each bitmap is released before the next is created
    async fn rasterize_into(
        &self,
        assembler: &mut PdfAssembler,
        normalized: &NormalizedDocument,
    ) -> Result<(), ExportError> {
        let renderer = ExportRenderer::new();

        match self.options.mode {
            ExportMode::Paged => {
                let sections = normalized.document.visible_sections();
                let pagination = Paginator::new().paginate(&sections, &normalized.profile)?;
                if pagination.is_truncated() {
                    tracing::warn!(
                        dropped = pagination.overflow.len(),
                        "content truncated at the page limit"
                    );
                }

                let pages =
                    renderer.render(&normalized.document, &normalized.profile, &pagination)?;
                for page in &pages {
                    let bitmap =
                        rasterize_page(page, self.options.raster, &self.fonts, &*self.fetcher)?;
                    assembler.add_page(&bitmap)?;
                    // Stage boundary: the bitmap drops here and the event
                    // loop gets a turn before the next page.
                    tokio::task::yield_now().await;
                }
            }
            ExportMode::Continuous => {
                let page =
                    renderer.render_continuous(&normalized.document, &normalized.profile)?;
                let bitmap =
                    rasterize_page(&page, self.options.raster, &self.fonts, &*self.fetcher)?;
                assembler.add_tall_bitmap(&bitmap)?;
                tokio::task::yield_now().await;
            }
        }

        Ok(())
    }
}

/// Clears the in-flight flag when the export ends, however it ends
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{CustomizationProfile, PersonalInfo, ResumeDocument, Section};
    use render_model::PreviewDocument;

    const SOURCE: &str = "resume-preview";

    fn sample_document() -> ResumeDocument {
        let mut doc = ResumeDocument::new();
        doc.personal = PersonalInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            ..Default::default()
        };
        doc.add_section(Section::text("Summary", "First programmer."))
            .unwrap();
        doc.add_section(Section::list("Skills", vec!["Math".into()]))
            .unwrap();
        doc
    }

    fn fast_options() -> ExportOptions {
        ExportOptions {
            raster: RasterOptions { supersampling: 1.0 },
            ..Default::default()
        }
    }

    fn setup(zoom: f32) -> (Arc<PreviewRegistry>, Arc<NoticeCenter>, tempfile::TempDir) {
        let registry = Arc::new(PreviewRegistry::new());
        registry.mount(
            SOURCE,
            PreviewDocument::new(sample_document(), CustomizationProfile::default())
                .with_zoom(zoom),
        );
        (registry, Arc::new(NoticeCenter::new()), tempfile::tempdir().unwrap())
    }

    #[tokio::test]
    async fn test_export_succeeds_with_conventional_filename() {
        let (registry, notices, dir) = setup(1.0);
        let exporter =
            Exporter::new(registry.clone(), notices.clone(), dir.path()).with_options(fast_options());

        let artifact = exporter.export_document(SOURCE, None).await.unwrap();

        assert_eq!(artifact.filename, "Ada_Lovelace_Resume.pdf");
        assert_eq!(artifact.page_count, 1);
        assert!(artifact.path.exists());
        assert!(artifact.bytes > 0);

        // Cleanup invariant and notices.
        assert_eq!(registry.scratch_count(), 0);
        assert_eq!(notices.loading_count(), 0);
        let kinds: Vec<_> = notices.notices().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Started, NoticeKind::Succeeded]);
    }

    #[tokio::test]
    async fn test_missing_source_rejects_and_cleans_up() {
        let (registry, notices, dir) = setup(1.0);
        let exporter =
            Exporter::new(registry.clone(), notices.clone(), dir.path()).with_options(fast_options());

        let err = exporter.export_document("nope", None).await.unwrap_err();
        assert!(matches!(err, ExportError::SourceNotFound(_)));

        // No loading indicator or scratch state remains, and no file was
        // written.
        assert_eq!(notices.loading_count(), 0);
        assert_eq!(registry.scratch_count(), 0);
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());

        let kinds: Vec<_> = notices.notices().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Started, NoticeKind::Failed]);
    }

    #[tokio::test]
    async fn test_export_is_structurally_idempotent() {
        let (registry, notices, dir) = setup(1.0);
        let exporter =
            Exporter::new(registry, notices, dir.path()).with_options(fast_options());

        let first = exporter.export_document(SOURCE, None).await.unwrap();
        let second = exporter.export_document(SOURCE, None).await.unwrap();

        assert_eq!(first.page_count, second.page_count);
        assert_eq!(first.page_size_pts, second.page_size_pts);
    }

    #[tokio::test]
    async fn test_zoom_never_affects_the_artifact() {
        let (registry_zoomed, notices_a, dir_a) = setup(2.0);
        let (registry_plain, notices_b, dir_b) = setup(1.0);

        let zoomed = Exporter::new(registry_zoomed, notices_a, dir_a.path())
            .with_options(fast_options())
            .export_document(SOURCE, None)
            .await
            .unwrap();
        let plain = Exporter::new(registry_plain, notices_b, dir_b.path())
            .with_options(fast_options())
            .export_document(SOURCE, None)
            .await
            .unwrap();

        assert_eq!(zoomed.page_count, plain.page_count);
        assert_eq!(zoomed.page_size_pts, plain.page_size_pts);
    }

    #[tokio::test]
    async fn test_reentrant_export_is_rejected() {
        let (registry, notices, dir) = setup(1.0);
        let exporter =
            Exporter::new(registry, notices, dir.path()).with_options(fast_options());

        let _held = exporter.try_acquire().unwrap();
        assert!(exporter.is_exporting());

        let err = exporter.export_document(SOURCE, None).await.unwrap_err();
        assert!(matches!(err, ExportError::ExportInProgress));
    }

    #[tokio::test]
    async fn test_flight_flag_clears_after_failure() {
        let (registry, notices, dir) = setup(1.0);
        let exporter =
            Exporter::new(registry, notices, dir.path()).with_options(fast_options());

        let _ = exporter.export_document("nope", None).await;
        assert!(!exporter.is_exporting());
    }

    #[tokio::test]
    async fn test_continuous_mode_produces_sheets() {
        let (registry, notices, dir) = setup(1.0);
        let options = ExportOptions {
            mode: ExportMode::Continuous,
            raster: RasterOptions { supersampling: 1.0 },
            ..Default::default()
        };
        let exporter = Exporter::new(registry, notices, dir.path()).with_options(options);

        let artifact = exporter.export_document(SOURCE, None).await.unwrap();
        assert!(artifact.page_count >= 1);
        assert!(artifact.path.exists());
    }

    #[tokio::test]
    async fn test_custom_filename_is_sanitized() {
        let (registry, notices, dir) = setup(1.0);
        let exporter =
            Exporter::new(registry, notices, dir.path()).with_options(fast_options());

        let artifact = exporter
            .export_document(SOURCE, Some("my draft??.pdf"))
            .await
            .unwrap();
        assert_eq!(artifact.filename, "my_draft.pdf");
    }
}
