//! Durable snapshots
//!
//! The document, the customization profile, and the section ordering are
//! serialized as three independent JSON blobs under distinct named keys,
//! written only on an explicit save, never automatically. Loading
//! reconciles the stored ordering against the stored document: unknown ids
//! are dropped, missing ids keep their document position at the end.

use crate::{Result, SnapshotFile, StoreError};
use doc_model::{CustomizationProfile, ResumeDocument, SectionId};
use std::path::{Path, PathBuf};

/// Key for the document blob
pub const KEY_DOCUMENT: &str = "resume.document";
/// Key for the customization profile blob
pub const KEY_CUSTOMIZATION: &str = "resume.customization";
/// Key for the section ordering blob
pub const KEY_SECTION_ORDER: &str = "resume.sectionOrder";

/// Snapshot store rooted at a directory; one file per key
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    async fn write_key<T: serde::Serialize>(&self, key: &str, payload: &T) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = SnapshotFile::new(payload).to_json()?;
        tokio::fs::write(self.path_for(key), json).await?;
        tracing::debug!(key, "snapshot written");
        Ok(())
    }

    async fn read_key<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<T> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(StoreError::SnapshotNotFound(key.to_string()));
        }
        let json = tokio::fs::read_to_string(path).await?;
        SnapshotFile::from_json(&json)
    }

    /// Whether a key has been saved
    pub fn has_key(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Save the document blob
    pub async fn save_document(&self, document: &ResumeDocument) -> Result<()> {
        self.write_key(KEY_DOCUMENT, document).await
    }

    /// Load the document blob
    pub async fn load_document(&self) -> Result<ResumeDocument> {
        self.read_key(KEY_DOCUMENT).await
    }

    /// Save the customization profile blob
    pub async fn save_customization(&self, profile: &CustomizationProfile) -> Result<()> {
        self.write_key(KEY_CUSTOMIZATION, profile).await
    }

    /// Load the customization profile blob
    pub async fn load_customization(&self) -> Result<CustomizationProfile> {
        self.read_key(KEY_CUSTOMIZATION).await
    }

    /// Save the section ordering blob
    pub async fn save_section_order(&self, order: &[SectionId]) -> Result<()> {
        self.write_key(KEY_SECTION_ORDER, &order.to_vec()).await
    }

    /// Load the section ordering blob
    pub async fn load_section_order(&self) -> Result<Vec<SectionId>> {
        self.read_key(KEY_SECTION_ORDER).await
    }

    /// Explicit save of the full workspace: all three blobs
    pub async fn save_workspace(
        &self,
        document: &ResumeDocument,
        profile: &CustomizationProfile,
    ) -> Result<()> {
        self.save_document(document).await?;
        self.save_customization(profile).await?;
        self.save_section_order(&document.section_order()).await?;
        Ok(())
    }

    /// Load the full workspace, reconciling the stored ordering
    ///
    /// A missing customization blob falls back to defaults; a missing
    /// ordering blob leaves the document order untouched.
    pub async fn load_workspace(&self) -> Result<(ResumeDocument, CustomizationProfile)> {
        let mut document = self.load_document().await?;

        let profile = match self.load_customization().await {
            Ok(profile) => profile,
            Err(StoreError::SnapshotNotFound(_)) => CustomizationProfile::default(),
            Err(e) => return Err(e),
        };

        match self.load_section_order().await {
            Ok(order) => document.apply_order(&order),
            Err(StoreError::SnapshotNotFound(_)) => {}
            Err(e) => return Err(e),
        }

        Ok((document, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Section;

    fn sample_document() -> ResumeDocument {
        let mut doc = ResumeDocument::new();
        doc.add_section(Section::text("Summary", "hello")).unwrap();
        doc.add_section(Section::list("Skills", vec!["Rust".into()]))
            .unwrap();
        doc
    }

    #[tokio::test]
    async fn test_blobs_are_independent_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let doc = sample_document();

        store
            .save_workspace(&doc, &CustomizationProfile::default())
            .await
            .unwrap();

        assert!(store.has_key(KEY_DOCUMENT));
        assert!(store.has_key(KEY_CUSTOMIZATION));
        assert!(store.has_key(KEY_SECTION_ORDER));
    }

    #[tokio::test]
    async fn test_workspace_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let doc = sample_document();

        store
            .save_workspace(&doc, &CustomizationProfile::default())
            .await
            .unwrap();
        let (loaded, profile) = store.load_workspace().await.unwrap();

        assert_eq!(loaded, doc);
        assert_eq!(profile, CustomizationProfile::default());
    }

    #[tokio::test]
    async fn test_stored_order_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let doc = sample_document();
        let mut order = doc.section_order();
        order.reverse();

        store.save_document(&doc).await.unwrap();
        store.save_section_order(&order).await.unwrap();

        let (loaded, _) = store.load_workspace().await.unwrap();
        assert_eq!(loaded.section_order(), order);
    }

    #[tokio::test]
    async fn test_missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(matches!(
            store.load_workspace().await,
            Err(StoreError::SnapshotNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_optional_blobs_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let doc = sample_document();

        store.save_document(&doc).await.unwrap();
        let (loaded, profile) = store.load_workspace().await.unwrap();

        assert_eq!(loaded.section_order(), doc.section_order());
        assert_eq!(profile, CustomizationProfile::default());
    }
}
