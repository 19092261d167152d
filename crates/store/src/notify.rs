//! Status notices
//!
//! Transient, dismissible notices for export progress: started, succeeded,
//! failed. Notices are presentation-only and carry no pipeline data. The
//! in-flight "loading" state is an RAII guard so that no indicator can
//! outlive the export that created it, on any exit path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Notice severity/kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Started,
    Succeeded,
    Failed,
}

/// One dismissible on-screen notice
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Sink for export status events
pub trait StatusSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// In-memory notice center: collects notices and tracks loading state
#[derive(Debug, Default)]
pub struct NoticeCenter {
    notices: Mutex<Vec<Notice>>,
    loading: Arc<AtomicUsize>,
}

impl NoticeCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current notices
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    /// Dismiss a notice by position
    pub fn dismiss(&self, index: usize) -> bool {
        let mut notices = self.notices.lock().unwrap();
        if index < notices.len() {
            notices.remove(index);
            true
        } else {
            false
        }
    }

    /// Dismiss everything
    pub fn clear(&self) {
        self.notices.lock().unwrap().clear();
    }

    /// Number of live loading indicators
    ///
    /// Returns to its pre-export value after every export, success or
    /// failure.
    pub fn loading_count(&self) -> usize {
        self.loading.load(Ordering::SeqCst)
    }

    /// Begin a loading indicator; dropping the guard removes it
    pub fn begin_loading(&self) -> LoadingGuard {
        self.loading.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            counter: Arc::clone(&self.loading),
        }
    }
}

impl StatusSink for NoticeCenter {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// RAII handle for one loading indicator
#[derive(Debug)]
pub struct LoadingGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_and_dismiss() {
        let center = NoticeCenter::new();
        center.notify(Notice::new(NoticeKind::Succeeded, "done"));
        assert_eq!(center.notices().len(), 1);

        assert!(center.dismiss(0));
        assert!(!center.dismiss(0));
        assert!(center.notices().is_empty());
    }

    #[test]
    fn test_loading_guard_releases_on_drop() {
        let center = NoticeCenter::new();
        assert_eq!(center.loading_count(), 0);
        {
            let _guard = center.begin_loading();
            assert_eq!(center.loading_count(), 1);
        }
        assert_eq!(center.loading_count(), 0);
    }

    #[test]
    fn test_loading_guard_releases_on_panic_path() {
        let center = NoticeCenter::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = center.begin_loading();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(center.loading_count(), 0);
    }
}
