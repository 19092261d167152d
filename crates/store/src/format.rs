//! Snapshot envelope format
//!
//! Every snapshot blob is wrapped in a versioned envelope so that loads
//! can reject files written by an incompatible build instead of
//! misreading them.

use crate::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Magic string identifying snapshot files
pub const SNAPSHOT_MAGIC: &str = "resume-studio";

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Envelope header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatHeader {
    pub magic: String,
    pub version: u32,
    /// RFC 3339 timestamp of the save
    pub saved_at: String,
}

impl FormatHeader {
    pub fn new() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC.to_string(),
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == SNAPSHOT_MAGIC && self.version <= SNAPSHOT_VERSION
    }
}

impl Default for FormatHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// A payload wrapped in the versioned envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile<T> {
    pub header: FormatHeader,
    pub payload: T,
}

impl<T: Serialize> SnapshotFile<T> {
    pub fn new(payload: T) -> Self {
        Self {
            header: FormatHeader::new(),
            payload,
        }
    }

    /// Serialize with a fresh header
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<T: DeserializeOwned> SnapshotFile<T> {
    /// Parse and validate the envelope, returning the payload
    pub fn from_json(json: &str) -> Result<T> {
        let file: SnapshotFile<T> = serde_json::from_str(json)?;
        if !file.header.is_valid() {
            return Err(StoreError::InvalidFormat(format!(
                "unsupported snapshot: magic '{}', version {}",
                file.header.magic, file.header.version
            )));
        }
        Ok(file.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let file = SnapshotFile::new(vec![1u32, 2, 3]);
        let json = file.to_json().unwrap();
        let payload: Vec<u32> = SnapshotFile::from_json(&json).unwrap();
        assert_eq!(payload, vec![1, 2, 3]);
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let json = r#"{"header":{"magic":"other-app","version":1,"savedAt":""},"payload":[]}"#;
        let result: Result<Vec<u32>> = SnapshotFile::from_json(json);
        assert!(matches!(result, Err(StoreError::InvalidFormat(_))));
    }

    #[test]
    fn test_future_version_is_rejected() {
        let json = format!(
            r#"{{"header":{{"magic":"{}","version":{},"savedAt":""}},"payload":[]}}"#,
            SNAPSHOT_MAGIC,
            SNAPSHOT_VERSION + 1
        );
        let result: Result<Vec<u32>> = SnapshotFile::from_json(&json);
        assert!(matches!(result, Err(StoreError::InvalidFormat(_))));
    }
}
