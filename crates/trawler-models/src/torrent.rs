//! Torrent record and lifecycle state as mirrored from the daemon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle states reported by the daemon for a torrent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TorrentState {
    /// Unrecoverable engine error.
    Error,
    /// Payload data is missing on disk.
    MissingFiles,
    /// Seeding to peers.
    Uploading,
    /// Paused while complete.
    PausedUpload,
    /// Queued for seeding.
    QueuedUpload,
    /// Complete but no peer demand.
    StalledUpload,
    /// Verifying pieces while complete.
    CheckingUpload,
    /// Seeding with queue limits bypassed.
    ForcedUpload,
    /// Allocating disk space.
    Allocating,
    /// Actively fetching pieces from the swarm.
    Downloading,
    /// Downloading metadata (trackers / DHT).
    FetchingMetadata,
    /// Paused while incomplete.
    PausedDownload,
    /// Queued for downloading.
    QueuedDownload,
    /// Incomplete with no usable peers.
    StalledDownload,
    /// Verifying pieces while incomplete.
    CheckingDownload,
    /// Downloading with queue limits bypassed.
    ForcedDownload,
    /// Rechecking fast-resume data on startup.
    CheckingResumeData,
    /// Relocating payload files.
    Moving,
    /// State not reported or not understood.
    Unknown,
}

impl TorrentState {
    /// True for both paused variants.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::PausedUpload | Self::PausedDownload)
    }

    /// True when the torrent transfers payload data.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            Self::Uploading | Self::ForcedUpload | Self::Downloading | Self::ForcedDownload
        )
    }

    /// True while the engine verifies piece data.
    #[must_use]
    pub const fn is_checking(self) -> bool {
        matches!(
            self,
            Self::CheckingUpload | Self::CheckingDownload | Self::CheckingResumeData
        )
    }

    /// True when the payload finished downloading.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(
            self,
            Self::Uploading
                | Self::PausedUpload
                | Self::QueuedUpload
                | Self::StalledUpload
                | Self::CheckingUpload
                | Self::ForcedUpload
        )
    }

    /// True for error-like states that need operator attention.
    #[must_use]
    pub const fn is_errored(self) -> bool {
        matches!(self, Self::Error | Self::MissingFiles)
    }
}

impl Default for TorrentState {
    fn default() -> Self {
        Self::Unknown
    }
}

/// One tracked download/upload task, keyed by its info-hash.
///
/// Records are owned by the store and replaced wholesale on every refresh;
/// nothing in the dashboard mutates them in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Torrent {
    /// Content info-hash, the unique identity of the record.
    pub hash: String,
    /// Display name.
    pub name: String,
    /// Current lifecycle state.
    #[serde(default)]
    pub state: TorrentState,
    /// Assigned category (empty when uncategorized).
    #[serde(default)]
    pub category: String,
    /// Labels applied to the torrent.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Primary tracker URL (empty when trackerless).
    #[serde(default)]
    pub tracker: String,
    /// Queue priority; values at or below zero mean unprioritized.
    #[serde(default)]
    pub priority: i64,
    /// When the torrent was added, as unix seconds on the wire.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub added_on: DateTime<Utc>,
    /// Payload size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Completion ratio in the range 0.0–1.0.
    #[serde(default)]
    pub progress: f64,
    /// Share ratio.
    #[serde(default)]
    pub ratio: f64,
    /// Download rate in bytes per second.
    #[serde(default)]
    pub dlspeed: u64,
    /// Upload rate in bytes per second.
    #[serde(default)]
    pub upspeed: u64,
    /// Final save path for the payload.
    #[serde(default)]
    pub save_path: String,
    /// Incomplete-download path, when the daemon separates the two.
    #[serde(default)]
    pub download_path: String,
}

/// RFC9457-compatible problem document surfaced on request failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short, human-readable summary of the issue.
    pub title: String,
    /// HTTP status code associated with the error.
    pub status: u16,
    /// Detailed diagnostic message when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn torrent_deserializes_from_daemon_record() {
        let record: Torrent = serde_json::from_str(
            r#"{
                "hash": "a94a8fe5",
                "name": "ubuntu-24.04.iso",
                "state": "stalled_upload",
                "category": "linux",
                "tags": ["iso", "lts"],
                "tracker": "https://tracker.example.org:8443/announce",
                "priority": 3,
                "added_on": 1700000000,
                "size": 4096,
                "progress": 1.0,
                "ratio": 2.5,
                "dlspeed": 0,
                "upspeed": 1024,
                "save_path": "/library/linux",
                "download_path": ""
            }"#,
        )
        .expect("record should deserialize");

        assert_eq!(record.hash, "a94a8fe5");
        assert_eq!(record.state, TorrentState::StalledUpload);
        assert_eq!(record.tags, vec!["iso".to_string(), "lts".to_string()]);
        assert_eq!(
            record.added_on,
            Utc.timestamp_opt(1_700_000_000, 0).unwrap()
        );
    }

    #[test]
    fn missing_optional_fields_fall_back_to_defaults() {
        let record: Torrent = serde_json::from_str(
            r#"{"hash": "h1", "name": "bare", "added_on": 0}"#,
        )
        .expect("minimal record should deserialize");

        assert_eq!(record.state, TorrentState::Unknown);
        assert!(record.category.is_empty());
        assert!(record.tags.is_empty());
        assert_eq!(record.priority, 0);
    }

    #[test]
    fn state_predicates_cover_variants() {
        assert!(TorrentState::PausedDownload.is_paused());
        assert!(!TorrentState::StalledDownload.is_paused());
        assert!(TorrentState::ForcedUpload.is_active());
        assert!(TorrentState::CheckingResumeData.is_checking());
        assert!(TorrentState::QueuedUpload.is_complete());
        assert!(!TorrentState::Downloading.is_complete());
        assert!(TorrentState::MissingFiles.is_errored());
    }
}
