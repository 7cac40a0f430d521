//! Add-torrent request shapes (multipart file payloads plus options).

use serde::{Deserialize, Serialize};

/// In-memory `.torrent` file attached to an add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFilePayload {
    /// File name reported in the multipart part.
    pub name: String,
    /// Raw metainfo bytes.
    pub bytes: Vec<u8>,
}

/// Options accompanying an add request; every field is optional so the
/// daemon's defaults apply when the form leaves them blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AddTorrentOptions {
    /// Category to assign on add.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Tags to apply on add.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Save path override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    /// Rename the torrent on add.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    /// Start paused instead of queued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Download in piece order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequential: Option<bool>,
    /// Skip hash checking when data already exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_checking: Option<bool>,
    /// Per-torrent download cap in bytes per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_limit: Option<u64>,
    /// Per-torrent upload cap in bytes per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_limit: Option<u64>,
    /// Share-ratio limit after which seeding stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio_limit: Option<f64>,
}

/// Full add request: any mix of file payloads and source URLs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddTorrentRequest {
    /// `.torrent` files to upload.
    pub files: Vec<TorrentFilePayload>,
    /// Magnet links or HTTP(S) URLs, one per entry.
    pub urls: Vec<String>,
    /// Shared options for every added torrent.
    pub options: AddTorrentOptions,
}

impl AddTorrentRequest {
    /// True when neither a file nor a URL was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize_sparsely() {
        let options = AddTorrentOptions {
            category: Some("movies".into()),
            paused: Some(true),
            ..AddTorrentOptions::default()
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"category": "movies", "paused": true})
        );
    }

    #[test]
    fn empty_request_is_detected() {
        assert!(AddTorrentRequest::default().is_empty());
        let with_url = AddTorrentRequest {
            urls: vec!["magnet:?xt=urn:btih:abc".into()],
            ..AddTorrentRequest::default()
        };
        assert!(!with_url.is_empty());
    }
}
