//! Refresh-query types shared between the store and the HTTP client.

use serde::{Deserialize, Serialize};

/// Sort keys understood by both the daemon and the local comparator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Server-decided ordering; also what the store requests while it
    /// re-sorts locally.
    Default,
    /// Display name, case-insensitive.
    Name,
    /// Payload size in bytes.
    Size,
    /// Completion ratio.
    Progress,
    /// Share ratio.
    Ratio,
    /// Download rate.
    DlSpeed,
    /// Upload rate.
    UpSpeed,
    /// Queue priority; non-positive values rank last.
    Priority,
    /// Add timestamp.
    AddedOn,
}

impl SortKey {
    /// Wire label used in the list query string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Name => "name",
            Self::Size => "size",
            Self::Progress => "progress",
            Self::Ratio => "ratio",
            Self::DlSpeed => "dlspeed",
            Self::UpSpeed => "upspeed",
            Self::Priority => "priority",
            Self::AddedOn => "added_on",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Default
    }
}

/// Parameters the refresh collaborator sends when listing torrents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TorrentListQuery {
    /// Server-side ordering to request.
    pub sort: SortKey,
    /// Whether the server should reverse that ordering.
    pub reverse: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_have_stable_wire_labels() {
        assert_eq!(SortKey::Default.as_str(), "default");
        assert_eq!(SortKey::AddedOn.as_str(), "added_on");
        assert_eq!(SortKey::DlSpeed.as_str(), "dlspeed");
    }

    #[test]
    fn default_query_requests_server_ordering() {
        let query = TorrentListQuery::default();
        assert_eq!(query.sort, SortKey::Default);
        assert!(!query.reverse);
    }
}
