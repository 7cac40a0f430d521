//! Filter state and the predicates that decide record visibility.

use serde::{Deserialize, Serialize};
use trawler_models::{Torrent, TorrentState};
use url::Url;

/// User-configured filter state: five independent dimensions, each with an
/// enabled flag and a criteria set.
///
/// A dimension excludes a record only when it is active AND its criteria set
/// is non-empty AND the record fails its predicate; all active dimensions
/// must pass for the record to stay visible. Tag and tracker criteria use
/// `None` as the "no tag" / "no tracker" sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Filters {
    /// Whether the free-text filter applies.
    pub text_active: bool,
    /// Free-text query matched against display names.
    pub text: String,
    /// Whether the status filter applies.
    pub status_active: bool,
    /// Accepted lifecycle states.
    pub status: Vec<TorrentState>,
    /// Whether the category filter applies.
    pub category_active: bool,
    /// Accepted categories.
    pub categories: Vec<String>,
    /// Whether the tag filter applies.
    pub tag_active: bool,
    /// Accepted tags; `None` accepts untagged records.
    pub tags: Vec<Option<String>>,
    /// Whether the tracker filter applies.
    pub tracker_active: bool,
    /// Accepted tracker hostnames; `None` accepts trackerless records.
    pub trackers: Vec<Option<String>>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            text_active: true,
            text: String::new(),
            status_active: true,
            status: Vec::new(),
            category_active: true,
            categories: Vec::new(),
            tag_active: true,
            tags: Vec::new(),
            tracker_active: true,
            trackers: Vec::new(),
        }
    }
}

impl Filters {
    /// Evaluate the status/category/tag/tracker dimensions for one record.
    /// The text dimension is applied separately by the search stage.
    #[must_use]
    pub fn passes(&self, torrent: &Torrent) -> bool {
        !((self.status_active && !self.status.is_empty() && !self.matches_status(torrent))
            || (self.category_active
                && !self.categories.is_empty()
                && !self.matches_category(torrent))
            || (self.tag_active && !self.tags.is_empty() && !self.matches_tag(torrent))
            || (self.tracker_active
                && !self.trackers.is_empty()
                && !self.matches_tracker(torrent)))
    }

    /// True when the text dimension should narrow the view.
    #[must_use]
    pub fn search_active(&self) -> bool {
        self.text_active && !self.text.trim().is_empty()
    }

    fn matches_status(&self, torrent: &Torrent) -> bool {
        self.status.contains(&torrent.state)
    }

    fn matches_category(&self, torrent: &Torrent) -> bool {
        self.categories.contains(&torrent.category)
    }

    fn matches_tag(&self, torrent: &Torrent) -> bool {
        (torrent.tags.is_empty() && self.tags.contains(&None))
            || torrent
                .tags
                .iter()
                .any(|tag| {
                    self.tags
                        .iter()
                        .any(|accepted| accepted.as_deref() == Some(tag.as_str()))
                })
    }

    fn matches_tracker(&self, torrent: &Torrent) -> bool {
        self.trackers.contains(&extract_hostname(&torrent.tracker))
    }
}

/// Reduce a tracker URL to its hostname; `None` for empty or unparsable
/// values, which groups them under the "no tracker" sentinel.
#[must_use]
pub fn extract_hostname(tracker: &str) -> Option<String> {
    if tracker.trim().is_empty() {
        return None;
    }
    Url::parse(tracker)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

/// Case-insensitive token match: every whitespace-separated token of the
/// query must appear somewhere in the name.
#[must_use]
pub fn matches_query(name: &str, query: &str) -> bool {
    let haystack = name.to_lowercase();
    query
        .split_whitespace()
        .all(|token| haystack.contains(&token.to_lowercase()))
}
