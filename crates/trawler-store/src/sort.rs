//! Sort preferences and the local comparator applied to the derived view.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use trawler_models::{SortKey, Torrent, TorrentListQuery};

/// Sort preferences for the torrent list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SortOptions {
    /// Whether the client re-sorts locally instead of trusting server order.
    pub custom_enabled: bool,
    /// Key used by the local comparator (or requested from the server when
    /// custom sort is disabled).
    pub key: SortKey,
    /// Reverse the final sequence after sorting.
    pub reverse: bool,
}

impl SortOptions {
    /// Build the refresh query these preferences imply: request default
    /// server ordering while custom sort is on (the client re-sorts), and
    /// the configured key while it is off (the server orders, no re-sort).
    #[must_use]
    pub const fn list_query(&self) -> TorrentListQuery {
        TorrentListQuery {
            sort: if self.custom_enabled {
                SortKey::Default
            } else {
                self.key
            },
            reverse: self.reverse,
        }
    }
}

/// Sort records in place when custom sort is enabled; otherwise the refresh
/// order is preserved untouched.
///
/// Ties fall back to add-timestamp ascending. The reverse flag reverses the
/// final sequence after sorting, which also inverts tie-break order.
pub fn sort_torrents(torrents: &mut [Torrent], options: &SortOptions) {
    if !options.custom_enabled {
        return;
    }
    torrents.sort_by(|a, b| compare(a, b, options.key));
    if options.reverse {
        torrents.reverse();
    }
}

fn compare(a: &Torrent, b: &Torrent, key: SortKey) -> Ordering {
    let tie = a.added_on.cmp(&b.added_on);
    match key {
        // Stable sort: refresh order survives.
        SortKey::Default => Ordering::Equal,
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(tie),
        SortKey::Size => a.size.cmp(&b.size).then(tie),
        SortKey::Progress => a.progress.total_cmp(&b.progress).then(tie),
        SortKey::Ratio => a.ratio.total_cmp(&b.ratio).then(tie),
        SortKey::DlSpeed => a.dlspeed.cmp(&b.dlspeed).then(tie),
        SortKey::UpSpeed => a.upspeed.cmp(&b.upspeed).then(tie),
        SortKey::AddedOn => tie,
        // Non-positive priority means unprioritized and ranks after every
        // prioritized record; two unprioritized records compare by age.
        SortKey::Priority => match (a.priority > 0, b.priority > 0) {
            (true, true) => a.priority.cmp(&b.priority).then(tie),
            (false, false) => tie,
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        },
    }
}
