//! The store itself: records, derived view, and action forwarding.

use trawler_client::{ClientResult, TorrentApi};
use trawler_models::{
    AddTorrentRequest, MoveTarget, QueueShift, Torrent, TorrentListQuery,
};

use crate::filters::{Filters, matches_query};
use crate::settings::{
    SettingsStore, load_filters, load_sort_options, persist_filters, persist_sort_options,
};
use crate::sort::{SortOptions, sort_torrents};

/// Compute the filtered, searched, and sorted view of a record list.
///
/// Pure and side-effect-free; the store memoizes its result.
#[must_use]
pub fn apply_view(torrents: &[Torrent], filters: &Filters, sort: &SortOptions) -> Vec<Torrent> {
    let mut view: Vec<Torrent> = torrents
        .iter()
        .filter(|torrent| filters.passes(torrent))
        .filter(|torrent| {
            !filters.search_active() || matches_query(&torrent.name, &filters.text)
        })
        .cloned()
        .collect();
    sort_torrents(&mut view, sort);
    view
}

/// In-memory torrent list state plus the client actions forward to.
///
/// All mutations are synchronous; the derived view is recomputed lazily on
/// first read after a change. Action methods suspend until the client
/// resolves and surface its error untouched; the record list is only ever
/// updated by the refresh collaborator.
#[derive(Debug)]
pub struct TorrentStore<C> {
    client: C,
    torrents: Vec<Torrent>,
    filters: Filters,
    sort: SortOptions,
    view: Option<Vec<Torrent>>,
}

impl<C> TorrentStore<C> {
    /// Create an empty store around the given client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            torrents: Vec::new(),
            filters: Filters::default(),
            sort: SortOptions::default(),
            view: None,
        }
    }

    /// The full record list, in refresh order.
    #[must_use]
    pub fn torrents(&self) -> &[Torrent] {
        &self.torrents
    }

    /// Replace the record list wholesale (the refresh inbound path).
    pub fn set_torrents(&mut self, torrents: Vec<Torrent>) {
        self.torrents = torrents;
        self.view = None;
    }

    /// Current filter state.
    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Replace the filter state.
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        self.view = None;
    }

    /// Mutate the filter state in place.
    pub fn update_filters(&mut self, update: impl FnOnce(&mut Filters)) {
        update(&mut self.filters);
        self.view = None;
    }

    /// Current sort preferences.
    #[must_use]
    pub const fn sort_options(&self) -> SortOptions {
        self.sort
    }

    /// Replace the sort preferences.
    pub fn set_sort_options(&mut self, sort: SortOptions) {
        self.sort = sort;
        self.view = None;
    }

    /// Mutate the sort preferences in place.
    pub fn update_sort_options(&mut self, update: impl FnOnce(&mut SortOptions)) {
        update(&mut self.sort);
        self.view = None;
    }

    /// The derived filtered/sorted view, recomputed at most once per change.
    pub fn filtered(&mut self) -> &[Torrent] {
        if self.view.is_none() {
            tracing::debug!(records = self.torrents.len(), "recomputing filtered view");
            self.view = Some(apply_view(&self.torrents, &self.filters, &self.sort));
        }
        self.view.as_deref().unwrap_or_default()
    }

    /// Look up a record by hash in the full list.
    #[must_use]
    pub fn torrent_by_hash(&self, hash: &str) -> Option<&Torrent> {
        self.torrents.iter().find(|torrent| torrent.hash == hash)
    }

    /// Position of a record within the derived view.
    pub fn torrent_index_by_hash(&mut self, hash: &str) -> Option<usize> {
        self.filtered()
            .iter()
            .position(|torrent| torrent.hash == hash)
    }

    /// The refresh query implied by the current sort preferences.
    #[must_use]
    pub const fn list_query(&self) -> TorrentListQuery {
        self.sort.list_query()
    }

    /// Restore filters and sort to defaults and empty the record list.
    pub fn reset(&mut self) {
        self.torrents = Vec::new();
        self.filters = Filters::default();
        self.sort = SortOptions::default();
        self.view = None;
    }

    /// Load persisted filter/sort preferences. The record list is excluded
    /// from persistence and stays untouched.
    pub fn hydrate(&mut self, settings: &dyn SettingsStore) {
        self.filters = load_filters(settings);
        self.sort = load_sort_options(settings);
        self.view = None;
    }

    /// Persist the current filter/sort preferences.
    pub fn persist_preferences(&self, settings: &dyn SettingsStore) {
        persist_filters(settings, &self.filters);
        persist_sort_options(settings, &self.sort);
    }

    /// Borrow the underlying client.
    pub const fn client(&self) -> &C {
        &self.client
    }
}

/// Action wrappers. Each forwards its arguments verbatim to the remote
/// client, awaits completion, and surfaces whatever failure the client
/// raises. No local state changes here.
impl<C: TorrentApi> TorrentStore<C> {
    /// Fetch the record list using the current sort preferences. The caller
    /// (the refresh collaborator) feeds the result back via
    /// [`TorrentStore::set_torrents`].
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn fetch_torrents(&self) -> ClientResult<Vec<Torrent>> {
        self.client.fetch_torrents(self.list_query()).await
    }

    /// Replace the category on each torrent.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn set_torrent_category(&self, hashes: &[String], category: &str) -> ClientResult<()> {
        self.client.set_category(hashes, category).await
    }

    /// Add tags to each torrent.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn add_torrent_tags(&self, hashes: &[String], tags: &[String]) -> ClientResult<()> {
        self.client.add_tags(hashes, tags).await
    }

    /// Remove the given tags, or every tag when `tags` is `None`.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn remove_torrent_tags(
        &self,
        hashes: &[String],
        tags: Option<&[String]>,
    ) -> ClientResult<()> {
        self.client.remove_tags(hashes, tags).await
    }

    /// Delete torrents, optionally removing payload files.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn delete_torrents(&self, hashes: &[String], delete_files: bool) -> ClientResult<()> {
        self.client.delete_torrents(hashes, delete_files).await
    }

    /// Relocate the download or save path for each torrent.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn move_torrents(
        &self,
        target: MoveTarget,
        hashes: &[String],
        path: &str,
    ) -> ClientResult<()> {
        self.client.set_location(target, hashes, path).await
    }

    /// Submit new torrents from files and/or URLs.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn add_torrents(&self, request: &AddTorrentRequest) -> ClientResult<()> {
        self.client.add_torrents(request).await
    }

    /// Rename a single torrent.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn rename_torrent(&self, hash: &str, name: &str) -> ClientResult<()> {
        self.client.rename_torrent(hash, name).await
    }

    /// Resume transfers under queue limits.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn resume_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.client.resume_torrents(hashes).await
    }

    /// Resume transfers bypassing queue limits.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn force_resume_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.client.force_resume_torrents(hashes).await
    }

    /// Pause transfers.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn pause_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.client.pause_torrents(hashes).await
    }

    /// Re-verify piece data.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn recheck_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.client.recheck_torrents(hashes).await
    }

    /// Shift queue position in the given direction.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn set_torrent_priority(
        &self,
        hashes: &[String],
        shift: QueueShift,
    ) -> ClientResult<()> {
        self.client.shift_queue(hashes, shift).await
    }

    /// Download the metainfo for a single torrent as opaque bytes.
    ///
    /// # Errors
    /// Propagates the client failure untouched.
    pub async fn export_torrent(&self, hash: &str) -> ClientResult<Vec<u8>> {
        self.client.export_torrent(hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use trawler_models::{SortKey, TorrentState};

    fn torrent(hash: &str, name: &str, priority: i64, added_on: i64) -> Torrent {
        Torrent {
            hash: hash.to_string(),
            name: name.to_string(),
            state: TorrentState::Downloading,
            category: String::new(),
            tags: Vec::new(),
            tracker: String::new(),
            priority,
            added_on: Utc.timestamp_opt(added_on, 0).unwrap(),
            size: 0,
            progress: 0.0,
            ratio: 0.0,
            dlspeed: 0,
            upspeed: 0,
            save_path: String::new(),
            download_path: String::new(),
        }
    }

    #[test]
    fn view_pipeline_filters_searches_then_sorts() {
        let torrents = vec![
            torrent("h1", "Ubuntu Desktop", 0, 100),
            torrent("h2", "Ubuntu Server", 5, 50),
            torrent("h3", "Fedora Workstation", 3, 25),
        ];
        let filters = Filters {
            text: "ubuntu".to_string(),
            ..Filters::default()
        };
        let sort = SortOptions {
            custom_enabled: true,
            key: SortKey::Priority,
            reverse: false,
        };

        let view = apply_view(&torrents, &filters, &sort);
        let hashes: Vec<&str> = view.iter().map(|t| t.hash.as_str()).collect();
        // Fedora is searched out; h2 outranks the unprioritized h1.
        assert_eq!(hashes, vec!["h2", "h1"]);
    }

    #[test]
    fn inactive_text_filter_does_not_narrow() {
        let torrents = vec![torrent("h1", "alpha", 0, 1)];
        let filters = Filters {
            text_active: false,
            text: "zzz".to_string(),
            ..Filters::default()
        };
        let view = apply_view(&torrents, &filters, &SortOptions::default());
        assert_eq!(view.len(), 1);
    }
}
