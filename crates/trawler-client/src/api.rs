//! The seam between the store and whatever executes its commands.

use async_trait::async_trait;
use trawler_models::{
    AddTorrentRequest, MoveTarget, QueueShift, Torrent, TorrentListQuery,
};

use crate::error::ClientResult;

/// Outbound operations the dashboard can ask the daemon to perform.
///
/// One method per remote operation; arguments pass through verbatim and
/// errors surface untouched. Batch operations take a slice of info-hashes.
#[async_trait]
pub trait TorrentApi: Send + Sync {
    /// List torrents using the given server-side ordering.
    async fn fetch_torrents(&self, query: TorrentListQuery) -> ClientResult<Vec<Torrent>>;

    /// Replace the category on each torrent.
    async fn set_category(&self, hashes: &[String], category: &str) -> ClientResult<()>;

    /// Add tags to each torrent.
    async fn add_tags(&self, hashes: &[String], tags: &[String]) -> ClientResult<()>;

    /// Remove the given tags, or every tag when `tags` is `None`.
    async fn remove_tags(&self, hashes: &[String], tags: Option<&[String]>) -> ClientResult<()>;

    /// Delete torrents, optionally removing payload files.
    async fn delete_torrents(&self, hashes: &[String], delete_files: bool) -> ClientResult<()>;

    /// Relocate the download or save path.
    async fn set_location(
        &self,
        target: MoveTarget,
        hashes: &[String],
        path: &str,
    ) -> ClientResult<()>;

    /// Submit new torrents from files and/or URLs.
    async fn add_torrents(&self, request: &AddTorrentRequest) -> ClientResult<()>;

    /// Rename a single torrent.
    async fn rename_torrent(&self, hash: &str, name: &str) -> ClientResult<()>;

    /// Resume transfers under queue limits.
    async fn resume_torrents(&self, hashes: &[String]) -> ClientResult<()>;

    /// Resume transfers bypassing queue limits.
    async fn force_resume_torrents(&self, hashes: &[String]) -> ClientResult<()>;

    /// Pause transfers.
    async fn pause_torrents(&self, hashes: &[String]) -> ClientResult<()>;

    /// Re-verify piece data.
    async fn recheck_torrents(&self, hashes: &[String]) -> ClientResult<()>;

    /// Shift queue position in the given direction.
    async fn shift_queue(&self, hashes: &[String], shift: QueueShift) -> ClientResult<()>;

    /// Download the metainfo for a single torrent as opaque bytes.
    async fn export_torrent(&self, hash: &str) -> ClientResult<Vec<u8>>;
}
