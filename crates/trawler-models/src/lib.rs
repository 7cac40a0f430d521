#![forbid(unsafe_code)]
//! Shared data model for the Trawler dashboard.
//!
//! These types are re-used by the HTTP client for request/response encoding
//! and by the store for filtering and sorting, so the contract between the
//! two stays a single source of truth.

mod add;
mod command;
mod query;
mod torrent;

pub use add::{AddTorrentOptions, AddTorrentRequest, TorrentFilePayload};
pub use command::{CommandEnvelope, MoveTarget, QueueShift, TorrentCommand};
pub use query::{SortKey, TorrentListQuery};
pub use torrent::{ProblemDetails, Torrent, TorrentState};
