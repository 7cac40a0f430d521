#![forbid(unsafe_code)]
//! Remote daemon API client for the Trawler dashboard.
//!
//! The store forwards user intent through the [`TorrentApi`] trait; the
//! [`HttpTorrentApi`] implementation speaks the daemon's JSON REST surface.
//! Failures are never retried here; they propagate to the caller, which
//! surfaces them as notifications.

mod api;
mod error;
mod http;

pub use api::TorrentApi;
pub use error::{ClientError, ClientResult};
pub use http::HttpTorrentApi;
