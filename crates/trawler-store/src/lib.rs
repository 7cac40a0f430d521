#![forbid(unsafe_code)]
//! Torrent list state store for the Trawler dashboard.
//!
//! Holds the in-memory record list mirrored from the daemon, evaluates the
//! user's filters, applies the configured sort, and forwards actions to the
//! remote client. A refresh collaborator replaces the record list on its own
//! cadence; UI components read the derived view and write to the filter and
//! sort controls.

pub mod filters;
pub mod settings;
pub mod sort;
mod store;

pub use filters::Filters;
pub use settings::{
    FILTERS_KEY, JsonFileSettings, MemorySettings, SORT_KEY, SettingsStore, load_filters,
    load_sort_options, persist_filters, persist_sort_options,
};
pub use sort::SortOptions;
pub use store::{TorrentStore, apply_view};
