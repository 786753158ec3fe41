pub mod confirm;
pub mod persistence;
pub mod search;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod views;

pub use confirm::{AssumeYes, Confirmation};
pub use persistence::{
    CollectionKey, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistenceAdapter, StorageError,
};
pub use search::SearchEngine;
pub use snapshot::{default_backup_file_name, parse_snapshot, validate_snapshot, ImportError, Snapshot};
pub use stats::CollectionStats;
pub use store::{Action, MovieState, MovieStore, RequestTag, UnknownFilter, ViewFilter};
pub use views::{recent_activity, watched_view, watchlist_view, UnknownSort, WatchedSort, WatchlistSort};
