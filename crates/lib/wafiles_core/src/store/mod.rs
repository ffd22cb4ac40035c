//! Client-side state projections fed by the backend clients.

pub mod files;

pub use files::{FilesState, FilesStore, SyncStatus};
