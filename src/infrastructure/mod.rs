//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod entry_store;
pub mod kv;
pub mod media_dir;
pub mod repository;

pub use config::Config;
pub use entry_store::{EntryStore, SweepReport, ENTRIES_KEY};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use media_dir::MediaDirectory;
pub use repository::{FileSystemRepository, JournalRepository};
