//! Application layer - Use cases and orchestration

pub mod bind_account;
pub mod capture_entry;
pub mod init;
pub mod list_entries;
pub mod manage_config;

pub use bind_account::AccountService;
pub use capture_entry::{capture_entry, CaptureRequest};
pub use list_entries::{list_entries, EntryQuery, SortOrder, SyncFilter};
pub use manage_config::ConfigService;
