//! Domain layer - Entry records, media and accounts

pub mod account;
pub mod entry;
pub mod media;
pub mod template;

pub use account::{Account, Affiliation};
pub use entry::{Entry, Location, NewEntry};
pub use media::{MediaFile, MediaKind};
pub use template::EntryTemplate;
