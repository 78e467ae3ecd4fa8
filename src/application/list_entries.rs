//! List entries use case: history search, sync filter and ordering

use crate::domain::Entry;
use crate::error::Result;
use crate::infrastructure::{EntryStore, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncFilter {
    Synced,
    Unsynced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    pub search: Option<String>,
    pub sync: Option<SyncFilter>,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

/// List entries matching the query.
/// Entries with equal timestamps keep their stored order.
pub fn list_entries<S: KeyValueStore>(store: &EntryStore<S>, query: &EntryQuery) -> Result<Vec<Entry>> {
    let mut entries = match query.sync {
        Some(SyncFilter::Unsynced) => store.get_unsynced_entries()?,
        Some(SyncFilter::Synced) => {
            let mut all = store.get_entries()?;
            all.retain(|e| e.synced);
            all
        }
        None => store.get_entries()?,
    };

    if let Some(search) = query.search.as_deref() {
        entries.retain(|e| e.matches_search(search));
    }

    match query.order {
        SortOrder::Newest => entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Oldest => entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }

    if let Some(n) = query.limit {
        entries.truncate(n);
    }

    Ok(entries)
}
