//! Local entry store: entries as a JSON list under one key, media in a directory
//!
//! Every read-modify-write of the list runs under a single writer lock, so two
//! callers saving at the same time cannot overwrite each other's append. Within
//! a process the lock is a mutex; a store opened with a lock file also holds an
//! exclusive OS file lock on it, which serializes separate processes.
//! Reads take no lock; the file-backed key-value store replaces the list file
//! with a rename, so a reader sees either the old list or the new one.

use crate::domain::media::{self, MediaFile, MediaKind};
use crate::domain::{Entry, NewEntry};
use crate::error::{JournalError, Result};
use crate::infrastructure::kv::KeyValueStore;
use crate::infrastructure::media_dir::MediaDirectory;
use chrono::Utc;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Key holding the JSON array of entries
pub const ENTRIES_KEY: &str = "@entries";

/// Media files named within this window of "now" are never swept, so a
/// capture whose entry has not been saved yet keeps its attachments.
const SWEEP_GRACE_MILLIS: i64 = 60_000;

/// Outcome of an orphaned-media sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub scanned_files: usize,
    pub orphans: Vec<String>,
    pub dry_run: bool,
}

/// The stored list as read, remembering unparseable payloads
struct StoredList {
    entries: Vec<Entry>,
    corrupt: Option<String>,
}

pub struct EntryStore<S: KeyValueStore> {
    kv: S,
    media: MediaDirectory,
    writer: Mutex<()>,
    lock_file: Option<PathBuf>,
}

/// Held for the duration of one read-modify-write
struct WriterGuard<'a> {
    _local: MutexGuard<'a, ()>,
    /// Closing the handle releases the OS lock
    _file: Option<File>,
}

impl<S: KeyValueStore> EntryStore<S> {
    pub fn new(kv: S, media: MediaDirectory) -> Self {
        EntryStore {
            kv,
            media,
            writer: Mutex::new(()),
            lock_file: None,
        }
    }

    /// Also take an exclusive lock on `path` for every write, so stores in
    /// other processes sharing the same storage wait for each other.
    pub fn with_lock_file(mut self, path: PathBuf) -> Self {
        self.lock_file = Some(path);
        self
    }

    pub fn media_dir(&self) -> &MediaDirectory {
        &self.media
    }

    /// Copy a captured file into the media directory.
    ///
    /// The source is not moved or deleted. The entry list is untouched; the
    /// returned descriptor is meant to be attached to a `NewEntry`.
    pub fn save_media_file(&self, source: &Path, kind: MediaKind) -> Result<MediaFile> {
        let filename = media::generate_filename(kind, Utc::now().timestamp_millis());
        let destination = self.media.copy_in(source, &filename)?;
        let uri = std::path::absolute(&destination)?;

        tracing::debug!(filename = %filename, kind = %kind, "stored media file");

        Ok(MediaFile {
            uri: uri.to_string_lossy().into_owned(),
            kind,
            filename,
        })
    }

    /// Validate and append a new entry, assigning its id and `synced = false`
    pub fn save_entry(&self, draft: NewEntry) -> Result<Entry> {
        draft.validate()?;

        let _guard = self.lock_writer()?;
        let mut list = self.read_list()?;

        let id = next_id(&list.entries, Utc::now().timestamp_millis());
        let entry = draft.into_entry(id);
        list.entries.push(entry.clone());
        self.write_list(&list)?;

        tracing::debug!(id = %entry.id, media = entry.media.len(), "saved entry");
        Ok(entry)
    }

    /// All entries in insertion order. An unreadable list reads as empty.
    pub fn get_entries(&self) -> Result<Vec<Entry>> {
        Ok(self.read_list()?.entries)
    }

    pub fn get_unsynced_entries(&self) -> Result<Vec<Entry>> {
        let mut entries = self.get_entries()?;
        entries.retain(|e| !e.synced);
        Ok(entries)
    }

    pub fn find_entry(&self, id: &str) -> Result<Option<Entry>> {
        Ok(self.get_entries()?.into_iter().find(|e| e.id == id))
    }

    /// Set `synced = true` on every listed entry. Unknown ids are ignored;
    /// when nothing changes the list is not rewritten.
    pub fn mark_entries_as_synced<I, T>(&self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let ids: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        if ids.is_empty() {
            return Ok(());
        }

        let _guard = self.lock_writer()?;
        let mut list = self.read_list()?;

        let mut changed = 0usize;
        for entry in list.entries.iter_mut() {
            if !entry.synced && ids.contains(&entry.id) {
                entry.synced = true;
                changed += 1;
            }
        }

        if changed > 0 {
            self.write_list(&list)?;
            tracing::debug!(count = changed, "marked entries as synced");
        }

        Ok(())
    }

    /// Delete an entry and its media files. An unknown id is a no-op.
    ///
    /// Media are removed before the list is rewritten; a failure in between
    /// leaves the entry listed with missing attachments rather than orphans
    /// referenced by nothing.
    pub fn delete_entry(&self, id: &str) -> Result<()> {
        let _guard = self.lock_writer()?;
        let mut list = self.read_list()?;

        let Some(position) = list.entries.iter().position(|e| e.id == id) else {
            return Ok(());
        };

        for media in &list.entries[position].media {
            self.media.remove(Path::new(&media.uri))?;
        }

        let removed = list.entries.remove(position);
        self.write_list(&list)?;

        tracing::debug!(id = %removed.id, media = removed.media.len(), "deleted entry");
        Ok(())
    }

    /// Find, and unless `dry_run` delete, media files no entry references.
    ///
    /// Only files with store-generated names are considered. Refuses to run
    /// when the list cannot be parsed, since every file would look orphaned.
    pub fn sweep_orphaned_media(&self, dry_run: bool) -> Result<SweepReport> {
        let _guard = self.lock_writer()?;
        let list = self.read_list()?;
        if list.corrupt.is_some() {
            return Err(JournalError::CorruptEntries(format!(
                "key '{}' does not hold a JSON list of entries",
                ENTRIES_KEY
            )));
        }

        let referenced: HashSet<String> = list
            .entries
            .iter()
            .flat_map(|e| e.media.iter())
            .flat_map(|m| {
                let uri_name = Path::new(&m.uri)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string);
                std::iter::once(m.filename.clone()).chain(uri_name)
            })
            .collect();

        let now = Utc::now().timestamp_millis();
        let files = self.media.list_files();
        let orphans: Vec<String> = files
            .iter()
            .filter(|name| media::is_managed_filename(name))
            .filter(|name| !referenced.contains(*name))
            .filter(|name| !within_grace(name, now))
            .cloned()
            .collect();

        if !dry_run {
            for name in &orphans {
                self.media.remove(&self.media.path().join(name))?;
                tracing::info!(filename = %name, "removed orphaned media file");
            }
        }

        Ok(SweepReport {
            scanned_files: files.len(),
            orphans,
            dry_run,
        })
    }

    fn lock_writer(&self) -> Result<WriterGuard<'_>> {
        let local = self.writer.lock().unwrap_or_else(|e| e.into_inner());

        let file = match &self.lock_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .truncate(false)
                    .write(true)
                    .open(path)?;
                file.lock()?;
                Some(file)
            }
            None => None,
        };

        Ok(WriterGuard {
            _local: local,
            _file: file,
        })
    }

    fn read_list(&self) -> Result<StoredList> {
        let Some(raw) = self.kv.get(ENTRIES_KEY)? else {
            return Ok(StoredList {
                entries: Vec::new(),
                corrupt: None,
            });
        };

        match serde_json::from_str::<Vec<Entry>>(&raw) {
            Ok(entries) => Ok(StoredList {
                entries,
                corrupt: None,
            }),
            Err(e) => {
                tracing::warn!(key = ENTRIES_KEY, error = %e, "stored entry list is unreadable, treating as empty");
                Ok(StoredList {
                    entries: Vec::new(),
                    corrupt: Some(raw),
                })
            }
        }
    }

    fn write_list(&self, list: &StoredList) -> Result<()> {
        if let Some(raw) = &list.corrupt {
            let backup_key = format!("{}.corrupt-{}", ENTRIES_KEY, Utc::now().timestamp_millis());
            self.kv.set(&backup_key, raw)?;
            tracing::warn!(backup = %backup_key, "preserved unreadable entry list before overwriting");
        }

        let json = serde_json::to_string(&list.entries)?;
        self.kv.set(ENTRIES_KEY, &json)
    }
}

/// Creation millis as the id, bumped past the largest numeric id already
/// stored so two saves in the same millisecond never share an id. When the
/// largest stored id cannot be bumped, the first free id from now is used.
fn next_id(entries: &[Entry], now_millis: i64) -> String {
    let taken: HashSet<i64> = entries
        .iter()
        .filter_map(|e| e.id.parse::<i64>().ok())
        .collect();

    let mut candidate = match taken.iter().copied().max() {
        Some(max) if max >= now_millis => max.checked_add(1).unwrap_or(now_millis),
        _ => now_millis,
    };
    while taken.contains(&candidate) {
        candidate = candidate.wrapping_add(1);
    }
    candidate.to_string()
}

fn within_grace(filename: &str, now_millis: i64) -> bool {
    filename
        .split('-')
        .next()
        .and_then(|millis| millis.parse::<i64>().ok())
        .is_some_and(|created| now_millis - created < SWEEP_GRACE_MILLIS)
}
