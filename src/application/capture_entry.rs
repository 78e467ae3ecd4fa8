//! Capture entry use case: copy media in, then save the entry

use crate::application::bind_account::AccountService;
use crate::domain::{Entry, EntryTemplate, Location, MediaFile, MediaKind, NewEntry};
use crate::error::{JournalError, Result};
use crate::infrastructure::{EntryStore, KeyValueStore};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const LAST_TEMPLATE_KEY: &str = "lastTemplate";

/// Everything the capture form collects
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub title: String,
    pub note: Option<String>,
    pub field: Option<String>,
    /// Falls back to the last used template, then to `general`
    pub template: Option<EntryTemplate>,
    /// Falls back to the bound account
    pub account_id: Option<String>,
    pub location: Location,
    pub media: Vec<(PathBuf, MediaKind)>,
}

impl CaptureRequest {
    pub fn new(title: impl Into<String>, location: Location) -> Self {
        CaptureRequest {
            title: title.into(),
            note: None,
            field: None,
            template: None,
            account_id: None,
            location,
            media: Vec::new(),
        }
    }
}

/// Template the capture form opens with
pub fn last_template<P: KeyValueStore>(settings: &P) -> Result<Option<EntryTemplate>> {
    Ok(settings
        .get(LAST_TEMPLATE_KEY)?
        .and_then(|key| EntryTemplate::from_str(&key).ok()))
}

pub fn remember_template<P: KeyValueStore>(settings: &P, template: EntryTemplate) -> Result<()> {
    settings.set(LAST_TEMPLATE_KEY, template.key())
}

/// Save a captured entry.
///
/// The draft is validated before any media is copied. If copying or saving
/// fails part-way, media already copied for this capture are removed again.
/// Once the entry is saved, failing to remember the template is only logged.
pub fn capture_entry<S, P>(
    store: &EntryStore<S>,
    settings: &P,
    request: CaptureRequest,
) -> Result<Entry>
where
    S: KeyValueStore,
    P: KeyValueStore,
{
    let account_id = match request.account_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => AccountService::new(settings)
            .account_id()?
            .ok_or(JournalError::NoAccountLinked)?,
    };

    let template = match request.template {
        Some(template) => template,
        None => last_template(settings)?.unwrap_or_default(),
    };

    let mut draft = NewEntry::new(request.title, account_id, request.location)
        .with_template(template)
        .with_note(request.note.unwrap_or_default());
    if let Some(field) = request
        .field
        .filter(|f| !f.trim().is_empty() && template.has_field("field"))
    {
        draft = draft.with_field(field);
    }
    draft.validate()?;

    let mut media: Vec<MediaFile> = Vec::with_capacity(request.media.len());
    for (source, kind) in &request.media {
        match store.save_media_file(source, *kind) {
            Ok(file) => media.push(file),
            Err(e) => {
                discard_media(store, &media);
                return Err(e);
            }
        }
    }

    let entry = match store.save_entry(draft.with_media(media.clone())) {
        Ok(entry) => entry,
        Err(e) => {
            discard_media(store, &media);
            return Err(e);
        }
    };

    if let Err(e) = remember_template(settings, template) {
        tracing::warn!(template = template.key(), error = %e, "could not remember last template");
    }
    Ok(entry)
}

fn discard_media<S: KeyValueStore>(store: &EntryStore<S>, media: &[MediaFile]) {
    for file in media {
        if let Err(e) = store.media_dir().remove(Path::new(&file.uri)) {
            tracing::warn!(filename = %file.filename, error = %e, "could not remove media from failed capture");
        }
    }
}
