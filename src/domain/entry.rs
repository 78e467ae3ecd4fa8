//! Entry records and draft validation

use crate::domain::media::MediaFile;
use crate::domain::template::EntryTemplate;
use crate::error::{JournalError, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// GPS position captured with an entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A candidate entry, before the store assigns `id` and `synced`
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub title: String,
    pub note: String,
    pub field: Option<String>,
    pub template: EntryTemplate,
    pub account_id: String,
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    pub media: Vec<MediaFile>,
}

impl NewEntry {
    /// Create a draft stamped with the current time
    pub fn new(title: impl Into<String>, account_id: impl Into<String>, location: Location) -> Self {
        NewEntry {
            title: title.into(),
            note: String::new(),
            field: None,
            template: EntryTemplate::default(),
            account_id: account_id.into(),
            timestamp: Utc::now(),
            location,
            media: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_template(mut self, template: EntryTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_media(mut self, media: Vec<MediaFile>) -> Self {
        self.media = media;
        self
    }

    /// Check the invariants every persisted entry must hold
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(JournalError::InvalidEntry("Title is required".to_string()));
        }
        if self.account_id.trim().is_empty() {
            return Err(JournalError::NoAccountLinked);
        }
        if !self.location.is_valid() {
            return Err(JournalError::InvalidEntry(format!(
                "Location is out of range: {}, {}",
                self.location.latitude, self.location.longitude
            )));
        }
        Ok(())
    }

    /// Finalize into a stored entry. The timestamp keeps millisecond
    /// precision, matching what is written to storage.
    pub fn into_entry(self, id: String) -> Entry {
        Entry {
            id,
            title: self.title,
            note: self.note,
            field: self.field,
            template: self.template,
            account_id: self.account_id,
            timestamp: self.timestamp.trunc_subsecs(3),
            location: self.location,
            media: self.media,
            synced: false,
        }
    }
}

/// A stored field observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub template: EntryTemplate,
    pub account_id: String,
    #[serde(with = "millis_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaFile>,
    #[serde(default)]
    pub synced: bool,
}

impl Entry {
    /// Case-insensitive match against title, note and field name
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {}",
            self.title,
            self.note,
            self.field.as_deref().unwrap_or("")
        )
        .to_lowercase();
        haystack.contains(&needle)
    }
}

/// RFC 3339 in UTC with exactly three fractional digits, e.g.
/// `2024-06-10T08:30:00.000Z`. Any RFC 3339 instant is accepted on read.
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
