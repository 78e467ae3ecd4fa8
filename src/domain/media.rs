//! Media attachments and managed file naming

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Kind of captured media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
}

impl MediaKind {
    /// File extension used for stored blobs of this kind
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => "jpg",
            MediaKind::Video => "mp4",
            MediaKind::Audio => "m4a",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        };
        f.pad(name)
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "photo" => Ok(MediaKind::Photo),
            "video" => Ok(MediaKind::Video),
            "audio" => Ok(MediaKind::Audio),
            _ => Err(format!(
                "Invalid media type: '{}'. Must be one of: photo, video, audio",
                s
            )),
        }
    }
}

/// A media blob owned by an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Absolute path of the stored blob
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub filename: String,
}

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Generate a managed filename: `<epoch-millis>-<base36 suffix>.<ext>`
pub fn generate_filename(kind: MediaKind, epoch_millis: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}.{}", epoch_millis, suffix, kind.extension())
}

fn managed_filename_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\d+-[0-9a-z]+\.(jpg|mp4|m4a)$").unwrap())
}

/// Whether a filename looks like one the store generated
pub fn is_managed_filename(name: &str) -> bool {
    managed_filename_regex().is_match(name)
}
