//! Error types for fjour

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fjour
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Not a fjour directory: {0}")]
    NotJournalDirectory(PathBuf),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("No account linked")]
    NoAccountLinked,

    #[error("Invalid account payload: {0}")]
    InvalidAccount(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Stored entry list is unreadable: {0}")]
    CorruptEntries(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JournalError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            JournalError::NotJournalDirectory(_) => 2,
            JournalError::EntryNotFound(_) => 3,
            JournalError::NoAccountLinked => 4,
            JournalError::InvalidEntry(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            JournalError::NotJournalDirectory(path) => {
                format!(
                    "Not a fjour directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'fjour init' in this directory to create a new journal\n\
                    • Navigate to an existing fjour directory\n\
                    • Set FJOUR_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            JournalError::EntryNotFound(id) => {
                format!(
                    "Entry not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'fjour list' to see stored entries and their ids\n\
                    • Entry ids are the creation time in milliseconds (e.g., 1718000000000)",
                    id
                )
            }
            JournalError::NoAccountLinked => "No account linked. Please scan your QR code.\n\n\
                Suggestions:\n\
                • Bind this device: fjour bind '{\"accountId\":\"acct1\",\"affiliation\":\"melior\"}'\n\
                • Check the bound account: fjour account"
                .to_string(),
            JournalError::InvalidAccount(msg) => {
                format!(
                    "Invalid account payload: {}\n\n\
                    The QR code must contain a JSON object with an \"affiliation\" field.\n\
                    Example: {{\"accountId\":\"acct1\",\"affiliation\":\"agrisol\"}}",
                    msg
                )
            }
            JournalError::InvalidEntry(msg) => {
                format!(
                    "Invalid entry: {}\n\n\
                    Required: --title, --lat (-90..90) and --lon (-180..180)\n\
                    Example: fjour add --title 'North Field' --lat -25.7 --lon 28.2",
                    msg
                )
            }
            JournalError::CorruptEntries(msg) => {
                format!(
                    "Stored entry list is unreadable: {}\n\n\
                    Media cleanup was skipped so that no attachments are lost.\n\
                    Saving a new entry starts a fresh list and keeps the unreadable\n\
                    data under a '@entries.corrupt-<millis>' key.",
                    msg
                )
            }
            JournalError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: fjour config weather_city Stellenbosch",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using JournalError
pub type Result<T> = std::result::Result<T, JournalError>;
