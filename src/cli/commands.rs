//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fjour")]
#[command(about = "Field journal for agricultural observations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// City or town for the dashboard weather card
        #[arg(long)]
        city: Option<String>,
    },

    /// Bind this device to the account in a scanned QR code payload
    Bind {
        /// JSON payload, e.g. {"accountId":"acct1","affiliation":"melior"}
        payload: String,
    },

    /// Show the bound account
    Account,

    /// Remove the bound account
    Unbind,

    /// List entry templates and their fields
    Templates,

    /// Capture a new entry
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long)]
        note: Option<String>,

        /// Field name (field template only)
        #[arg(long)]
        field: Option<String>,

        /// Entry template (general, field); defaults to the last one used
        #[arg(short, long)]
        template: Option<String>,

        /// Attribute the entry to this account instead of the bound one
        #[arg(long)]
        account: Option<String>,

        /// Photo to attach (repeatable)
        #[arg(long = "photo", value_name = "PATH")]
        photos: Vec<PathBuf>,

        /// Video to attach (repeatable)
        #[arg(long = "video", value_name = "PATH")]
        videos: Vec<PathBuf>,

        /// Audio recording to attach (repeatable)
        #[arg(long = "audio", value_name = "PATH")]
        audio: Vec<PathBuf>,
    },

    /// List entries, newest first
    List {
        /// Only entries not yet synced
        #[arg(long, conflicts_with = "synced")]
        unsynced: bool,

        /// Only entries already synced
        #[arg(long)]
        synced: bool,

        /// Case-insensitive text search over title, note and field
        #[arg(short, long)]
        search: Option<String>,

        /// Oldest first
        #[arg(long)]
        oldest: bool,

        /// Show at most N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one entry in full
    Show { id: String },

    /// Delete an entry and its media files
    Delete { id: String },

    /// Mark entries as synced
    MarkSynced {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Remove media files that no entry references
    Sweep {
        /// Report orphaned files without deleting them
        #[arg(long)]
        dry_run: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
