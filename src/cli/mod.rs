//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_account, format_entry_detail, format_entry_list, format_sweep_report,
    format_templates,
};
