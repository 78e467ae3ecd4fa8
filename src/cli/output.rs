//! Output formatting utilities

use crate::domain::{Account, Entry, EntryTemplate};
use crate::infrastructure::SweepReport;

fn sync_label(entry: &Entry) -> &'static str {
    if entry.synced {
        "synced"
    } else {
        "pending"
    }
}

/// Format a list of entries for display
pub fn format_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {}  {:<7}  {}",
            entry.id,
            entry.timestamp.format("%d-%m-%Y %H:%M"),
            sync_label(entry),
            entry.title
        ));
        if !entry.media.is_empty() {
            output.push_str(&format!("  [{} media]", entry.media.len()));
        }
        output.push('\n');
    }
    output
}

/// Format a single entry with all of its fields
pub fn format_entry_detail(entry: &Entry) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", entry.title));
    output.push_str(&format!("id:        {}\n", entry.id));
    output.push_str(&format!("template:  {}\n", entry.template));
    output.push_str(&format!("account:   {}\n", entry.account_id));
    output.push_str(&format!("time:      {}\n", entry.timestamp.to_rfc3339()));
    output.push_str(&format!(
        "location:  {:.6}, {:.6}\n",
        entry.location.latitude, entry.location.longitude
    ));
    if let Some(field) = &entry.field {
        output.push_str(&format!("field:     {}\n", field));
    }
    output.push_str(&format!("status:    {}\n", sync_label(entry)));
    if !entry.note.is_empty() {
        output.push_str(&format!("\n{}\n", entry.note));
    }
    if !entry.media.is_empty() {
        output.push_str("\nmedia:\n");
        for media in &entry.media {
            output.push_str(&format!("  {:<5}  {}\n", media.kind, media.uri));
        }
    }
    output
}

pub fn format_account(account: &Account) -> String {
    let mut output = String::new();
    output.push_str(&format!("name:        {}\n", account.label()));
    output.push_str(&format!(
        "account id:  {}\n",
        account.account_id.as_deref().unwrap_or("(none)")
    ));
    if let Some(email) = &account.email {
        output.push_str(&format!("email:       {}\n", email));
    }
    output.push_str(&format!(
        "affiliation: {} (theme: {})\n",
        account.affiliation,
        account.affiliation()
    ));
    output
}

pub fn format_templates(last_used: Option<EntryTemplate>) -> String {
    let mut output = String::new();
    for template in EntryTemplate::ALL {
        let marker = if Some(template) == last_used { "*" } else { " " };
        output.push_str(&format!(
            "{} {:<8} {}\n    {}\n    fields: {}\n",
            marker,
            template.key(),
            template.display_name(),
            template.description(),
            template
                .fields()
                .iter()
                .map(|f| f.label)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    output
}

pub fn format_sweep_report(report: &SweepReport) -> String {
    if report.orphans.is_empty() {
        return format!(
            "No orphaned media found ({} files scanned)",
            report.scanned_files
        );
    }

    let verb = if report.dry_run {
        "Would remove"
    } else {
        "Removed"
    };
    let mut output = format!(
        "{} {} orphaned media file(s) ({} files scanned):\n",
        verb,
        report.orphans.len(),
        report.scanned_files
    );
    for name in &report.orphans {
        output.push_str(&format!("  {}\n", name));
    }
    output
}
