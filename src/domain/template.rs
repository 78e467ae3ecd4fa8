//! Entry templates: which form fields are shown when capturing an entry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of input a template field takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
}

/// A single form field in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const GENERAL_FIELDS: &[TemplateField] = &[
    TemplateField {
        id: "title",
        label: "Title",
        kind: FieldKind::Text,
    },
    TemplateField {
        id: "note",
        label: "Note",
        kind: FieldKind::Multiline,
    },
];

const FIELD_FIELDS: &[TemplateField] = &[
    TemplateField {
        id: "title",
        label: "Title",
        kind: FieldKind::Text,
    },
    TemplateField {
        id: "field",
        label: "Field",
        kind: FieldKind::Text,
    },
    TemplateField {
        id: "note",
        label: "Note",
        kind: FieldKind::Multiline,
    },
];

/// Entry template; stored on the entry but not enforced afterward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryTemplate {
    #[default]
    General,
    Field,
}

impl EntryTemplate {
    pub const ALL: [EntryTemplate; 2] = [EntryTemplate::General, EntryTemplate::Field];

    pub fn key(&self) -> &'static str {
        match self {
            EntryTemplate::General => "general",
            EntryTemplate::Field => "field",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EntryTemplate::General => "General Note",
            EntryTemplate::Field => "Field Note",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EntryTemplate::General => {
                "A simple note for any observation or event. Includes title, note, and location."
            }
            EntryTemplate::Field => {
                "A note specific to a field, including field name, title, note, and location."
            }
        }
    }

    pub fn fields(&self) -> &'static [TemplateField] {
        match self {
            EntryTemplate::General => GENERAL_FIELDS,
            EntryTemplate::Field => FIELD_FIELDS,
        }
    }

    /// Whether this template shows the given field id
    pub fn has_field(&self, id: &str) -> bool {
        self.fields().iter().any(|f| f.id == id)
    }
}

impl fmt::Display for EntryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EntryTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(EntryTemplate::General),
            "field" => Ok(EntryTemplate::Field),
            _ => Err(format!(
                "Invalid template: '{}'. Must be one of: general, field",
                s
            )),
        }
    }
}
