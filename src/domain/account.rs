//! Bound account and affiliation

use crate::error::{JournalError, Result};
use serde_json::{Map, Value};
use std::fmt;

/// Organization an account belongs to; selects branding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affiliation {
    Agrisol,
    Melior,
    #[default]
    Neutral,
}

impl Affiliation {
    /// Resolve an affiliation tag; unknown or missing tags fall back to neutral
    pub fn resolve(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("agrisol") => Affiliation::Agrisol,
            Some("melior") => Affiliation::Melior,
            _ => Affiliation::Neutral,
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Affiliation::Agrisol => "agrisol",
            Affiliation::Melior => "melior",
            Affiliation::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// Account details carried by the QR code
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub affiliation: String,
    /// Every key of the payload, as scanned
    pub payload: Map<String, Value>,
}

impl Account {
    /// Parse a scanned QR payload.
    ///
    /// The payload must be a JSON object with a non-empty string `affiliation`.
    /// The account id comes from `accountId`, or `id` when that is absent or
    /// blank; either may be a string or a number.
    pub fn from_qr_payload(payload: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(payload.trim())
            .map_err(|e| JournalError::InvalidAccount(format!("not valid JSON ({})", e)))?;

        let Value::Object(map) = value else {
            return Err(JournalError::InvalidAccount(
                "expected a JSON object".to_string(),
            ));
        };

        let affiliation = match map.get("affiliation") {
            Some(Value::String(tag)) if !tag.trim().is_empty() => tag.clone(),
            Some(Value::String(_)) => {
                return Err(JournalError::InvalidAccount(
                    "affiliation is empty".to_string(),
                ))
            }
            Some(_) => {
                return Err(JournalError::InvalidAccount(
                    "affiliation must be a string".to_string(),
                ))
            }
            None => {
                return Err(JournalError::InvalidAccount(
                    "missing affiliation".to_string(),
                ))
            }
        };

        let account_id = id_value(map.get("accountId")).or_else(|| id_value(map.get("id")));

        Ok(Account {
            account_id,
            name: text_value(map.get("name")),
            display_name: text_value(map.get("displayName")),
            email: text_value(map.get("email")),
            affiliation,
            payload: map,
        })
    }

    pub fn affiliation(&self) -> Affiliation {
        Affiliation::resolve(Some(&self.affiliation))
    }

    /// Name to greet the user with
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("User")
    }
}

fn id_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_value(value: Option<&Value>) -> Option<String> {
    value?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_affiliation_case_insensitive() {
        assert_eq!(Affiliation::resolve(Some("AgriSol")), Affiliation::Agrisol);
        assert_eq!(Affiliation::resolve(Some("melior")), Affiliation::Melior);
        assert_eq!(Affiliation::resolve(Some("acme")), Affiliation::Neutral);
        assert_eq!(Affiliation::resolve(None), Affiliation::Neutral);
    }

    #[test]
    fn test_parse_payload_with_account_id() {
        let account = Account::from_qr_payload(
            r#"{"accountId":"acct1","affiliation":"Melior","displayName":"Thandi"}"#,
        )
        .unwrap();
        assert_eq!(account.account_id.as_deref(), Some("acct1"));
        assert_eq!(account.affiliation(), Affiliation::Melior);
        assert_eq!(account.label(), "Thandi");
    }

    #[test]
    fn test_parse_payload_id_alias_and_extra_keys() {
        let account =
            Account::from_qr_payload(r#"{"id":"u-9","affiliation":"agrisol","farm":"Rietvlei"}"#)
                .unwrap();
        assert_eq!(account.account_id.as_deref(), Some("u-9"));
        assert_eq!(account.payload["farm"], "Rietvlei");
        assert_eq!(account.label(), "User");
    }

    #[test]
    fn test_parse_payload_without_affiliation_fails() {
        let result = Account::from_qr_payload(r#"{"accountId":"acct1"}"#);
        assert!(matches!(result, Err(JournalError::InvalidAccount(_))));

        let result = Account::from_qr_payload(r#"{"accountId":"acct1","affiliation":"  "}"#);
        assert!(matches!(result, Err(JournalError::InvalidAccount(_))));
    }

    #[test]
    fn test_parse_payload_not_json() {
        assert!(matches!(
            Account::from_qr_payload("https://example.org/welcome"),
            Err(JournalError::InvalidAccount(_))
        ));
        assert!(matches!(
            Account::from_qr_payload("[1,2]"),
            Err(JournalError::InvalidAccount(_))
        ));
    }

    #[test]
    fn test_blank_account_id_treated_as_missing() {
        let account =
            Account::from_qr_payload(r#"{"accountId":"","affiliation":"melior"}"#).unwrap();
        assert_eq!(account.account_id, None);
    }

    #[test]
    fn test_parse_payload_with_both_id_keys_prefers_account_id() {
        let account = Account::from_qr_payload(
            r#"{"accountId":"acct1","id":"row-7","affiliation":"melior"}"#,
        )
        .unwrap();
        assert_eq!(account.account_id.as_deref(), Some("acct1"));
        assert_eq!(account.payload["id"], "row-7");
    }

    #[test]
    fn test_parse_payload_numeric_account_id() {
        let account =
            Account::from_qr_payload(r#"{"accountId":42,"affiliation":"agrisol"}"#).unwrap();
        assert_eq!(account.account_id.as_deref(), Some("42"));

        let account = Account::from_qr_payload(r#"{"id":7,"affiliation":"agrisol"}"#).unwrap();
        assert_eq!(account.account_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_blank_account_id_falls_back_to_id() {
        let account =
            Account::from_qr_payload(r#"{"accountId":" ","id":"u-1","affiliation":"melior"}"#)
                .unwrap();
        assert_eq!(account.account_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn test_non_string_affiliation_fails() {
        assert!(matches!(
            Account::from_qr_payload(r#"{"accountId":"a","affiliation":3}"#),
            Err(JournalError::InvalidAccount(_))
        ));
    }
}
