//! Roster file handling. A roster is a JSON array of objects, one per
//! attendee, as produced by whatever exported the sign-in spreadsheet.
//! Header spellings vary between exports, so field lookup is
//! case-insensitive and tolerant of the common variants.

use serde_json::Value;
use storage::dto::RosterRow;

use crate::error::{ImporterError, Result};

const NAME_KEYS: &[&str] = &["name"];
const ID_KEYS: &[&str] = &["computing id", "computingid", "computing_id"];

/// Parses roster JSON into rows. Objects missing both fields entirely are
/// kept as empty rows so the engine's per-row validation counts them as
/// skipped rather than this parser silently shrinking the batch.
pub fn parse_roster(json: &str) -> Result<Vec<RosterRow>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(ImporterError::Validation(
            "roster must be a JSON array of objects".to_string(),
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in &items {
        let Value::Object(map) = item else {
            return Err(ImporterError::Validation(
                "roster entries must be objects".to_string(),
            ));
        };
        rows.push(RosterRow {
            name: field(map, NAME_KEYS),
            computing_id: field(map, ID_KEYS),
        });
    }

    Ok(rows)
}

fn field(map: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    for (key, value) in map {
        let folded = key.to_lowercase();
        if keys.contains(&folded.as_str()) {
            return match value {
                Value::String(s) => s.trim().to_string(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_spreadsheet_header_spellings() {
        let json = r#"[
            {"Name": "Morgan Lee", "Computing ID": "ABC1DE"},
            {"name": "Sam Ortiz", "computingId": "so4xy"},
            {"NAME": "Riley Chen", "ComputingId": "rc2ab"},
            {"name": "Jo Walsh", "computing_id": "jw1cd"}
        ]"#;

        let rows = parse_roster(json).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].name, "Morgan Lee");
        assert_eq!(rows[0].computing_id, "ABC1DE");
        assert_eq!(rows[1].computing_id, "so4xy");
        assert_eq!(rows[2].name, "Riley Chen");
        assert_eq!(rows[3].computing_id, "jw1cd");
    }

    #[test]
    fn missing_fields_become_empty_rows() {
        let rows = parse_roster(r#"[{"Name": "No Id"}, {"Computing ID": "xx1yy"}]"#).unwrap();
        assert_eq!(rows[0].computing_id, "");
        assert_eq!(rows[1].name, "");
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_roster(r#"{"Name": "x"}"#).is_err());
        assert!(parse_roster(r#"[1, 2]"#).is_err());
    }
}
