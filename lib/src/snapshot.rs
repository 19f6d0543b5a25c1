//! Decoding of persisted and exported bookmark collections.
//!
//! Two top-level shapes are accepted: the current object keyed by URL and the older
//! plain array of records. Entries are decoded one at a time so a single malformed
//! record is skipped instead of discarding the whole collection.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StoredShape {
    Keyed(serde_json::Map<String, Value>),
    Legacy(Vec<Value>),
}

/// Loosely-typed record; every field is optional so validation can report what is missing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredRecord {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub favicon: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: Option<Value>,
}

/// One decoded entry: where it came from and either the record or why it was rejected
#[derive(Debug)]
pub struct StoredEntry {
    /// Map key for the keyed shape, `#<index>` for the legacy array
    pub reference: String,
    pub record: std::result::Result<StoredRecord, String>,
}

impl StoredShape {
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn into_entries(self) -> Vec<StoredEntry> {
        match self {
            StoredShape::Keyed(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let record = decode_record(value).map(|mut record| {
                        if record.url.as_deref().map_or(true, str::is_empty) {
                            record.url = Some(key.clone());
                        }
                        record
                    });
                    StoredEntry {
                        reference: key,
                        record,
                    }
                })
                .collect(),
            StoredShape::Legacy(list) => list
                .into_iter()
                .enumerate()
                .map(|(index, value)| StoredEntry {
                    reference: format!("#{}", index),
                    record: decode_record(value),
                })
                .collect(),
        }
    }
}

fn decode_record(value: Value) -> std::result::Result<StoredRecord, String> {
    serde_json::from_value(value).map_err(|e| e.to_string())
}

impl StoredRecord {
    /// `url` and `title` when both are present and non-empty
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|u| !u.is_empty())?;
        let title = self.title.as_deref().filter(|t| !t.trim().is_empty())?;
        Some((url, title))
    }

    /// Parsed `createdAt`, accepting ISO-8601 strings and epoch milliseconds
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self.created_at.as_ref()? {
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_keyed_shape() {
        let shape = StoredShape::parse(
            r#"{"https://a.com": {"id": "1", "url": "https://a.com", "title": "A"}}"#,
        )
        .unwrap();
        assert!(matches!(shape, StoredShape::Keyed(_)));
        let entries = shape.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].reference, "https://a.com");
        let record = entries[0].record.as_ref().unwrap();
        assert_eq!(record.required_fields(), Some(("https://a.com", "A")));
    }

    #[test]
    fn test_parse_legacy_shape() {
        let shape =
            StoredShape::parse(r#"[{"url": "https://a.com", "title": "A"}, {"title": "B"}]"#)
                .unwrap();
        assert!(matches!(shape, StoredShape::Legacy(_)));
        let entries = shape.into_entries();
        assert_eq!(entries[1].reference, "#1");
        assert!(entries[1].record.as_ref().unwrap().required_fields().is_none());
    }

    #[test]
    fn test_keyed_shape_falls_back_to_key_for_url() {
        let shape = StoredShape::parse(r#"{"https://k.com": {"title": "K"}}"#).unwrap();
        let entries = shape.into_entries();
        let record = entries[0].record.as_ref().unwrap();
        assert_eq!(record.url.as_deref(), Some("https://k.com"));
    }

    #[test]
    fn test_malformed_entry_is_isolated() {
        let shape = StoredShape::parse(
            r#"{"https://a.com": {"title": "A", "tags": "not-a-list"},
                "https://b.com": {"title": "B"}}"#,
        )
        .unwrap();
        let entries = shape.into_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.record.is_err()));
        assert!(entries.iter().any(|e| e.record.is_ok()));
    }

    #[rstest]
    #[case("\"not json")]
    #[case("42")]
    #[case("\"text\"")]
    fn test_rejects_other_top_level_values(#[case] input: &str) {
        assert!(StoredShape::parse(input).is_err());
    }

    #[rstest]
    #[case(serde_json::json!("2024-03-01T10:00:00.000Z"), Some(1709287200000))]
    #[case(serde_json::json!("2024-03-01T11:00:00+01:00"), Some(1709287200000))]
    #[case(serde_json::json!(1709287200000_i64), Some(1709287200000))]
    #[case(serde_json::json!("yesterday"), None)]
    #[case(serde_json::json!(null), None)]
    fn test_created_at(#[case] value: Value, #[case] expected_millis: Option<i64>) {
        let record = StoredRecord {
            created_at: Some(value),
            ..StoredRecord::default()
        };
        assert_eq!(
            record.created_at().map(|dt| dt.timestamp_millis()),
            expected_millis
        );
    }

    #[test]
    fn test_blank_title_is_not_required_field() {
        let record = StoredRecord {
            url: Some("https://a.com".into()),
            title: Some("  ".into()),
            ..StoredRecord::default()
        };
        assert!(record.required_fields().is_none());
    }
}
