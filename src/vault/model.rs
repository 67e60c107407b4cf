use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a record.
///
/// The file-backed store hands out sequential integers; the remote store
/// trusts the 24-hex identifiers its backend generates. Both render to the
/// textual form users type at prompts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Local(u64),
    Remote(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Local(n) => write!(f, "{}", n),
            RecordId::Remote(hex) => write!(f, "{}", hex),
        }
    }
}

/// A point in time as stored on disk or in the remote collection.
///
/// Times read from storage keep their source text, so rewriting the data file
/// never changes a field nobody touched. Values that fail to parse are kept
/// verbatim too; the query layer skips or orders them separately.
///
/// Two parseable timestamps are equal when they name the same instant.
#[derive(Debug, Clone)]
pub enum Timestamp {
    At(DateTime<Utc>),
    Parsed { at: DateTime<Utc>, raw: String },
    Unparseable(String),
}

impl Timestamp {
    /// Current time at millisecond precision, so a reload sees the same value.
    pub fn now() -> Self {
        Timestamp::At(Utc::now().trunc_subsecs(3))
    }

    pub fn parse(raw: &str) -> Self {
        match parse_instant(raw.trim()) {
            Some(at) if render(at) == raw => Timestamp::At(at),
            Some(at) => Timestamp::Parsed {
                at,
                raw: raw.to_string(),
            },
            None => Timestamp::Unparseable(raw.to_string()),
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::At(dt) => Some(*dt),
            Timestamp::Parsed { at, .. } => Some(*at),
            Timestamp::Unparseable(_) => None,
        }
    }
}

// RFC 3339, or a bare date taken as midnight UTC.
fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn render(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_datetime(), other.as_datetime()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.to_string() == other.to_string(),
            _ => false,
        }
    }
}

impl Eq for Timestamp {}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::At(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::At(dt) => write!(f, "{}", render(*dt)),
            Timestamp::Parsed { raw, .. } | Timestamp::Unparseable(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Timestamp::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub value: String,
    pub created: Timestamp,
    // Legacy data may lack it; absent means "never updated".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
}

impl Record {
    pub fn new(id: RecordId, name: String, value: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name,
            value,
            created: now.clone(),
            updated: Some(now),
        }
    }

    /// The update time, falling back to the creation time.
    pub fn last_modified(&self) -> &Timestamp {
        self.updated.as_ref().unwrap_or(&self.created)
    }
}

/// Rejects names that are empty once surrounding whitespace is removed.
pub fn validate_name(name: &str) -> crate::error::Result<()> {
    if name.trim().is_empty() {
        return Err(crate::error::VaultError::validation(
            "Name cannot be empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_millis() {
        let ts = Timestamp::parse("2024-05-01T12:30:00.250Z");
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(ts, Timestamp::At(expected));
        assert_eq!(ts.to_string(), "2024-05-01T12:30:00.250Z");
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let ts = Timestamp::parse("2023-02-14");
        let expected = Utc.with_ymd_and_hms(2023, 2, 14, 0, 0, 0).unwrap();
        assert_eq!(ts.as_datetime(), Some(expected));
    }

    #[test]
    fn parsed_text_survives_a_rewrite() {
        for raw in [
            "2024-01-01T00:00:00.123456Z",
            "2024-01-01T05:00:00+05:00",
            "2023-02-14",
        ] {
            let ts = Timestamp::parse(raw);
            assert!(ts.as_datetime().is_some(), "{} should parse", raw);
            assert_eq!(ts.to_string(), raw);
            assert_eq!(serde_json::to_string(&ts).unwrap(), format!("\"{}\"", raw));
        }
    }

    #[test]
    fn same_instant_in_different_offsets_is_equal() {
        assert_eq!(
            Timestamp::parse("2024-01-01T05:00:00+05:00"),
            Timestamp::parse("2024-01-01T00:00:00.000Z")
        );
        assert_ne!(
            Timestamp::parse("2024-01-01T00:00:00Z"),
            Timestamp::parse("2024-01-01T00:00:01Z")
        );
        assert_ne!(Timestamp::parse("soon"), Timestamp::parse("later"));
    }

    #[test]
    fn keeps_garbage_verbatim() {
        let ts = Timestamp::parse("last tuesday");
        assert_eq!(ts, Timestamp::Unparseable("last tuesday".to_string()));
        assert_eq!(ts.as_datetime(), None);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"last tuesday\"");
    }

    #[test]
    fn new_record_has_equal_timestamps() {
        let record = Record::new(RecordId::Local(1), "Alice".into(), "x".into());
        assert_eq!(record.updated.as_ref(), Some(&record.created));
    }

    #[test]
    fn now_survives_serialization() {
        let record = Record::new(RecordId::Local(7), "A".into(), "B".into());
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn legacy_record_without_updated_falls_back_to_created() {
        let json = r#"{"id": 3, "name": "n", "value": "v", "created": "2024-01-01T00:00:00.000Z"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::Local(3));
        assert!(record.updated.is_none());
        assert_eq!(record.last_modified(), &record.created);
    }

    #[test]
    fn remote_ids_deserialize_as_strings() {
        let id: RecordId = serde_json::from_str("\"65a1b2c3d4e5f60718293a4b\"").unwrap();
        assert_eq!(id, RecordId::Remote("65a1b2c3d4e5f60718293a4b".into()));
        assert_eq!(id.to_string(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn validate_name_rejects_blank() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("ok").is_ok());
    }
}
