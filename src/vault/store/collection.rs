use crate::error::Result;
use crate::model::{Record, RecordId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

/// A record as it is stored in the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDocument {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_object_id"
    )]
    pub id: Option<String>,
    pub name: String,
    pub value: String,
    pub created: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
}

/// Fields `update_one` sets on an existing document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordChanges {
    pub name: String,
    pub value: String,
    pub updated: Timestamp,
}

impl RecordDocument {
    /// A document to insert; the collection assigns `_id`.
    pub fn new_insert(name: &str, value: &str, now: Timestamp) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            value: value.to_string(),
            created: now.clone(),
            updated: Some(now),
        }
    }

    /// Documents without an `_id` never come back from a find, so `None`
    /// here means the payload was malformed.
    pub fn into_record(self) -> Option<Record> {
        let id = self.id?;
        Some(Record {
            id: RecordId::Remote(id),
            name: self.name,
            value: self.value,
            created: self.created,
            updated: self.updated,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectIdRepr {
    Plain(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

fn deserialize_object_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let repr = Option::<ObjectIdRepr>::deserialize(deserializer)?;
    Ok(repr.map(|r| match r {
        ObjectIdRepr::Plain(s) => s,
        ObjectIdRepr::Extended { oid } => oid,
    }))
}

/// True for the textual form of a backend-generated id: 24 hex digits.
pub fn is_object_id(raw: &str) -> bool {
    raw.len() == 24 && raw.chars().all(|c| c.is_ascii_hexdigit())
}

/// One collection in a document store. Every method is a single backend call.
pub trait DocumentCollection {
    /// Cheap round trip used to fail fast at startup.
    fn ping(&self) -> Result<()>;

    /// Insert a document and return the id the backend generated for it.
    fn insert_one(&self, doc: &RecordDocument) -> Result<String>;

    fn find_all(&self) -> Result<Vec<RecordDocument>>;

    fn find_one(&self, id: &str) -> Result<Option<RecordDocument>>;

    /// Returns whether a document matched `id`.
    fn update_one(&self, id: &str, changes: &RecordChanges) -> Result<bool>;

    /// Returns whether a document was removed.
    fn delete_one(&self, id: &str) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_plain_and_extended_ids() {
        let plain = r#"{"_id": "65a1b2c3d4e5f60718293a4b", "name": "a", "value": "b", "created": "2024-01-01T00:00:00.000Z"}"#;
        let extended = r#"{"_id": {"$oid": "65a1b2c3d4e5f60718293a4b"}, "name": "a", "value": "b", "created": "2024-01-01T00:00:00.000Z"}"#;

        let a: RecordDocument = serde_json::from_str(plain).unwrap();
        let b: RecordDocument = serde_json::from_str(extended).unwrap();
        assert_eq!(a.id.as_deref(), Some("65a1b2c3d4e5f60718293a4b"));
        assert_eq!(a, b);
    }

    #[test]
    fn insert_documents_omit_the_id() {
        let doc = RecordDocument::new_insert("n", "v", Timestamp::now());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["name"], "n");
    }

    #[test]
    fn object_id_shape() {
        assert!(is_object_id("65a1b2c3d4e5f60718293a4b"));
        assert!(!is_object_id("65a1b2c3d4e5f60718293a4"));
        assert!(!is_object_id("zza1b2c3d4e5f60718293a4b"));
        assert!(!is_object_id("12"));
    }
}
