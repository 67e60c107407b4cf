//! Client for a document store's HTTP data API.
//!
//! Every action is one `POST {base_url}/action/{action}` carrying the target
//! (`dataSource`, `database`, `collection`) plus the action's own fields, and
//! authenticated with an `api-key` header.

use super::collection::{DocumentCollection, RecordChanges, RecordDocument};
use crate::config::RemoteConfig;
use crate::error::{Result, StorageError, VaultError};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

pub struct DataApiCollection {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    data_source: String,
    database: String,
    collection: String,
}

impl DataApiCollection {
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        let base_url = config
            .url
            .clone()
            .ok_or_else(|| VaultError::Config("remote.url is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(StorageError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            data_source: config.data_source.clone(),
            database: config.database.clone(),
            collection: config.collection.clone(),
        })
    }

    pub fn action_url(&self, action: &str) -> String {
        format!("{}/action/{}", self.base_url, action)
    }

    /// Request body for `action`: the collection target merged with `fields`.
    pub fn request_body(&self, fields: Value) -> Value {
        let mut body = Map::new();
        body.insert("dataSource".into(), json!(self.data_source));
        body.insert("database".into(), json!(self.database));
        body.insert("collection".into(), json!(self.collection));
        if let Value::Object(extra) = fields {
            body.extend(extra);
        }
        Value::Object(body)
    }

    fn post(&self, action: &str, fields: Value) -> Result<Value> {
        let url = self.action_url(action);
        let body = self.request_body(fields);
        tracing::debug!(%url, "data api request");

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("api-key", key);
        }

        let response = request.send().map_err(StorageError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(StorageError::Remote(format!(
                "{} failed with status {}: {}",
                action, status, text
            ))
            .into());
        }
        Ok(response.json::<Value>().map_err(StorageError::Http)?)
    }
}

fn id_filter(id: &str) -> Value {
    json!({ "_id": { "$oid": id } })
}

fn malformed(action: &str, what: &str) -> VaultError {
    StorageError::Remote(format!("{} response is missing {}", action, what)).into()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InsertedId {
    Plain(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

pub fn parse_inserted_id(response: &Value) -> Result<String> {
    let raw = response
        .get("insertedId")
        .cloned()
        .ok_or_else(|| malformed("insertOne", "insertedId"))?;
    let id: InsertedId = serde_json::from_value(raw).map_err(StorageError::Serialization)?;
    Ok(match id {
        InsertedId::Plain(s) => s,
        InsertedId::Extended { oid } => oid,
    })
}

pub fn parse_documents(response: &Value) -> Result<Vec<RecordDocument>> {
    let docs = response
        .get("documents")
        .cloned()
        .ok_or_else(|| malformed("find", "documents"))?;
    Ok(serde_json::from_value(docs).map_err(StorageError::Serialization)?)
}

pub fn parse_document(response: &Value) -> Result<Option<RecordDocument>> {
    match response.get("document") {
        None | Some(Value::Null) => Ok(None),
        Some(doc) => Ok(Some(
            serde_json::from_value(doc.clone()).map_err(StorageError::Serialization)?,
        )),
    }
}

pub fn parse_count(response: &Value, field: &str, action: &str) -> Result<u64> {
    response
        .get(field)
        .and_then(Value::as_u64)
        .ok_or_else(|| malformed(action, field))
}

impl DocumentCollection for DataApiCollection {
    fn ping(&self) -> Result<()> {
        self.post("findOne", json!({ "filter": {} }))?;
        Ok(())
    }

    fn insert_one(&self, doc: &RecordDocument) -> Result<String> {
        let response = self.post("insertOne", json!({ "document": doc }))?;
        parse_inserted_id(&response)
    }

    fn find_all(&self) -> Result<Vec<RecordDocument>> {
        let response = self.post("find", json!({ "filter": {} }))?;
        parse_documents(&response)
    }

    fn find_one(&self, id: &str) -> Result<Option<RecordDocument>> {
        let response = self.post("findOne", json!({ "filter": id_filter(id) }))?;
        parse_document(&response)
    }

    fn update_one(&self, id: &str, changes: &RecordChanges) -> Result<bool> {
        let response = self.post(
            "updateOne",
            json!({ "filter": id_filter(id), "update": { "$set": changes } }),
        )?;
        Ok(parse_count(&response, "matchedCount", "updateOne")? > 0)
    }

    fn delete_one(&self, id: &str) -> Result<bool> {
        let response = self.post("deleteOne", json!({ "filter": id_filter(id) }))?;
        Ok(parse_count(&response, "deletedCount", "deleteOne")? > 0)
    }
}
