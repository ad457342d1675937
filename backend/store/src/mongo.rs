//! MongoDB-backed student store.
//!
//! Records live in the `students` collection of the `school` database,
//! keyed by the `studentId` field. A client is created from the URI per
//! operation and released when the operation's scope ends; nothing is
//! shared between concurrently handled events.

use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, UpdateOptions};
use mongodb::{Client, Collection};
use serde_json::Value;
use tracing::debug;

use crate::{StudentStore, UpsertOutcome};

const DATABASE: &str = "school";
const COLLECTION: &str = "students";

pub struct MongoStudentStore {
    uri: String,
}

impl MongoStudentStore {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Acquire a collection handle for a single operation.
    ///
    /// The client lives exactly as long as the handle; dropping it at the
    /// end of the calling scope releases the connection on every exit
    /// path, error paths included.
    async fn students(&self) -> Result<Collection<Document>> {
        let options = ClientOptions::parse(&self.uri)
            .await
            .context("failed to parse MongoDB connection string")?;
        let client = Client::with_options(options).context("failed to create MongoDB client")?;
        Ok(client.database(DATABASE).collection(COLLECTION))
    }
}

#[async_trait]
impl StudentStore for MongoStudentStore {
    async fn fetch_by_id(&self, student_id: &str) -> Result<Option<Value>> {
        let students = self.students().await?;
        let found = students
            .find_one(doc! { "studentId": student_id })
            .await
            .with_context(|| format!("lookup failed for student {student_id}"))?;
        debug!(student_id, found = found.is_some(), "student lookup");
        match found {
            Some(mut document) => {
                document.remove("_id");
                let record = serde_json::to_value(&document)
                    .context("student document is not representable as JSON")?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn upsert_by_id(&self, student_id: &str, partial: &Value) -> Result<UpsertOutcome> {
        let students = self.students().await?;
        // Flattening to dotted paths makes $set merge field-by-field
        // instead of replacing whole sub-documents. An empty partial
        // produces an empty $set, which MongoDB rejects; that error is
        // the caller's save-failure path.
        let set = flatten_paths(partial);
        let result = students
            .update_one(doc! { "studentId": student_id }, doc! { "$set": set })
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .with_context(|| format!("upsert failed for student {student_id}"))?;
        let created = result.upserted_id.is_some();
        debug!(student_id, created, "student upsert");
        Ok(UpsertOutcome { created })
    }
}

/// Flatten a partial record tree into a dotted-path `$set` document.
///
/// Array filler slots (`null`) are skipped so that writing only term 2
/// leaves term 1 untouched.
fn flatten_paths(partial: &Value) -> Document {
    let mut out = Document::new();
    flatten_into("", partial, &mut out);
    out
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Document) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = join_path(prefix, key);
                flatten_into(&path, child, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                if child.is_null() {
                    continue;
                }
                let path = join_path(prefix, &index.to_string());
                flatten_into(&path, child, out);
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix, json_to_bson(leaf));
            }
        }
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Convert a JSON value to BSON. Record values are strings in practice,
/// but the conversion is total for robustness.
fn json_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Bson::Int64(i)
            } else if let Some(f) = n.as_f64() {
                Bson::Double(f)
            } else {
                Bson::Null
            }
        }
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(map) => {
            let mut document = Document::new();
            for (key, child) in map {
                document.insert(key.clone(), json_to_bson(child));
            }
            Bson::Document(document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_maps_to_dotted_paths() {
        let partial = json!({"name": "Anna", "family": {"guardianName": "สมชาย"}});
        let set = flatten_paths(&partial);
        assert_eq!(set.get_str("name").unwrap(), "Anna");
        assert_eq!(set.get_str("family.guardianName").unwrap(), "สมชาย");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn flattens_array_slots_with_indices() {
        let partial = json!({"education": {"grades": [null, {"GPA": "3.50"}]}});
        let set = flatten_paths(&partial);
        assert_eq!(set.get_str("education.grades.1.GPA").unwrap(), "3.50");
        // The null filler for term 1 must not be written.
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_partial_flattens_to_empty_set() {
        assert!(flatten_paths(&json!({})).is_empty());
    }

    #[test]
    fn empty_containers_are_written_as_leaves() {
        let set = flatten_paths(&json!({"tags": [], "meta": {}}));
        assert_eq!(set.get_array("tags").unwrap().len(), 0);
        assert!(set.get_document("meta").unwrap().is_empty());
    }

    #[test]
    fn json_to_bson_covers_scalars() {
        assert_eq!(json_to_bson(&json!("x")), Bson::String("x".into()));
        assert_eq!(json_to_bson(&json!(42)), Bson::Int64(42));
        assert_eq!(json_to_bson(&json!(2.5)), Bson::Double(2.5));
        assert_eq!(json_to_bson(&json!(true)), Bson::Boolean(true));
        assert_eq!(json_to_bson(&json!(null)), Bson::Null);
    }
}
