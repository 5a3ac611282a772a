//! Conversion between BSON documents and the JSON sent over HTTP.
//!
//! Responses render documents the way the Node.js driver does when a document
//! is sent to a client: ObjectIds become plain hex strings and datetimes become
//! RFC 3339 strings. Everything else uses relaxed extended JSON.

use mongodb::bson::{extjson, Bson, Document};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a client payload cannot be stored as a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid extended JSON: {0}")]
    ExtendedJson(#[from] extjson::de::Error),

    #[error("Payload is a single {0:?} value, not a document")]
    NotADocument(mongodb::bson::spec::ElementType),
}

/// Renders a single BSON value as client-facing JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Renders a whole document as a JSON object.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Renders a list of documents as a JSON array, preserving order.
pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

/// Converts a client-supplied JSON object into a BSON document.
///
/// Integers that fit in 32 bits become `Int32`, matching how the Node.js
/// driver stores JavaScript numbers. Extended JSON keys such as `$oid` are
/// interpreted, so malformed ones are rejected.
pub fn json_to_document(object: Map<String, Value>) -> Result<Document, DocumentError> {
    match Bson::try_from(Value::Object(object))? {
        Bson::Document(doc) => Ok(doc),
        // e.g. `{"$oid": "..."}` parses as a bare ObjectId
        other => Err(DocumentError::NotADocument(other.element_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_object_id_renders_as_hex() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! { "_id": oid, "name": "Chair" });

        assert_eq!(rendered["_id"], json!(oid.to_hex()));
        assert_eq!(rendered["name"], "Chair");
    }

    #[test]
    fn test_nested_values_are_rendered() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! {
            "variants": [ { "ref": oid, "price": 12.5 } ],
            "stock": 4_i32,
        });

        assert_eq!(rendered["variants"][0]["ref"], json!(oid.to_hex()));
        assert_eq!(rendered["variants"][0]["price"], 12.5);
        assert_eq!(rendered["stock"], 4);
    }

    #[test]
    fn test_json_integers_become_int32() {
        let object = json!({ "email": "a@b.com", "quantity": 2 });
        let map = object.as_object().cloned().unwrap();

        let doc = json_to_document(map).unwrap();
        assert_eq!(doc.get("quantity"), Some(&Bson::Int32(2)));
        assert_eq!(doc.get_str("email").unwrap(), "a@b.com");
    }

    #[test]
    fn test_bare_extended_json_value_is_rejected() {
        let object = json!({ "$oid": ObjectId::new().to_hex() });
        let map = object.as_object().cloned().unwrap();

        assert!(matches!(
            json_to_document(map),
            Err(DocumentError::NotADocument(_))
        ));
    }
}
