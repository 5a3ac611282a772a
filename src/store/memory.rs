//! In-memory document store.
//!
//! Mirrors the MongoDB backend closely enough to run the HTTP layer without a
//! database: documents keep their insertion order, inserts assign an ObjectId
//! when the payload has no `_id`, and duplicate `_id`s are rejected.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::{
    DeleteAck, DocumentStore, InsertAck, Result, StoreError, UpdateAck, EMAIL_FIELD,
    QUANTITY_FIELD,
};

/// A single collection: documents keyed by their rendered `_id`.
///
/// DashMap allows concurrent access without external Mutexes; the sequence
/// number restores insertion order when listing.
#[derive(Default)]
struct MemoryCollection {
    documents: DashMap<String, (u64, Document)>,
    next_seq: AtomicU64,
}

impl MemoryCollection {
    fn key_for(id: &Bson) -> String {
        match id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.clone().into_relaxed_extjson().to_string(),
        }
    }

    fn insert(&self, mut doc: Document) -> Result<Bson> {
        let id = match doc.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                doc.insert("_id", id.clone());
                id
            }
        };

        let key = Self::key_for(&id);
        match self.documents.entry(key) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateKey(entry.key().clone())),
            Entry::Vacant(entry) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                entry.insert((seq, doc));
                Ok(id)
            }
        }
    }

    fn get(&self, id: ObjectId) -> Option<Document> {
        self.documents
            .get(&id.to_hex())
            .map(|entry| entry.value().1.clone())
    }

    fn filter<F>(&self, predicate: F) -> Vec<Document>
    where
        F: Fn(&Document) -> bool,
    {
        let mut matching: Vec<(u64, Document)> = self
            .documents
            .iter()
            .filter(|entry| predicate(&entry.value().1))
            .map(|entry| entry.value().clone())
            .collect();

        matching.sort_by_key(|(seq, _)| *seq);
        matching.into_iter().map(|(_, doc)| doc).collect()
    }

    fn remove(&self, id: ObjectId) -> bool {
        self.documents.remove(&id.to_hex()).is_some()
    }

    /// Applies `$set` semantics for a single field. Returns (matched, modified).
    fn set_field(&self, id: ObjectId, field: &str, value: Bson) -> (u64, u64) {
        match self.documents.get_mut(&id.to_hex()) {
            Some(mut entry) => {
                let doc = &mut entry.value_mut().1;
                if doc.get(field) == Some(&value) {
                    (1, 0)
                } else {
                    doc.insert(field, value);
                    (1, 1)
                }
            }
            None => (0, 0),
        }
    }
}

/// Process-local store holding the `Products` and `Cart` collections.
#[derive(Default)]
pub struct InMemoryStore {
    products: MemoryCollection,
    cart: MemoryCollection,
}

impl InMemoryStore {
    /// Creates a new store with both collections empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a product document, returning its identifier.
    ///
    /// The HTTP surface is read-only for products, so this is the only way to
    /// populate the catalog of an in-memory store.
    pub fn insert_product(&self, product: Document) -> Result<Bson> {
        self.products.insert(product)
    }

    /// Looks up a cart item directly, bypassing the HTTP layer.
    pub fn cart_item(&self, id: ObjectId) -> Option<Document> {
        self.cart.get(id)
    }

    /// Returns the number of stored cart items.
    pub fn cart_len(&self) -> usize {
        self.cart.documents.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_products(&self) -> Result<Vec<Document>> {
        Ok(self.products.filter(|_| true))
    }

    async fn find_product(&self, id: ObjectId) -> Result<Option<Document>> {
        Ok(self.products.get(id))
    }

    async fn insert_cart_item(&self, item: Document) -> Result<InsertAck> {
        let id = self.cart.insert(item)?;
        Ok(InsertAck::new(id))
    }

    async fn cart_items_for(&self, email: &str) -> Result<Vec<Document>> {
        Ok(self
            .cart
            .filter(|doc| matches!(doc.get(EMAIL_FIELD), Some(Bson::String(e)) if e == email)))
    }

    async fn delete_cart_item(&self, id: ObjectId) -> Result<DeleteAck> {
        let deleted = u64::from(self.cart.remove(id));
        Ok(DeleteAck::new(deleted))
    }

    async fn set_cart_quantity(&self, id: ObjectId, quantity: Bson) -> Result<UpdateAck> {
        let (matched, modified) = self.cart.set_field(id, QUANTITY_FIELD, quantity);
        Ok(UpdateAck::new(matched, modified))
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_products_listed_in_insertion_order() {
        let store = InMemoryStore::new();
        for name in ["Sofa", "Lamp", "Desk"] {
            store.insert_product(doc! { "name": name }).unwrap();
        }

        let names: Vec<String> = store
            .list_products()
            .await
            .unwrap()
            .iter()
            .map(|p| p.get_str("name").unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["Sofa", "Lamp", "Desk"]);
    }

    #[tokio::test]
    async fn test_insert_assigns_object_id() {
        let store = InMemoryStore::new();
        let ack = store
            .insert_cart_item(doc! { "email": "a@b.com", "quantity": 1 })
            .await
            .unwrap();

        let hex = ack.inserted_id.as_str().unwrap();
        let id = ObjectId::parse_str(hex).unwrap();
        assert!(store.cart_item(id).is_some());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = InMemoryStore::new();
        let id = ObjectId::new();
        store.insert_cart_item(doc! { "_id": id }).await.unwrap();

        let err = store.insert_cart_item(doc! { "_id": id }).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(store.cart_len(), 1);
    }

    #[tokio::test]
    async fn test_email_filter_is_case_sensitive() {
        let store = InMemoryStore::new();
        store
            .insert_cart_item(doc! { "email": "a@b.com" })
            .await
            .unwrap();
        store
            .insert_cart_item(doc! { "email": "A@B.com" })
            .await
            .unwrap();

        assert_eq!(store.cart_items_for("a@b.com").await.unwrap().len(), 1);
        assert!(store.cart_items_for("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_same_quantity_matches_without_modifying() {
        let store = InMemoryStore::new();
        let id = ObjectId::new();
        store
            .insert_cart_item(doc! { "_id": id, "quantity": 3 })
            .await
            .unwrap();

        let ack = store.set_cart_quantity(id, Bson::Int32(3)).await.unwrap();
        assert_eq!((ack.matched_count, ack.modified_count), (1, 0));

        let ack = store.set_cart_quantity(id, Bson::Int32(4)).await.unwrap();
        assert_eq!((ack.matched_count, ack.modified_count), (1, 1));
    }

    #[tokio::test]
    async fn test_delete_missing_reports_zero() {
        let store = InMemoryStore::new();
        let ack = store.delete_cart_item(ObjectId::new()).await.unwrap();
        assert_eq!(ack.deleted_count, 0);
        assert!(ack.acknowledged);
    }
}
