//! MongoDB document store.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use super::{
    DeleteAck, DocumentStore, InsertAck, Result, StoreError, UpdateAck, CART_COLLECTION,
    EMAIL_FIELD, PRODUCTS_COLLECTION, QUANTITY_FIELD,
};

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Store backed by a single long-lived MongoDB client.
///
/// The driver pools connections internally, so one instance serves every
/// request for the lifetime of the process.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    products: Collection<Document>,
    cart: Collection<Document>,
}

impl MongoStore {
    /// Connects to `uri`, pinning the stable server API v1, and pings the
    /// deployment before returning.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        tracing::info!("pinged deployment, connected to MongoDB");

        Ok(Self::from_client(client, database))
    }

    /// Wraps an already configured client.
    pub fn from_client(client: Client, database: &str) -> Self {
        let db = client.database(database);
        Self {
            products: db.collection(PRODUCTS_COLLECTION),
            cart: db.collection(CART_COLLECTION),
            client,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[tracing::instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Document>> {
        let cursor = self.products.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_product(&self, id: ObjectId) -> Result<Option<Document>> {
        Ok(self.products.find_one(doc! { "_id": id }).await?)
    }

    #[tracing::instrument(skip(self, item))]
    async fn insert_cart_item(&self, item: Document) -> Result<InsertAck> {
        let result = self.cart.insert_one(item).await.map_err(|err| {
            if let ErrorKind::Write(WriteFailure::WriteError(write_err)) = err.kind.as_ref() {
                if write_err.code == DUPLICATE_KEY_CODE {
                    return StoreError::DuplicateKey(write_err.message.clone());
                }
            }
            StoreError::Database(err)
        })?;
        Ok(InsertAck::new(result.inserted_id))
    }

    #[tracing::instrument(skip(self))]
    async fn cart_items_for(&self, email: &str) -> Result<Vec<Document>> {
        let cursor = self.cart.find(doc! { EMAIL_FIELD: email }).await?;
        Ok(cursor.try_collect().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_cart_item(&self, id: ObjectId) -> Result<DeleteAck> {
        let result = self.cart.delete_one(doc! { "_id": id }).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }

    #[tracing::instrument(skip(self))]
    async fn set_cart_quantity(&self, id: ObjectId, quantity: Bson) -> Result<UpdateAck> {
        let result = self
            .cart
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { QUANTITY_FIELD: quantity } },
            )
            .await?;

        Ok(UpdateAck::new(result.matched_count, result.modified_count))
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}
