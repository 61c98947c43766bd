//! MongoDB Store
//!
//! Wraps a `mongodb::Client` built once at startup. The handle is cloned
//! into handlers through `Arc<dyn SubscriptionStore>`; there is no hidden
//! module-level "is connected" state, reconnecting is the driver's job.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

use checkout_core::Plan;

use crate::error::{Result, StoreError};
use crate::record::{SubscriptionRecord, SubscriptionUpdate};
use crate::store::SubscriptionStore;

const COLLECTION: &str = "subscriptions";

/// Document-database store backed by MongoDB
#[derive(Clone)]
pub struct MongoSubscriptionStore {
    collection: Collection<SubscriptionRecord>,
}

impl MongoSubscriptionStore {
    /// Connect and ping the database, failing fast on a bad URI or an
    /// unreachable server.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database, "MongoDB connected");
        Ok(Self {
            collection: db.collection(COLLECTION),
        })
    }
}

#[async_trait]
impl SubscriptionStore for MongoSubscriptionStore {
    async fn create(&self, email: &str, plan: Plan) -> Result<SubscriptionRecord> {
        let mut record = SubscriptionRecord::new(email, plan);
        let result = self.collection.insert_one(&record).await?;
        record.id = result.inserted_id.as_object_id();
        Ok(record)
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<SubscriptionRecord>> {
        let record = self
            .collection
            .find_one(doc! { "email": email })
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(record)
    }

    async fn mark_paid(
        &self,
        email: &str,
        update: SubscriptionUpdate,
    ) -> Result<SubscriptionRecord> {
        let mut record = self
            .find_latest_by_email(email)
            .await?
            .ok_or(StoreError::NotFound)?;

        record.apply(update);
        self.collection
            .replace_one(doc! { "_id": record.id }, &record)
            .await?;
        Ok(record)
    }
}
