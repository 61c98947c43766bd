//! In-memory store for tests and local development

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use checkout_core::Plan;

use crate::error::{Result, StoreError};
use crate::record::{SubscriptionRecord, SubscriptionUpdate};
use crate::store::SubscriptionStore;

/// Vec-backed store with the same duplicate-email semantics as the
/// MongoDB implementation
#[derive(Default)]
pub struct MemorySubscriptionStore {
    records: RwLock<Vec<SubscriptionRecord>>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (test helper)
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn create(&self, email: &str, plan: Plan) -> Result<SubscriptionRecord> {
        let mut record = SubscriptionRecord::new(email, plan);
        record.id = Some(ObjectId::new());

        let mut records = self.records.write().unwrap();
        records.push(record.clone());
        Ok(record)
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<SubscriptionRecord>> {
        let records = self.records.read().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.email == email)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn mark_paid(
        &self,
        email: &str,
        update: SubscriptionUpdate,
    ) -> Result<SubscriptionRecord> {
        let mut records = self.records.write().unwrap();
        let record = records
            .iter_mut()
            .filter(|r| r.email == email)
            .max_by_key(|r| r.created_at)
            .ok_or(StoreError::NotFound)?;

        record.apply(update);
        Ok(record.clone())
    }
}
