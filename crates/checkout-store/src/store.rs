//! Subscription storage trait

use async_trait::async_trait;

use checkout_core::Plan;

use crate::error::Result;
use crate::record::{SubscriptionRecord, SubscriptionUpdate};

/// Subscription record storage.
///
/// Implementations are injected as `Arc<dyn SubscriptionStore>`; handlers
/// never see a concrete database handle.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Persist a fresh record with `paid = false`
    async fn create(&self, email: &str, plan: Plan) -> Result<SubscriptionRecord>;

    /// Most recently created record for an email, if any
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<SubscriptionRecord>>;

    /// Locate the latest record for an email and transition it to paid,
    /// writing the provider billing fields. `StoreError::NotFound` when no
    /// record exists.
    async fn mark_paid(
        &self,
        email: &str,
        update: SubscriptionUpdate,
    ) -> Result<SubscriptionRecord>;
}
