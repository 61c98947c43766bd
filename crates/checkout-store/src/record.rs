//! Subscription Record Schema

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use checkout_core::Plan;

/// A subscription record.
///
/// Created with `paid = false` before any payment attempt; the provider
/// billing fields stay empty until the checkout widget confirms.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Lookup key; non-unique (see crate docs)
    pub email: String,

    /// Plan code: M, A, or L
    pub plan: Plan,

    pub paid: bool,

    /// Provider order/subscription id, set after confirmation
    pub plan_id: Option<String>,

    pub quantity: Option<u32>,

    /// Billing period start, epoch seconds from the provider
    pub current_start: Option<i64>,

    /// Billing period end, epoch seconds from the provider
    pub current_end: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    /// A fresh unpaid record
    pub fn new(email: impl Into<String>, plan: Plan) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            email: email.into(),
            plan,
            paid: false,
            plan_id: None,
            quantity: None,
            current_start: None,
            current_end: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply provider confirmation: billing fields in, paid flag up.
    /// Email and plan are left untouched.
    pub fn apply(&mut self, update: SubscriptionUpdate) {
        self.plan_id = Some(update.plan_id);
        self.quantity = update.quantity;
        self.current_start = update.current_start;
        self.current_end = update.current_end;
        self.paid = true;
        self.updated_at = Utc::now();
    }
}

/// Billing fields returned by the provider during widget creation
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    /// Provider order/subscription id
    pub plan_id: String,
    pub quantity: Option<u32>,
    pub current_start: Option<i64>,
    pub current_end: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unpaid() {
        let record = SubscriptionRecord::new("a@b.com", Plan::Monthly);
        assert!(!record.paid);
        assert!(record.plan_id.is_none());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_apply_sets_billing_fields_and_keeps_identity() {
        let mut record = SubscriptionRecord::new("a@b.com", Plan::Monthly);
        record.apply(SubscriptionUpdate {
            plan_id: "sub_1".into(),
            quantity: Some(1),
            current_start: Some(1_700_000_000),
            current_end: Some(1_702_600_000),
        });

        assert!(record.paid);
        assert_eq!(record.plan_id.as_deref(), Some("sub_1"));
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.plan, Plan::Monthly);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let record = SubscriptionRecord::new("a@b.com", Plan::Lifetime);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["plan"], "L");
        assert_eq!(json["paid"], false);
        assert!(json.get("planId").is_some());
        assert!(json.get("currentStart").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
