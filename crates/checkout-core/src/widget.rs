//! Checkout Widget Configuration
//!
//! The hosted payment widget is configured from a plain JSON object. One-time
//! orders carry an `order_id` plus an explicit amount; recurring plans carry a
//! `subscription_id` instead and the widget reads the amount from the plan.

use serde::{Deserialize, Serialize};

/// Configuration handed to the client-side checkout widget.
///
/// The completion handler and dismiss hook are attached separately by the
/// frontend; this struct covers only the serializable fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WidgetOptions {
    /// Public gateway key id
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,

    /// Amount in paise; only set for one-time orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    pub currency: String,
    pub name: String,
    pub description: String,
    pub prefill: WidgetPrefill,
    pub notes: WidgetNotes,
    pub theme: WidgetTheme,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WidgetPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WidgetNotes {
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WidgetTheme {
    pub color: String,
}

impl WidgetOptions {
    /// Options for a one-time (lifetime) order
    pub fn for_order(key: &str, order_id: &str, amount: i64, email: &str) -> Self {
        Self {
            order_id: Some(order_id.into()),
            subscription_id: None,
            amount: Some(amount),
            description: "Lifetime Subscription".into(),
            ..Self::base(key, email)
        }
    }

    /// Options for a recurring (monthly/annual) subscription
    pub fn for_subscription(key: &str, subscription_id: &str, email: &str) -> Self {
        Self {
            order_id: None,
            subscription_id: Some(subscription_id.into()),
            amount: None,
            description: "Subscription".into(),
            ..Self::base(key, email)
        }
    }

    fn base(key: &str, email: &str) -> Self {
        Self {
            key: key.into(),
            order_id: None,
            subscription_id: None,
            amount: None,
            currency: "INR".into(),
            name: "Your Company Name".into(),
            description: String::new(),
            prefill: WidgetPrefill {
                name: "John Doe".into(),
                email: email.into(),
                contact: "9999999999".into(),
            },
            notes: WidgetNotes {
                address: "Your Company Address".into(),
            },
            theme: WidgetTheme {
                color: "#F37254".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_options_carry_order_id_and_amount() {
        let options = WidgetOptions::for_order("rzp_pub", "order_1", 6_000_000, "x@y.com");
        assert_eq!(options.order_id.as_deref(), Some("order_1"));
        assert_eq!(options.amount, Some(6_000_000));
        assert!(options.subscription_id.is_none());
        assert_eq!(options.currency, "INR");
        assert_eq!(options.description, "Lifetime Subscription");
    }

    #[test]
    fn test_subscription_options_carry_subscription_id_only() {
        let options = WidgetOptions::for_subscription("rzp_pub", "sub_1", "x@y.com");
        assert_eq!(options.subscription_id.as_deref(), Some("sub_1"));
        assert!(options.order_id.is_none());
        assert!(options.amount.is_none());
        assert_eq!(options.prefill.email, "x@y.com");
    }

    #[test]
    fn test_unset_ids_are_not_serialized() {
        let options = WidgetOptions::for_subscription("rzp_pub", "sub_1", "x@y.com");
        let json = serde_json::to_value(&options).unwrap();
        assert!(json.get("order_id").is_none());
        assert!(json.get("amount").is_none());
        assert_eq!(json["subscription_id"], "sub_1");
    }
}
