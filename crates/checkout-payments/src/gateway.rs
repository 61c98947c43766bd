//! Razorpay REST Client
//!
//! Order and subscription creation against the hosted Razorpay API, with
//! HTTP Basic auth (key id / key secret).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use checkout_core::Plan;

use crate::error::{PaymentError, Result};

const API_BASE: &str = "https://api.razorpay.com/v1";

/// Default one-time checkout amount: 60000 INR in paise
pub const DEFAULT_DIRECT_AMOUNT: i64 = 6_000_000;

/// All amounts are quoted in this currency
pub const DEFAULT_CURRENCY: &str = "INR";

/// Monthly subscriptions bill twelve cycles
const MONTHLY_TOTAL_COUNT: u32 = 12;

/// Annual subscriptions bill up to Razorpay's yearly-cycle cap
const ANNUAL_TOTAL_COUNT: u32 = 10;

/// Gateway credentials and plan ids, read once at startup
#[derive(Clone, Debug)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub monthly_plan_id: String,
    pub annual_plan_id: String,
}

impl RazorpayConfig {
    /// Read from environment variables. Every field is required; a missing
    /// variable is a startup failure.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| PaymentError::Config(format!("{name} not set")))
        };
        Ok(Self {
            key_id: var("RAZORPAY_KEY_ID")?,
            key_secret: var("RAZORPAY_KEY_SECRET")?,
            monthly_plan_id: var("RAZORPAY_MONTHLY_PLAN_ID")?,
            annual_plan_id: var("RAZORPAY_ANNUAL_PLAN_ID")?,
        })
    }
}

/// Razorpay client wrapper
pub struct RazorpayClient {
    http: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayClient {
    /// Create a new client from an explicit config
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(RazorpayConfig::from_env()?))
    }

    /// Key secret, needed for payment signature verification
    pub fn key_secret(&self) -> &str {
        &self.config.key_secret
    }

    /// Create a one-time order for the direct (lifetime) checkout.
    ///
    /// Callers may override the amount (in paise) and currency; both
    /// default to the fixed lifetime price in INR.
    pub async fn create_direct_order(
        &self,
        amount: Option<i64>,
        currency: Option<String>,
    ) -> Result<Order> {
        let request = CreateOrder {
            amount: amount.unwrap_or(DEFAULT_DIRECT_AMOUNT),
            currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.into()),
            payment_capture: true,
            receipt: format!("rcpt_{}", uuid::Uuid::new_v4().simple()),
            notes: default_notes(),
        };

        tracing::info!(amount = request.amount, "Creating direct checkout order");
        self.post("orders", &request).await
    }

    /// Create a recurring subscription for a monthly or annual plan.
    ///
    /// The lifetime plan has no gateway plan id; routing it here is a
    /// caller bug surfaced as a config error.
    pub async fn create_plan_subscription(&self, plan: Plan) -> Result<Subscription> {
        let (plan_id, total_count) = match plan {
            Plan::Monthly => (self.config.monthly_plan_id.clone(), MONTHLY_TOTAL_COUNT),
            Plan::Annual => (self.config.annual_plan_id.clone(), ANNUAL_TOTAL_COUNT),
            Plan::Lifetime => {
                return Err(PaymentError::Config(
                    "lifetime plan is a one-time order, not a subscription".into(),
                ));
            }
        };

        let request = CreateSubscription {
            plan_id,
            customer_notify: 1,
            quantity: 1,
            total_count,
            notes: default_notes(),
        };

        tracing::info!(plan_id = %request.plan_id, "Creating subscription");
        self.post("subscriptions", &request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http
            .post(format!("{API_BASE}/{path}"))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Razorpay request rejected");
            return Err(PaymentError::Gateway(gateway_message(&body)));
        }

        Ok(response.json().await?)
    }
}

/// Fixed metadata attached to every order and subscription
fn default_notes() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("key1".into(), "value3".into()),
        ("key2".into(), "value2".into()),
    ])
}

/// Pull the human-readable description out of a Razorpay error body,
/// falling back to the raw text
fn gateway_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["description"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

/// Order creation request (`POST /v1/orders`)
#[derive(Clone, Debug, Serialize)]
pub struct CreateOrder {
    /// Amount in paise
    pub amount: i64,
    pub currency: String,
    pub payment_capture: bool,
    pub receipt: String,
    pub notes: BTreeMap<String, String>,
}

/// A created order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub receipt: Option<String>,
}

/// Subscription creation request (`POST /v1/subscriptions`)
#[derive(Clone, Debug, Serialize)]
pub struct CreateSubscription {
    pub plan_id: String,
    pub customer_notify: u8,
    pub quantity: u32,
    pub total_count: u32,
    pub notes: BTreeMap<String, String>,
}

/// A created subscription with its billing-period bounds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub plan_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub start_at: Option<i64>,
    #[serde(default)]
    pub end_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RazorpayConfig {
        RazorpayConfig {
            key_id: "rzp_test_key".into(),
            key_secret: "secret".into(),
            monthly_plan_id: "plan_monthly".into(),
            annual_plan_id: "plan_annual".into(),
        }
    }

    #[test]
    fn test_order_request_shape() {
        let request = CreateOrder {
            amount: DEFAULT_DIRECT_AMOUNT,
            currency: DEFAULT_CURRENCY.into(),
            payment_capture: true,
            receipt: "rcpt_test".into(),
            notes: default_notes(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["amount"], 6_000_000);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["payment_capture"], true);
        assert_eq!(json["notes"]["key1"], "value3");
    }

    #[tokio::test]
    async fn test_lifetime_plan_rejected_as_subscription() {
        let client = RazorpayClient::new(test_config());
        let err = client
            .create_plan_subscription(Plan::Lifetime)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Config(_)));
    }

    #[test]
    fn test_gateway_message_extraction() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"Invalid plan id"}}"#;
        assert_eq!(gateway_message(body), "Invalid plan id");
        assert_eq!(gateway_message("plain failure"), "plain failure");
    }
}
