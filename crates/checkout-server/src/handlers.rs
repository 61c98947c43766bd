//! HTTP Handlers
//!
//! Five stateless endpoints: three checkout routes (direct one-time,
//! monthly, annual) that forward to the payment gateway, and two
//! subscription-record routes (save, update) over the persistence
//! gateway. Collaborator failures surface as 500 with the raw message.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use checkout_core::Plan;
use checkout_payments::{order_message, subscription_message, verify_signature, Order, Subscription};
use checkout_store::{StoreError, SubscriptionRecord, SubscriptionUpdate};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectCheckoutRequest {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Provider order object merged with the submitter's email
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub email: Option<String>,
}

/// Provider subscription object merged with the submitter's email
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveSubscriptionRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub current_start: Option<i64>,
    #[serde(default)]
    pub current_end: Option<i64>,
    /// Payment id from the widget's completion callback; when present
    /// together with the signature, the payment is verified before any write
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub success: bool,
    pub subscription: SubscriptionRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfigResponse {
    pub key_id: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn internal_error(message: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn email_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("email")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Public widget configuration for the frontend
pub async fn widget_config(State(state): State<AppState>) -> Json<WidgetConfigResponse> {
    Json(WidgetConfigResponse {
        key_id: state.widget_key_id.clone(),
    })
}

/// Direct one-time checkout: create a gateway order
pub async fn direct_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DirectCheckoutRequest>,
) -> Result<Json<OrderResponse>, HandlerError> {
    let email = email_header(&headers);
    tracing::info!(?email, "Creating direct checkout order");

    let order = state
        .razorpay
        .create_direct_order(payload.amount, payload.currency)
        .await
        .map_err(|e| {
            tracing::error!("Error creating order: {e}");
            internal_error(e)
        })?;

    Ok(Json(OrderResponse { order, email }))
}

/// Monthly subscription checkout
pub async fn monthly_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SubscriptionResponse>, HandlerError> {
    plan_checkout(state, headers, Plan::Monthly).await
}

/// Annual subscription checkout, mirroring the monthly handler with its
/// own gateway plan id
pub async fn annual_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SubscriptionResponse>, HandlerError> {
    plan_checkout(state, headers, Plan::Annual).await
}

async fn plan_checkout(
    state: AppState,
    headers: HeaderMap,
    plan: Plan,
) -> Result<Json<SubscriptionResponse>, HandlerError> {
    let email = email_header(&headers);
    tracing::info!(?email, plan = %plan, "Creating subscription");

    let subscription = state
        .razorpay
        .create_plan_subscription(plan)
        .await
        .map_err(|e| {
            tracing::error!("Error creating subscription: {e}");
            internal_error(e)
        })?;

    Ok(Json(SubscriptionResponse {
        subscription,
        email,
    }))
}

/// Pre-save a subscription record with `paid = false`
pub async fn save_subscription(
    State(state): State<AppState>,
    Json(payload): Json<SaveSubscriptionRequest>,
) -> Result<Json<RecordResponse>, HandlerError> {
    let email = payload
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| internal_error("Email is required"))?;
    let plan = payload
        .plan
        .filter(|p| !p.is_empty())
        .ok_or_else(|| internal_error("Plan is required"))?;
    let plan = Plan::from_code(&plan)
        .ok_or_else(|| internal_error("Invalid plan. Choose M, A, or L."))?;

    let subscription = state.store.create(&email, plan).await.map_err(|e| {
        tracing::error!("Error saving subscription: {e}");
        internal_error(e)
    })?;

    Ok(Json(RecordResponse {
        success: true,
        subscription,
    }))
}

/// Mark the latest record for an email as paid, writing the provider
/// billing fields. Verifies the payment signature when one is supplied.
pub async fn update_subscription(
    State(state): State<AppState>,
    Json(payload): Json<UpdateSubscriptionRequest>,
) -> Result<Json<RecordResponse>, HandlerError> {
    let email = payload
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| internal_error("Email is required"))?;
    let plan_id = payload
        .plan_id
        .filter(|p| !p.is_empty())
        .ok_or_else(|| internal_error("planId is required"))?;

    if let (Some(payment_id), Some(signature)) =
        (&payload.razorpay_payment_id, &payload.razorpay_signature)
    {
        // Order ids are prefixed "order_", subscription ids "sub_"; the
        // signed message differs between the two
        let message = if plan_id.starts_with("order_") {
            order_message(&plan_id, payment_id)
        } else {
            subscription_message(payment_id, &plan_id)
        };
        verify_signature(&message, signature, state.razorpay.key_secret()).map_err(|e| {
            tracing::warn!(%email, "Payment signature rejected");
            internal_error(e)
        })?;
    }

    let update = SubscriptionUpdate {
        plan_id,
        quantity: payload.quantity,
        current_start: payload.current_start,
        current_end: payload.current_end,
    };

    let subscription = state.store.mark_paid(&email, update).await.map_err(|e| {
        match &e {
            StoreError::NotFound => tracing::warn!(%email, "Update for unknown subscription"),
            other => tracing::error!("Error updating subscription: {other}"),
        }
        internal_error(e)
    })?;

    Ok(Json(RecordResponse {
        success: true,
        subscription,
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use checkout_payments::{RazorpayClient, RazorpayConfig};
    use checkout_store::{MemorySubscriptionStore, SubscriptionStore};

    use super::*;
    use crate::router;

    fn test_state(store: Arc<MemorySubscriptionStore>) -> AppState {
        let config = RazorpayConfig {
            key_id: "rzp_test_key".into(),
            key_secret: "test_secret".into(),
            monthly_plan_id: "plan_monthly".into(),
            annual_plan_id: "plan_annual".into(),
        };
        AppState {
            store,
            razorpay: Arc::new(RazorpayClient::new(config)),
            widget_key_id: "rzp_test_key".into(),
        }
    }

    fn post(path: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_save_subscription_persists_unpaid_record() {
        let store = Arc::new(MemorySubscriptionStore::new());
        let app = router(test_state(store.clone()));

        let response = app
            .oneshot(post(
                "/api/save-subscription",
                serde_json::json!({"email": "x@y.com", "plan": "L"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["subscription"]["email"], "x@y.com");
        assert_eq!(json["subscription"]["plan"], "L");
        assert_eq!(json["subscription"]["paid"], false);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_save_without_plan_names_missing_field_and_persists_nothing() {
        let store = Arc::new(MemorySubscriptionStore::new());
        let app = router(test_state(store.clone()));

        let response = app
            .oneshot(post(
                "/api/save-subscription",
                serde_json::json!({"email": "x@y.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Plan is required");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_without_email_names_missing_field() {
        let store = Arc::new(MemorySubscriptionStore::new());
        let app = router(test_state(store));

        let response = app
            .oneshot(post(
                "/api/save-subscription",
                serde_json::json!({"plan": "M"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Email is required");
    }

    #[tokio::test]
    async fn test_update_marks_latest_record_paid() {
        let store = Arc::new(MemorySubscriptionStore::new());
        store.create("x@y.com", Plan::Monthly).await.unwrap();
        let app = router(test_state(store.clone()));

        let response = app
            .oneshot(post(
                "/api/update-subscription",
                serde_json::json!({
                    "email": "x@y.com",
                    "planId": "sub_123",
                    "quantity": 1,
                    "currentStart": 1_700_000_000,
                    "currentEnd": 1_702_600_000
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["subscription"]["paid"], true);
        assert_eq!(json["subscription"]["planId"], "sub_123");
        // identity fields survive the update
        assert_eq!(json["subscription"]["email"], "x@y.com");
        assert_eq!(json["subscription"]["plan"], "M");
    }

    #[tokio::test]
    async fn test_update_for_unknown_email_is_not_found() {
        let store = Arc::new(MemorySubscriptionStore::new());
        let app = router(test_state(store));

        let response = app
            .oneshot(post(
                "/api/update-subscription",
                serde_json::json!({"email": "ghost@y.com", "planId": "sub_1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Subscription not found");
    }

    #[tokio::test]
    async fn test_update_with_bad_signature_persists_nothing() {
        let store = Arc::new(MemorySubscriptionStore::new());
        store.create("x@y.com", Plan::Lifetime).await.unwrap();
        let app = router(test_state(store.clone()));

        let response = app
            .oneshot(post(
                "/api/update-subscription",
                serde_json::json!({
                    "email": "x@y.com",
                    "planId": "order_123",
                    "razorpayPaymentId": "pay_456",
                    "razorpaySignature": "deadbeef"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let record = store.find_latest_by_email("x@y.com").await.unwrap().unwrap();
        assert!(!record.paid);
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let store = Arc::new(MemorySubscriptionStore::new());
        let app = router(test_state(store));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }
}
