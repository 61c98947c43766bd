//! API Client
//!
//! Thin wrappers over the backend endpoints. Failure bodies carry
//! `{ "error": message }`; the message is surfaced as the Err string so
//! the terminal can print it.
//!
//! `reqwest` refuses relative URLs on every target, so each path is
//! rooted at the page's own origin before the request is built.

use serde_json::Value;

use checkout_core::Plan;

use crate::razorpay::PaymentConfirmation;

/// Join a backend path onto an origin
fn join(origin: &str, path: &str) -> String {
    format!("{origin}{path}")
}

/// Absolute URL for a backend path, rooted at `window.location.origin`
fn api_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    join(&origin, path)
}

/// Fetch the public widget key id
pub async fn widget_key() -> Result<String, String> {
    let response = reqwest::Client::new()
        .get(api_url("/api/config"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let data: Value = response.json().await.map_err(|e| e.to_string())?;
    data["keyId"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| "Checkout is not configured".into())
}

/// Pre-save the subscription record with paid set to false
pub async fn save_subscription(email: &str, plan: Plan) -> Result<(), String> {
    let response = reqwest::Client::new()
        .post(api_url("/api/save-subscription"))
        .json(&serde_json::json!({
            "email": email,
            "plan": plan.code(),
            "paid": false,
        }))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_message(response).await)
    }
}

/// Create the gateway order or subscription for a plan. The email travels
/// as a request header, the body is an empty JSON object.
pub async fn create_checkout(plan: Plan, email: &str) -> Result<Value, String> {
    let response = reqwest::Client::new()
        .post(api_url(plan.checkout_path()))
        .header("email", email)
        .json(&serde_json::json!({}))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(error_message(response).await)
    }
}

/// Mark the record paid with the provider's billing identifiers
pub async fn update_subscription(
    email: &str,
    entity_id: &str,
    checkout: &Value,
    confirmation: &PaymentConfirmation,
) -> Result<(), String> {
    let response = reqwest::Client::new()
        .post(api_url("/api/update-subscription"))
        .json(&serde_json::json!({
            "email": email,
            "paid": true,
            "planId": entity_id,
            "quantity": checkout["quantity"],
            "currentStart": checkout["start_at"],
            "currentEnd": checkout["end_at"],
            "razorpayPaymentId": confirmation.payment_id,
            "razorpaySignature": confirmation.signature,
        }))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_message(response).await)
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let data: Value = response.json().await.unwrap_or_default();
    data["error"]
        .as_str()
        .unwrap_or("Request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_urls_are_absolute() {
        let url = join("http://localhost:3000", "/api/config");
        assert_eq!(url, "http://localhost:3000/api/config");
        assert!(!url.starts_with('/'));
    }

    #[test]
    fn test_checkout_paths_join_per_plan() {
        for (plan, path) in [
            (Plan::Monthly, "/api/monthly"),
            (Plan::Annual, "/api/annual"),
            (Plan::Lifetime, "/api/direct"),
        ] {
            let url = join("https://example.com", plan.checkout_path());
            assert_eq!(url, format!("https://example.com{path}"));
        }
    }
}
