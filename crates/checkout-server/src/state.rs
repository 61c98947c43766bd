//! Application State

use std::sync::Arc;

use checkout_payments::RazorpayClient;
use checkout_store::SubscriptionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Subscription record store (MongoDB in production)
    pub store: Arc<dyn SubscriptionStore>,

    /// Razorpay gateway client
    pub razorpay: Arc<RazorpayClient>,

    /// Public key id handed to the browser-side checkout widget
    pub widget_key_id: String,
}
