//! # checkout-payments
//!
//! Razorpay integration for terminal-checkout.
//!
//! Razorpay has no SDK crate, so this is a thin REST wrapper over
//! `reqwest` covering the two operations the checkout flow needs:
//!
//! - **Orders** (`POST /v1/orders`) for one-time lifetime payments
//! - **Subscriptions** (`POST /v1/subscriptions`) for monthly/annual plans
//!
//! Both return opaque provider ids that the browser-side checkout widget
//! consumes. After the widget's completion callback, the payment
//! signature it hands back can be verified with [`verify_signature`]
//! before the subscription record is marked paid.
//!
//! ```rust,ignore
//! use checkout_payments::RazorpayClient;
//!
//! let client = RazorpayClient::from_env()?;
//! let order = client.create_direct_order(None, None).await?;
//! // hand order.id to the widget as order_id
//! ```

mod error;
mod gateway;
mod signature;

pub use error::{PaymentError, Result};
pub use gateway::{CreateOrder, CreateSubscription, Order, RazorpayClient, RazorpayConfig, Subscription};
pub use signature::{order_message, subscription_message, verify_signature};
