//! Checkout Orchestration
//!
//! The sequence triggered from the summary confirm: pre-save the record,
//! create the gateway order or subscription for the chosen plan, open the
//! payment widget, and on completion mark the record paid. Each step is
//! conditioned on the previous one; there is no rollback, a failure simply
//! halts the sequence with a visible message.

use serde_json::Value;

use checkout_core::{IntakeAnswers, Plan, WidgetOptions};

use crate::api;
use crate::razorpay::{self, CheckoutOutcome};

/// Run the full checkout sequence for a completed intake flow.
///
/// Errors are user-facing strings for the terminal's error line.
pub async fn run_checkout(answers: IntakeAnswers) -> Result<(), String> {
    api::save_subscription(&answers.email, answers.plan).await?;

    let checkout = api::create_checkout(answers.plan, &answers.email).await?;
    let entity_id = checkout["id"]
        .as_str()
        .ok_or("Gateway response carried no id")?
        .to_string();

    let key = api::widget_key().await?;
    let options = widget_options(&key, answers.plan, &entity_id, &checkout, &answers.email);

    match razorpay::open_checkout(&options).await? {
        CheckoutOutcome::Completed(confirmation) => {
            api::update_subscription(&answers.email, &entity_id, &checkout, &confirmation).await
        }
        CheckoutOutcome::Dismissed => {
            Err("Payment window was closed before completing.".into())
        }
    }
}

/// One-time orders thread the order id plus an explicit amount; recurring
/// plans thread the subscription id instead.
fn widget_options(
    key: &str,
    plan: Plan,
    entity_id: &str,
    checkout: &Value,
    email: &str,
) -> WidgetOptions {
    match plan {
        Plan::Lifetime => {
            let amount = checkout["amount"]
                .as_i64()
                .unwrap_or_else(|| plan.pricing().amount_paise);
            WidgetOptions::for_order(key, entity_id, amount, email)
        }
        _ => WidgetOptions::for_subscription(key, entity_id, email),
    }
}
