//! # checkout-core
//!
//! Domain types shared by the terminal-checkout server and frontend:
//! subscription plans with their pricing and checkout routing, and the
//! conversational intake flow state machine that collects an email and a
//! plan code before checkout.
//!
//! This crate is pure state: no I/O, no async. The frontend drives
//! [`IntakeFlow`] from user-submitted lines; the server shares [`Plan`]
//! for pricing and route selection.

mod error;
mod intake;
mod plan;
mod widget;

pub use error::IntakeError;
pub use intake::{FlowStage, IntakeAnswers, IntakeFlow, Question, QuestionKey};
pub use plan::{BillingInterval, Plan, PlanPricing};
pub use widget::{WidgetNotes, WidgetOptions, WidgetPrefill, WidgetTheme};
