//! # checkout-store
//!
//! Persistence gateway for subscription records.
//!
//! A record is created with `paid = false` before any payment attempt and
//! later transitioned to `paid = true` with the provider's billing fields
//! once the checkout widget confirms. Email is the lookup key and is
//! deliberately non-unique: lookups always take the most recently created
//! record, so a repeated flow updates the record it just created.
//!
//! The store is a trait so handlers can be exercised against
//! [`MemorySubscriptionStore`] while production runs on
//! [`MongoSubscriptionStore`], injected once at startup as an
//! `Arc<dyn SubscriptionStore>`.

mod error;
mod memory;
mod mongo;
mod record;
mod store;

pub use error::{Result, StoreError};
pub use memory::MemorySubscriptionStore;
pub use mongo::MongoSubscriptionStore;
pub use record::{SubscriptionRecord, SubscriptionUpdate};
pub use store::SubscriptionStore;
