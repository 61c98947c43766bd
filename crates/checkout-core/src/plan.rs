//! Subscription Plans
//!
//! Single-letter plan codes drive both pricing and checkout routing.

use serde::{Deserialize, Serialize};

/// Subscription plan, selected by single-letter code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    /// "M" - monthly recurring subscription
    #[serde(rename = "M")]
    Monthly,

    /// "A" - annual recurring subscription
    #[serde(rename = "A")]
    Annual,

    /// "L" - lifetime one-time payment
    #[serde(rename = "L")]
    Lifetime,
}

impl Plan {
    /// The single-letter wire code
    pub fn code(&self) -> &'static str {
        match self {
            Plan::Monthly => "M",
            Plan::Annual => "A",
            Plan::Lifetime => "L",
        }
    }

    /// Parse a plan code; only exactly "M", "A", or "L" are accepted
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Plan::Monthly),
            "A" => Some(Plan::Annual),
            "L" => Some(Plan::Lifetime),
            _ => None,
        }
    }

    /// Checkout endpoint for this plan. Recurring plans get their own
    /// subscription endpoints; everything else falls through to the
    /// direct one-time-payment endpoint.
    pub fn checkout_path(&self) -> &'static str {
        match self {
            Plan::Monthly => "/api/monthly",
            Plan::Annual => "/api/annual",
            _ => "/api/direct",
        }
    }

    /// Get pricing for this plan
    pub fn pricing(&self) -> PlanPricing {
        match self {
            Plan::Monthly => PlanPricing {
                name: "Monthly".into(),
                description: "₹2500/month".into(),
                amount_paise: 250_000,
                interval: BillingInterval::Monthly,
            },
            Plan::Annual => PlanPricing {
                name: "Annual".into(),
                description: "₹1800/month billed annually".into(),
                amount_paise: 2_160_000,
                interval: BillingInterval::Yearly,
            },
            Plan::Lifetime => PlanPricing {
                name: "Lifetime".into(),
                description: "₹60000 once".into(),
                amount_paise: 6_000_000,
                interval: BillingInterval::OneTime,
            },
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Billing interval
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingInterval {
    Monthly,
    Yearly,
    OneTime,
}

/// Pricing information
#[derive(Clone, Debug)]
pub struct PlanPricing {
    pub name: String,
    pub description: String,
    /// Amount in paise (INR subunits)
    pub amount_paise: i64,
    pub interval: BillingInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_codes_round_trip() {
        for code in ["M", "A", "L"] {
            let plan = Plan::from_code(code).unwrap();
            assert_eq!(plan.code(), code);
        }
        assert_eq!(Plan::from_code("X"), None);
        assert_eq!(Plan::from_code("m"), None); // codes are case-sensitive
    }

    #[test]
    fn test_checkout_routing() {
        assert_eq!(Plan::Monthly.checkout_path(), "/api/monthly");
        assert_eq!(Plan::Annual.checkout_path(), "/api/annual");
        assert_eq!(Plan::Lifetime.checkout_path(), "/api/direct");
    }

    #[test]
    fn test_lifetime_pricing() {
        let pricing = Plan::Lifetime.pricing();
        assert_eq!(pricing.amount_paise, 6_000_000);
        assert_eq!(pricing.interval, BillingInterval::OneTime);
    }
}
