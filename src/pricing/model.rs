//! Subscription plans and savings math.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// List price of one month on the monthly plan; savings are measured
/// against paying this every month.
pub const BASE_MONTHLY_PRICE: Decimal = dec!(29.99);

/// Length of the free trial every plan includes.
pub const TRIAL_DAYS: u32 = 14;

const PLAN_FEATURES: &[&str] = &[
    "Unlimited projects",
    "100GB storage",
    "Advanced analytics",
    "Priority support",
    "API access",
    "Team collaboration",
    "Custom integrations",
    "Mobile app access",
    "24/7 customer support",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingPeriod {
    Monthly,
    Annually,
    BiAnnually,
}

impl BillingPeriod {
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Annually => 12,
            Self::BiAnnually => 24,
        }
    }

    /// Advertised discount, rounded for display.
    pub fn savings_percentage(&self) -> u32 {
        match self {
            Self::Monthly => 0,
            Self::Annually => 17,
            Self::BiAnnually => 25,
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Annually => write!(f, "annually"),
            Self::BiAnnually => write!(f, "bi-annually"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub billing_period: BillingPeriod,
    pub price: Decimal,
    pub features: &'static [&'static str],
}

impl Plan {
    /// Amount saved versus paying the base monthly price for the same span.
    /// Never negative.
    pub fn savings(&self) -> Decimal {
        if self.billing_period == BillingPeriod::Monthly {
            return Decimal::ZERO;
        }
        let monthly_total = BASE_MONTHLY_PRICE * Decimal::from(self.billing_period.months());
        (monthly_total - self.price).max(Decimal::ZERO)
    }
}

/// A plan as listed on the pricing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanListing {
    #[serde(flatten)]
    pub plan: Plan,
    pub savings: Decimal,
    pub savings_percentage: u32,
    pub trial_days: u32,
}

impl From<Plan> for PlanListing {
    fn from(plan: Plan) -> Self {
        Self {
            savings: plan.savings(),
            savings_percentage: plan.billing_period.savings_percentage(),
            trial_days: TRIAL_DAYS,
            plan,
        }
    }
}

pub fn plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "monthly",
            name: "Monthly",
            billing_period: BillingPeriod::Monthly,
            price: dec!(29.99),
            features: PLAN_FEATURES,
        },
        Plan {
            id: "annually",
            name: "Annual",
            billing_period: BillingPeriod::Annually,
            price: dec!(299.99),
            features: PLAN_FEATURES,
        },
        Plan {
            id: "bi-annually",
            name: "Bi-Annual",
            billing_period: BillingPeriod::BiAnnually,
            price: dec!(539.99),
            features: PLAN_FEATURES,
        },
    ]
}

pub fn find_plan(id: &str) -> Option<Plan> {
    plans().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_plans() {
        let all = plans();
        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["monthly", "annually", "bi-annually"]);
        assert!(all.iter().all(|p| p.features.len() == 9));
    }

    #[test]
    fn savings_against_base_monthly_price() {
        let monthly = find_plan("monthly").unwrap();
        assert_eq!(monthly.savings(), Decimal::ZERO);

        // 29.99 * 12 - 299.99
        let annual = find_plan("annually").unwrap();
        assert_eq!(annual.savings(), dec!(59.89));

        // 29.99 * 24 - 539.99
        let bi_annual = find_plan("bi-annually").unwrap();
        assert_eq!(bi_annual.savings(), dec!(179.77));
    }

    #[test]
    fn savings_never_negative() {
        let overpriced = Plan {
            price: dec!(999.00),
            ..find_plan("annually").unwrap()
        };
        assert_eq!(overpriced.savings(), Decimal::ZERO);
    }

    #[test]
    fn listing_includes_percentages() {
        let listing = PlanListing::from(find_plan("bi-annually").unwrap());
        assert_eq!(listing.savings_percentage, 25);
        assert_eq!(listing.trial_days, 14);

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["billingPeriod"], "bi-annually");
        assert_eq!(json["price"], "539.99");
        assert_eq!(json["id"], "bi-annually");
    }

    #[test]
    fn unknown_plan_is_none() {
        assert!(find_plan("weekly").is_none());
    }
}
