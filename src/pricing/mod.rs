//! Pricing page: plan catalog and selection.

pub mod model;
pub mod routes;

pub use model::{BillingPeriod, Plan, PlanListing, find_plan, plans};
pub use routes::pricing_routes;
