//! REST endpoints for plan listing and selection.

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::model::{PlanListing, find_plan, plans};
use crate::error::{Error, PricingError};
use crate::server::error_response;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlanRequest {
    pub plan_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlanResponse {
    pub plan_id: &'static str,
    pub status: &'static str,
    /// Where the client goes once payment is handled.
    pub redirect_to: String,
}

pub fn pricing_routes() -> Router {
    Router::new()
        .route("/api/pricing/plans", get(list_plans))
        .route("/api/pricing/select", post(select_plan))
}

/// GET /api/pricing/plans
async fn list_plans() -> impl IntoResponse {
    let listings: Vec<PlanListing> = plans().into_iter().map(PlanListing::from).collect();
    Json(listings)
}

/// POST /api/pricing/select
///
/// Payment is handled elsewhere; this only confirms the plan exists and
/// tells the client where to go next.
async fn select_plan(Json(body): Json<SelectPlanRequest>) -> Response {
    match find_plan(&body.plan_id) {
        Some(plan) => {
            info!(plan_id = plan.id, period = %plan.billing_period, "Plan selected");
            Json(SelectPlanResponse {
                plan_id: plan.id,
                status: "selected",
                redirect_to: format!("/dashboard?plan={}", plan.id),
            })
            .into_response()
        }
        None => error_response(&Error::from(PricingError::UnknownPlan {
            plan_id: body.plan_id,
        })),
    }
}
