//! Dashboard home page data and the sidebar shell around it.

pub mod data;
pub mod routes;
pub mod shell;

pub use data::DashboardData;
pub use routes::{DashboardRouteState, dashboard_routes};
pub use shell::{DashboardShell, Theme, UiContext};
