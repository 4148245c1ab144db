//! REST endpoints for the dashboard home page and shell.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use super::data::DashboardData;
use super::shell::{DashboardShell, Theme, UiContext};

/// Shared state for dashboard routes.
#[derive(Clone)]
pub struct DashboardRouteState {
    /// Service-wide default UI context.
    pub ui: UiContext,
}

/// Per-request overrides for the shell.
#[derive(Debug, Default, Deserialize)]
pub struct ShellQuery {
    pub path: Option<String>,
    pub theme: Option<Theme>,
    pub collapsed: Option<bool>,
}

impl ShellQuery {
    fn ui_context(&self, default: UiContext) -> UiContext {
        UiContext {
            theme: self.theme.unwrap_or(default.theme),
            sidebar_collapsed: self.collapsed.unwrap_or(default.sidebar_collapsed),
        }
    }
}

pub fn dashboard_routes(state: DashboardRouteState) -> Router {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/shell", get(get_shell))
        .with_state(state)
}

/// GET /api/dashboard
async fn get_dashboard() -> impl IntoResponse {
    Json(DashboardData::mock())
}

/// GET /api/dashboard/shell?path=&theme=&collapsed=
async fn get_shell(
    State(state): State<DashboardRouteState>,
    Query(query): Query<ShellQuery>,
) -> impl IntoResponse {
    let ui = query.ui_context(state.ui);
    let path = query.path.as_deref().unwrap_or("/dashboard");
    Json(DashboardShell::build(ui, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_overrides_default_context() {
        let default = UiContext {
            theme: Theme::Light,
            sidebar_collapsed: false,
        };

        let query = ShellQuery {
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        assert_eq!(
            query.ui_context(default),
            UiContext {
                theme: Theme::Dark,
                sidebar_collapsed: false
            }
        );

        let query = ShellQuery {
            collapsed: Some(true),
            ..Default::default()
        };
        assert_eq!(query.ui_context(default).theme, Theme::Light);
        assert!(query.ui_context(default).sidebar_collapsed);
    }
}
