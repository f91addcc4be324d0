//! Axum route handlers for the Dashboard API.

use axum::extract::State;

use crate::dashboard::summary::{summarize, DashboardSummary};
use crate::response::{success, ApiQuery, ApiResult, UserScope};
use crate::state::AppState;

/// GET /api/v1/dashboard?user_id=
pub async fn handle_dashboard(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<UserScope>,
) -> ApiResult<DashboardSummary> {
    let (rankings, backlinks, content) = tokio::try_join!(
        state.store.list_rankings(scope.user_id),
        state.store.list_backlinks(scope.user_id),
        state.store.list_content(scope.user_id),
    )?;
    success(summarize(&rankings, &backlinks, &content))
}
