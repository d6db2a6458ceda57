use super::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use opsnexus_core::View;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ViewEntry {
    pub id: View,
    pub label: &'static str,
    pub section: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub app_name: String,
    pub current: View,
    pub views: Vec<ViewEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    pub view: String,
}

fn view_response(state: &AppState, current: View) -> ViewResponse {
    ViewResponse {
        app_name: state.config.app_name.clone(),
        current,
        views: View::ALL
            .into_iter()
            .map(|v| ViewEntry {
                id: v,
                label: v.label(),
                section: v.section(),
            })
            .collect(),
    }
}

/// GET /api/v1/view
pub async fn get_view(State(state): State<AppState>) -> Json<ViewResponse> {
    let current = state.router.read().await.current();
    Json(view_response(&state, current))
}

/// PUT /api/v1/view
pub async fn set_view(
    State(state): State<AppState>,
    Json(req): Json<SetViewRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let view: View = req.view.parse()?;
    state.router.write().await.set_view(view);
    Ok(Json(view_response(&state, view)))
}
