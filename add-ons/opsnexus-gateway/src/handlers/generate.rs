//! Generation endpoints: SOP draft, support reply, feedback report.
//!
//! Each answers `200` with display-ready text even when the model is unavailable;
//! `status` tells the page which case it got.

use super::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use opsnexus_core::catalog::combined_feedback;
use opsnexus_core::{
    render, to_html, Action, DisplayBlock, GenerationError, GenerationResult, InputError, Theme,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SopRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub query: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Ok,
    NotConfigured,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub action: Action,
    pub status: GenerationStatus,
    pub text: String,
    pub blocks: Vec<DisplayBlock>,
    pub html: String,
}

impl GenerationResponse {
    fn new(action: Action, result: &GenerationResult<String>, theme: Theme) -> Self {
        let status = match result {
            Ok(_) => GenerationStatus::Ok,
            Err(GenerationError::ConfigurationMissing) => GenerationStatus::NotConfigured,
            Err(GenerationError::GenerationFailed { .. }) => GenerationStatus::Failed,
        };
        let text = action.display_text(result);
        let blocks = render(&text);
        let html = to_html(&blocks, theme);
        Self {
            action,
            status,
            text,
            blocks,
            html,
        }
    }
}

/// POST /api/v1/generate/sop
pub async fn sop(
    State(state): State<AppState>,
    Json(req): Json<SopRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let action = Action::ProcedureDocument;
    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(InputError::Blank("topic").into());
    }
    let _guard = state.in_flight.try_begin(action).ok_or(ApiError::Busy(action))?;

    tracing::info!(%action, topic, "drafting SOP");
    let result = state.gateway.draft_procedure_document(topic).await;
    Ok(Json(GenerationResponse::new(action, &result, Theme::Light)))
}

/// POST /api/v1/generate/reply
pub async fn reply(
    State(state): State<AppState>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let action = Action::SupportReply;
    let query = req.query.trim();
    if query.is_empty() {
        return Err(InputError::Blank("query").into());
    }
    let _guard = state.in_flight.try_begin(action).ok_or(ApiError::Busy(action))?;

    tracing::info!(%action, "drafting support reply");
    let result = state.gateway.draft_support_reply(query, &req.context).await;
    Ok(Json(GenerationResponse::new(action, &result, Theme::Light)))
}

/// POST /api/v1/generate/feedback-report
pub async fn feedback_report(
    State(state): State<AppState>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let action = Action::FeedbackSummary;
    let _guard = state.in_flight.try_begin(action).ok_or(ApiError::Busy(action))?;

    tracing::info!(%action, "summarizing merchant feedback");
    let result = state.gateway.summarize_feedback(&combined_feedback()).await;
    Ok(Json(GenerationResponse::new(action, &result, Theme::Dark)))
}
