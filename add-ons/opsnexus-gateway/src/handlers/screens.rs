//! Read-mostly screen data: dashboard, onboarding, analytics, manual, projects, FAQs.

use super::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, Utc};
use opsnexus_core::catalog::{
    self, FaqEntry, Objective, PipelineStage, Project, SeriesPoint, StatCard,
};
use opsnexus_core::{render, to_html, DisplayBlock, Theme};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: Vec<StatCard>,
    pub objectives: Vec<Objective>,
}

/// GET /api/v1/dashboard
pub async fn dashboard() -> Json<DashboardResponse> {
    Json(DashboardResponse {
        stats: catalog::stat_cards(),
        objectives: catalog::objectives(),
    })
}

#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub average_days: &'static str,
    pub in_progress: usize,
    pub stages: Vec<PipelineStage>,
}

/// GET /api/v1/onboarding
pub async fn onboarding() -> Json<OnboardingResponse> {
    let stages = catalog::onboarding_pipeline();
    Json(OnboardingResponse {
        average_days: "3.2 天",
        in_progress: stages.iter().map(|s| s.count).sum(),
        stages,
    })
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub onboarding_days: Vec<SeriesPoint>,
    pub csat: Vec<SeriesPoint>,
    pub feedback_samples: Vec<&'static str>,
}

/// GET /api/v1/analytics
pub async fn analytics() -> Json<AnalyticsResponse> {
    Json(AnalyticsResponse {
        onboarding_days: catalog::onboarding_days_by_month(),
        csat: catalog::csat_by_week(),
        feedback_samples: catalog::FEEDBACK_SAMPLES.to_vec(),
    })
}

#[derive(Debug, Serialize)]
pub struct ManualResponse {
    pub blocks: Vec<DisplayBlock>,
    pub html: String,
}

/// GET /api/v1/manual
pub async fn manual() -> Json<ManualResponse> {
    let blocks = render(catalog::USER_MANUAL);
    let html = to_html(&blocks, Theme::Light);
    Json(ManualResponse { blocks, html })
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub phase: &'static str,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            phase: project.phase(),
            project: project.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveProjectRequest {
    pub topic: String,
}

/// GET /api/v1/projects
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<ProjectView>> {
    let board = state.projects.read().await;
    Json(board.projects().iter().map(ProjectView::from).collect())
}

/// POST /api/v1/projects
pub async fn save_project(
    State(state): State<AppState>,
    Json(req): Json<SaveProjectRequest>,
) -> Result<(StatusCode, Json<ProjectView>), ApiError> {
    let mut board = state.projects.write().await;
    let saved = ProjectView::from(board.save_draft(&req.topic, Local::now().date_naive())?);
    tracing::info!(title = %saved.project.title, "SOP draft saved to project board");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[derive(Debug, Deserialize)]
pub struct FaqQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveFaqRequest {
    pub question: String,
    pub answer: String,
}

/// GET /api/v1/faqs?q=
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<FaqQuery>,
) -> Json<Vec<FaqEntry>> {
    let book = state.faqs.read().await;
    Json(book.search(&query.q).into_iter().cloned().collect())
}

/// POST /api/v1/faqs
pub async fn archive_faq(
    State(state): State<AppState>,
    Json(req): Json<ArchiveFaqRequest>,
) -> Result<(StatusCode, Json<FaqEntry>), ApiError> {
    let mut book = state.faqs.write().await;
    let entry = book.archive(&req.question, &req.answer, Utc::now())?.clone();
    tracing::info!(id = %entry.id, "reply archived to FAQ");
    Ok((StatusCode::CREATED, Json(entry)))
}
