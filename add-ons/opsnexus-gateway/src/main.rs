//! CS Ops Nexus Gateway: serves the dashboard page and its JSON API.
//!
//! The page is a stateless client; the Gemini credential stays in this process.

mod handlers;
mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use handlers::{generate, navigation, screens};
use opsnexus_core::{GeminiClient, NexusConfig};
use state::AppState;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DASHBOARD_PAGE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));
const RECOVERY_PAGE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/recovery.html"));

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[opsnexus] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match NexusConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("config: {}", e);
            std::process::exit(1);
        }
    };

    let gemini = GeminiClient::from_env(&config.llm);
    if !gemini.is_configured() {
        tracing::warn!("Hint: set API_KEY in .env for live drafting; actions will answer with a not-configured notice");
    }
    tracing::info!(model = gemini.model(), "LLM gateway ready");

    let addr = config.bind_addr();
    let app = build_router(AppState::new(config, Arc::new(gemini)));

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("CS Ops Nexus listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server: {}", e);
        std::process::exit(1);
    }
}

fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(serve_dashboard))
        .route("/health", get(health))
        .route("/api/v1/view", get(navigation::get_view).put(navigation::set_view))
        .route("/api/v1/dashboard", get(screens::dashboard))
        .route("/api/v1/onboarding", get(screens::onboarding))
        .route("/api/v1/analytics", get(screens::analytics))
        .route("/api/v1/manual", get(screens::manual))
        .route(
            "/api/v1/projects",
            get(screens::list_projects).post(screens::save_project),
        )
        .route(
            "/api/v1/faqs",
            get(screens::list_faqs).post(screens::archive_faq),
        )
        .route("/api/v1/generate/sop", post(generate::sop))
        .route("/api/v1/generate/reply", post(generate::reply))
        .route("/api/v1/generate/feedback-report", post(generate::feedback_report))
        .layer(local_cors())
        .with_state(state);
    with_recovery(api)
}

/// Lets a page served from another local port (dev server) call the API.
fn local_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            let s = origin.to_str().unwrap_or("");
            s.starts_with("http://localhost:") || s.starts_with("http://127.0.0.1:")
        }))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}

/// Any panic while handling a request is answered with the recovery page.
fn with_recovery(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(recovery_response))
}

fn recovery_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("request handler panicked: {}", detail);
    (StatusCode::INTERNAL_SERVER_ERROR, Html(RECOVERY_PAGE)).into_response()
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use opsnexus_core::{Action, GenerationError, GenerationResult, LlmGateway};
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Answers every prompt with a fixed result and remembers the prompts.
    struct StubGateway {
        reply: GenerationResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGateway {
        fn new(reply: GenerationResult<String>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl LlmGateway for StubGateway {
        async fn generate(&self, prompt: &str) -> GenerationResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn test_state(gateway: Arc<StubGateway>) -> AppState {
        AppState::new(NexusConfig::default(), gateway)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_and_page() {
        let app = build_router(test_state(StubGateway::new(Ok(String::new()))));
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("CS Ops Nexus"));
    }

    #[tokio::test]
    async fn view_switch_round_trip() {
        let state = test_state(StubGateway::new(Ok(String::new())));

        let (status, json) = send(build_router(state.clone()), "GET", "/api/v1/view", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current"], "DASHBOARD");
        assert_eq!(json["views"].as_array().unwrap().len(), 6);
        assert_eq!(json["views"][1]["label"], "团队运营 & SOP");

        let (status, json) = send(
            build_router(state.clone()),
            "PUT",
            "/api/v1/view",
            Some(json!({ "view": "ANALYTICS" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current"], "ANALYTICS");
        assert_eq!(state.router.read().await.current(), opsnexus_core::View::Analytics);
    }

    #[tokio::test]
    async fn unknown_view_is_bad_request() {
        let state = test_state(StubGateway::new(Ok(String::new())));
        let (status, json) = send(
            build_router(state.clone()),
            "PUT",
            "/api/v1/view",
            Some(json!({ "view": "SETTINGS" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("SETTINGS"));
        assert_eq!(state.router.read().await.current(), opsnexus_core::View::Dashboard);
    }

    #[tokio::test]
    async fn sop_generation_returns_rendered_blocks() {
        let gateway = StubGateway::new(Ok("## 目标\n- **快速** 入驻\n\n1. 提交".to_string()));
        let state = test_state(gateway.clone());

        let (status, json) = send(
            build_router(state.clone()),
            "POST",
            "/api/v1/generate/sop",
            Some(json!({ "topic": "KYB 指南" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["action"], "procedure_document");
        let blocks = json["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0]["kind"], "heading");
        assert_eq!(blocks[0]["level"], 2);
        assert_eq!(blocks[1]["text"][0], json!({ "kind": "bold", "text": "快速" }));
        assert_eq!(blocks[2]["kind"], "blank");
        assert_eq!(blocks[3]["ordinal"], "1.");
        assert!(json["html"].as_str().unwrap().contains("<strong>快速</strong>"));

        assert!(gateway.prompts.lock().unwrap()[0].contains("KYB 指南"));
        assert!(!state.in_flight.is_busy(Action::ProcedureDocument));
    }

    #[tokio::test]
    async fn blank_topic_is_rejected_without_calling_model() {
        let gateway = StubGateway::new(Ok("unused".to_string()));
        let (status, _) = send(
            build_router(test_state(gateway.clone())),
            "POST",
            "/api/v1/generate/sop",
            Some(json!({ "topic": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(gateway.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_answers_with_notice() {
        let gateway = StubGateway::new(Err(GenerationError::ConfigurationMissing));
        let (status, json) = send(
            build_router(test_state(gateway)),
            "POST",
            "/api/v1/generate/reply",
            Some(json!({ "query": "费率是多少？" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "not_configured");
        assert_eq!(json["text"], Action::SupportReply.not_configured_message());
        assert_eq!(json["blocks"][0]["kind"], "paragraph");
    }

    #[tokio::test]
    async fn failed_feedback_report_uses_dark_theme_fallback() {
        let gateway = StubGateway::new(Err(GenerationError::failed("503")));
        let (status, json) = send(
            build_router(test_state(gateway.clone())),
            "POST",
            "/api/v1/generate/feedback-report",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "failed");
        assert_eq!(json["text"], "情感分析时出错。");
        assert!(json["html"].as_str().unwrap().starts_with(r#"<div class="md md-dark">"#));
        assert!(gateway.prompts.lock().unwrap()[0].contains("集成测试只用了半天"));
    }

    #[tokio::test]
    async fn busy_action_is_conflict() {
        let gateway = StubGateway::new(Ok("x".to_string()));
        let state = test_state(gateway.clone());
        let _pending = state.in_flight.try_begin(Action::ProcedureDocument).unwrap();

        let (status, _) = send(
            build_router(state.clone()),
            "POST",
            "/api/v1/generate/sop",
            Some(json!({ "topic": "重复点击" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(gateway.prompts.lock().unwrap().is_empty());

        let (status, _) = send(
            build_router(state),
            "POST",
            "/api/v1/generate/reply",
            Some(json!({ "query": "其他按钮不受影响" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn saved_project_and_archived_faq_show_up_first() {
        let state = test_state(StubGateway::new(Ok(String::new())));

        let (status, json) = send(
            build_router(state.clone()),
            "POST",
            "/api/v1/projects",
            Some(json!({ "topic": "退款 SOP" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["completion"], 20);
        assert_eq!(json["phase"], "AI 初稿生成");

        let (_, json) = send(build_router(state.clone()), "GET", "/api/v1/projects", None).await;
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[0]["title"], "退款 SOP");

        let (status, _) = send(
            build_router(state.clone()),
            "POST",
            "/api/v1/faqs",
            Some(json!({ "question": "退款多久到账？", "answer": "1-3 个工作日。" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, json) = send(
            build_router(state),
            "GET",
            "/api/v1/faqs?q=%E5%BD%92%E6%A1%A3",
            None,
        )
        .await;
        let hits = json.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["question"], "退款多久到账？");
    }

    #[tokio::test]
    async fn screen_data_endpoints() {
        let state = test_state(StubGateway::new(Ok(String::new())));

        let (_, json) = send(build_router(state.clone()), "GET", "/api/v1/dashboard", None).await;
        assert_eq!(json["stats"].as_array().unwrap().len(), 4);

        let (_, json) = send(build_router(state.clone()), "GET", "/api/v1/onboarding", None).await;
        assert_eq!(json["in_progress"], 12);
        let sandbox = &json["stages"][1]["merchants"];
        assert_eq!(sandbox[0]["health_score"], 60);
        assert_eq!(sandbox[0]["health"], "watch");
        assert_eq!(sandbox[1]["health"], "healthy");
        assert_eq!(json["stages"][0]["merchants"][1]["health"], "at_risk");

        let (_, json) = send(build_router(state.clone()), "GET", "/api/v1/analytics", None).await;
        assert_eq!(json["csat"].as_array().unwrap().len(), 4);

        let (_, json) = send(build_router(state), "GET", "/api/v1/manual", None).await;
        assert_eq!(json["blocks"][0]["kind"], "heading");
        assert_eq!(json["blocks"][0]["level"], 1);
    }

    #[tokio::test]
    async fn panic_is_answered_with_recovery_page() {
        async fn boom() -> &'static str {
            panic!("render failed")
        }
        let app = with_recovery(Router::new().route("/boom", get(boom)));
        let res = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("API_KEY"));
    }
}
