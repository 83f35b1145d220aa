//! API routes for netdraftd.

use crate::gemini;
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use netdraft_common::requirements::NetworkRequirements;
use netdraft_common::rpc::{
    ChatRequest, ChatResponse, DesignResponse, ErrorResponse, HealthResponse,
};
use netdraft_common::topology::generate_design;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Chat Routes
// ============================================================================

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/chat", post(chat))
}

async fn chat(
    State(state): State<AppStateArc>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    // Config problems short-circuit before any network traffic.
    if !state.gemini.has_api_key() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Gemini API key not configured")),
        ));
    }

    let mut context = req.context.unwrap_or_default();
    let prompt = gemini::system_prompt(&context);

    let content = state
        .gemini
        .generate(&prompt, &req.messages)
        .await
        .map_err(|e| {
            error!("  Upstream chat call failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::with_details(
                    "Failed to generate response",
                    e.to_string(),
                )),
            )
        })?;

    let extracted = context.track_reply(&content);
    if !extracted.is_empty() {
        info!("  Extracted fields: {}", extracted.join(", "));
    }

    Ok(Json(ChatResponse { content, context }))
}

// ============================================================================
// Design Routes
// ============================================================================

pub fn design_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/design", post(design))
}

#[derive(Debug, Deserialize)]
struct DesignQuery {
    /// Append AI-generated recommendations from the upstream model
    #[serde(default)]
    ai: bool,
}

async fn design(
    State(state): State<AppStateArc>,
    Query(query): Query<DesignQuery>,
    Json(mut req): Json<NetworkRequirements>,
) -> Result<Json<DesignResponse>, ApiError> {
    req.normalize();
    info!(
        departments = req.departments.len(),
        redundancy = req.redundancy,
        "  Generating design"
    );

    let design = generate_design(&req);
    let mut recommendations = design.output.recommendations;

    if query.ai && state.gemini.has_api_key() {
        // Enrichment is best-effort; a failing upstream never fails the run.
        match state.gemini.ai_recommendations(&req).await {
            Ok(extra) => {
                recommendations.push_str("\n<h3>AI-Generated Recommendations:</h3>\n");
                recommendations.push_str(extra.trim());
            }
            Err(e) => warn!("  AI recommendations skipped: {e}"),
        }
    }

    Ok(Json(DesignResponse {
        graph: design.graph,
        ip_allocation: design.output.ip_allocation,
        recommendations,
        cost_estimate: design.output.cost_estimate,
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
