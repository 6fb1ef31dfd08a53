//! Session lifecycle and behavioral event intake.
//!
//! - `POST /api/v1/sessions`               create a fresh profile
//! - `GET  /api/v1/sessions/{id}`          current profile
//! - `POST /api/v1/sessions/{id}/events`   track one behavioral event
//! - `POST /api/v1/sessions/{id}/reset`    clear everything learned
//! - `GET  /api/v1/sessions/{id}/insight`  narrative summary of the profile

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shopwise_core::confidence::{calculate_confidence, confidence_label};
use shopwise_core::domain::product::{CategoryId, ProductId};
use shopwise_core::domain::session::{BehaviorEvent, EventKind, SessionId, SessionProfile};
use shopwise_core::learner::{reset_profile, track_event};
use shopwise_core::narrative;
use tracing::info;

use crate::error::{ApiError, ApiJson};
use crate::state::{AppState, SessionGuard};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub product_id: Option<ProductId>,
    pub category: Option<CategoryId>,
    pub query: Option<String>,
    pub timestamp: Option<i64>,
}

impl EventRequest {
    fn into_event(self, now_ms: i64) -> BehaviorEvent {
        BehaviorEvent {
            kind: self.kind,
            product_id: self.product_id,
            category: self.category,
            query: self.query,
            timestamp: self.timestamp.unwrap_or(now_ms),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    pub session_insight: String,
    pub price_sensitivity_insight: String,
    pub interaction_count: u64,
    pub learning_status: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/sessions", post(create_session))
        .route("/api/v1/sessions/{id}", get(get_session))
        .route("/api/v1/sessions/{id}/events", post(track_session_event))
        .route("/api/v1/sessions/{id}/reset", post(reset_session))
        .route("/api/v1/sessions/{id}/insight", get(session_insight))
}

pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) async fn load_profile(
    state: &AppState,
    session_id: &SessionId,
) -> Result<SessionProfile, ApiError> {
    state
        .sessions
        .find(session_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("session `{session_id}` does not exist")))
}

/// Takes the session's lock once the session is known to exist, so unknown ids
/// never enter the lock map.
pub(crate) async fn lock_session(
    state: &AppState,
    session_id: &SessionId,
) -> Result<SessionGuard, ApiError> {
    load_profile(state, session_id).await?;
    Ok(state.locks.acquire(session_id).await)
}

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionProfile>), ApiError> {
    let profile = SessionProfile::empty(SessionId::generate(), now_ms());
    state.sessions.save(profile.clone()).await?;

    info!(
        event_name = "session.created",
        session_id = %profile.session_id,
        "session created"
    );
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionProfile>, ApiError> {
    Ok(Json(load_profile(&state, &SessionId(id)).await?))
}

async fn track_session_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<EventRequest>,
) -> Result<Json<SessionProfile>, ApiError> {
    let session_id = SessionId(id);
    let event = body.into_event(now_ms());

    let _guard = lock_session(&state, &session_id).await?;
    let profile = load_profile(&state, &session_id).await?;
    let updated = track_event(&profile, &event, &state.catalog);
    state.sessions.save(updated.clone()).await?;

    info!(
        event_name = "session.event.tracked",
        session_id = %session_id,
        event_type = event.kind.as_str(),
        interaction_count = updated.interaction_count,
        "behavioral event tracked"
    );
    Ok(Json(updated))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionProfile>, ApiError> {
    let session_id = SessionId(id);

    let _guard = lock_session(&state, &session_id).await?;
    let profile = reset_profile(&session_id, now_ms());
    state.sessions.save(profile.clone()).await?;

    info!(event_name = "session.reset", session_id = %session_id, "session profile reset");
    Ok(Json(profile))
}

async fn session_insight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InsightResponse>, ApiError> {
    let profile = load_profile(&state, &SessionId(id)).await?;
    let profile_confidence = calculate_confidence(&profile, &[]);

    Ok(Json(InsightResponse {
        session_insight: narrative::session_insight(&profile, &state.catalog),
        price_sensitivity_insight: narrative::price_sensitivity_insight(
            profile.price_range.sensitivity,
        )
        .to_owned(),
        interaction_count: profile.interaction_count,
        learning_status: confidence_label(profile_confidence),
    }))
}
