//! HTTP handlers for the job posting routes.
//!
//! Each handler forwards to the shared `JobService`. The configured
//! `ErrorMode` decides whether a missing id is reported as `null` / silent
//! success (lenient) or as a 404 (strict).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::service::JobService;
use domain::{CoreError, JobPost, PostId};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::ErrorMode;
use crate::store::AnyRepo;

pub const DELETED_MESSAGE: &str = "Job deleted";
pub const LOADED_MESSAGE: &str = "Jobs loaded";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<JobService<AnyRepo>>,
    pub error_mode: ErrorMode,
}

impl AppState {
    pub fn new(service: JobService<AnyRepo>, error_mode: ErrorMode) -> Self {
        Self {
            service: Arc::new(service),
            error_mode,
        }
    }

    fn strict(&self) -> bool {
        self.error_mode == ErrorMode::Strict
    }
}

#[derive(Serialize)]
struct HealthOut {
    status: &'static str,
    storage: &'static str,
}

fn internal_error(op: &str, e: CoreError) -> Response {
    error!(op, err = %e, "store error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(http_common::json_error_with_message(
            "internal",
            "server error",
        )),
    )
        .into_response()
}

fn not_found(post_id: PostId) -> Response {
    warn!(post_id, "job post not found");
    (
        StatusCode::NOT_FOUND,
        Json(http_common::json_err("not_found")),
    )
        .into_response()
}

fn invalid(e: CoreError) -> Response {
    warn!(err = %e, "rejected job post");
    let message = match e {
        CoreError::InvalidPost(msg) => msg,
        other => other.to_string(),
    };
    (
        StatusCode::BAD_REQUEST,
        Json(http_common::json_error_with_message(
            "invalid_request",
            &message,
        )),
    )
        .into_response()
}

/// Strict mode only: validate the body before it reaches the store.
fn check_valid(state: &AppState, post: &JobPost) -> Result<(), Response> {
    if state.strict() {
        domain::validate::validate_job_post(post).map_err(invalid)?;
    }
    Ok(())
}

/// Strict mode only: reject ids the store does not hold.
fn check_exists(state: &AppState, post_id: PostId) -> Result<(), Response> {
    if !state.strict() {
        return Ok(());
    }
    match state.service.get(post_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(post_id)),
        Err(e) => Err(internal_error("get", e)),
    }
}

/// Re-read a posting after a write, the way every mutating route answers.
fn respond_with_post(state: &AppState, post_id: PostId) -> Response {
    match state.service.get(post_id) {
        Ok(Some(post)) => (StatusCode::OK, Json(Some(post))).into_response(),
        Ok(None) if state.strict() => not_found(post_id),
        Ok(None) => (StatusCode::OK, Json(None::<JobPost>)).into_response(),
        Err(e) => internal_error("get", e),
    }
}

pub async fn list_jobs(State(state): State<AppState>) -> Response {
    match state.service.list() {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(e) => internal_error("list", e),
    }
}

pub async fn search_jobs(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Response {
    match state.service.search(&keyword) {
        Ok(posts) => {
            info!(keyword = %keyword, hits = posts.len(), "search ok");
            (StatusCode::OK, Json(posts)).into_response()
        }
        Err(e) => internal_error("search", e),
    }
}

pub async fn get_job(State(state): State<AppState>, Path(post_id): Path<PostId>) -> Response {
    respond_with_post(&state, post_id)
}

pub async fn create_job(State(state): State<AppState>, Json(post): Json<JobPost>) -> Response {
    if let Err(resp) = check_valid(&state, &post) {
        return resp;
    }
    let post_id = post.post_id;
    if let Err(e) = state.service.create(post) {
        return internal_error("create", e);
    }
    info!(post_id, "create ok");
    respond_with_post(&state, post_id)
}

pub async fn update_job(State(state): State<AppState>, Json(post): Json<JobPost>) -> Response {
    if let Err(resp) = check_valid(&state, &post) {
        return resp;
    }
    if let Err(resp) = check_exists(&state, post.post_id) {
        return resp;
    }
    if let Err(e) = state.service.update(&post) {
        return internal_error("update", e);
    }
    info!(post_id = post.post_id, "update ok");
    respond_with_post(&state, post.post_id)
}

pub async fn delete_job(State(state): State<AppState>, Path(post_id): Path<PostId>) -> Response {
    if let Err(resp) = check_exists(&state, post_id) {
        return resp;
    }
    match state.service.delete(post_id) {
        Ok(()) => {
            info!(post_id, "delete ok");
            (StatusCode::OK, DELETED_MESSAGE).into_response()
        }
        Err(e) => internal_error("delete", e),
    }
}

pub async fn load_jobs(State(state): State<AppState>) -> Response {
    match state.service.load() {
        Ok(count) => {
            info!(count, "sample jobs loaded");
            (StatusCode::OK, LOADED_MESSAGE).into_response()
        }
        Err(e) => internal_error("load", e),
    }
}

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthOut {
        status: "ok",
        storage: state.service.repository().backend_name(),
    })
}
