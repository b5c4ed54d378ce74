//! Router and handlers.
//!
//! The catalog entities share one generic CRUD router; users, the
//! returns workflow, assessments and admin deletion get dedicated
//! handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tonerqc_store::admin::{delete_record, DeleteTarget};
use tonerqc_store::entities::{NewUser, PublicUser, ReturnedUnit};
use tonerqc_store::{Repository, ReturnLog, UserRepository};
use tonerqc_workflow::{
    dashboard_stats, score_disc, score_five_s, CommitRequest, DiscReport, DiscSubmission,
    FiveSReport, FiveSSubmission, ReturnPreview,
};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    let store = state.store.clone();

    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/returns", get(list_returns).post(commit_return))
        .route("/api/returns/preview", post(preview_return))
        .route("/api/returns/batch", post(preview_batch))
        .route("/api/assessments/five-s", post(assess_five_s))
        .route("/api/assessments/disc", post(assess_disc))
        .route("/api/dashboard/stats", get(stats))
        .route("/api/admin/records", delete(delete_admin_record))
        .with_state(state)
        .nest("/api/toners", crud_router(store.toners.clone()))
        .nest("/api/suppliers", crud_router(store.suppliers.clone()))
        .nest(
            "/api/warranty-status",
            crud_router(store.warranty_statuses.clone()),
        )
        .nest(
            "/api/approval-status",
            crud_router(store.approval_statuses.clone()),
        )
        .nest("/api/branches", crud_router(store.branches.clone()))
        .nest("/api/sectors", crud_router(store.sectors.clone()))
        .nest("/api/warranties", crud_router(store.warranty_claims.clone()))
}

// ---------------------------------------------------------------------------
// Generic CRUD over a repository
// ---------------------------------------------------------------------------

fn crud_router<R, T, N>(repo: Arc<R>) -> Router
where
    R: Repository<T, N> + 'static,
    T: Serialize + Send + Sync + 'static,
    N: DeserializeOwned + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_all::<R, T, N>).post(create_one::<R, T, N>))
        .route(
            "/:id",
            get(get_one::<R, T, N>)
                .put(update_one::<R, T, N>)
                .delete(delete_one::<R, T, N>),
        )
        .with_state(repo)
}

async fn list_all<R, T, N>(State(repo): State<Arc<R>>) -> Json<Vec<T>>
where
    R: Repository<T, N> + 'static,
    T: Serialize + Send + Sync + 'static,
    N: DeserializeOwned + Send + Sync + 'static,
{
    Json(repo.list().await)
}

async fn get_one<R, T, N>(
    State(repo): State<Arc<R>>,
    Path(id): Path<Uuid>,
) -> Result<Json<T>, ApiError>
where
    R: Repository<T, N> + 'static,
    T: Serialize + Send + Sync + 'static,
    N: DeserializeOwned + Send + Sync + 'static,
{
    Ok(Json(repo.get(id).await?))
}

async fn create_one<R, T, N>(
    State(repo): State<Arc<R>>,
    Json(input): Json<N>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    R: Repository<T, N> + 'static,
    T: Serialize + Send + Sync + 'static,
    N: DeserializeOwned + Send + Sync + 'static,
{
    Ok((StatusCode::CREATED, Json(repo.create(input).await?)))
}

async fn update_one<R, T, N>(
    State(repo): State<Arc<R>>,
    Path(id): Path<Uuid>,
    Json(input): Json<N>,
) -> Result<Json<T>, ApiError>
where
    R: Repository<T, N> + 'static,
    T: Serialize + Send + Sync + 'static,
    N: DeserializeOwned + Send + Sync + 'static,
{
    Ok(Json(repo.update(id, input).await?))
}

async fn delete_one<R, T, N>(
    State(repo): State<Arc<R>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
    R: Repository<T, N> + 'static,
    T: Serialize + Send + Sync + 'static,
    N: DeserializeOwned + Send + Sync + 'static,
{
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Auth and users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .store
        .users
        .find_by_email(&request.email)
        .await
        .ok_or(ApiError::Unauthorized)?;
    if !user.active || user.password != request.password {
        return Err(ApiError::Unauthorized);
    }
    Ok(Json(PublicUser::from(&user)))
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<PublicUser>> {
    let users = state.store.users.list().await;
    Json(users.iter().map(PublicUser::from).collect())
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state.store.users.get(id).await?;
    Ok(Json(PublicUser::from(&user)))
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let user = state.store.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewUser>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state.store.users.update(id, input).await?;
    Ok(Json(PublicUser::from(&user)))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Returns workflow
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PreviewRequest {
    toner_id: Uuid,
    returned_weight_g: f64,
}

async fn list_returns(State(state): State<AppState>) -> Json<Vec<ReturnedUnit>> {
    Json(state.store.returns.list().await)
}

async fn preview_return(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<ReturnPreview>, ApiError> {
    let preview = state
        .processor
        .preview(request.toner_id, request.returned_weight_g)
        .await?;
    Ok(Json(preview))
}

async fn commit_return(
    State(state): State<AppState>,
    Json(request): Json<CommitRequest>,
) -> Result<(StatusCode, Json<ReturnedUnit>), ApiError> {
    let unit = state.processor.commit(request).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// CSV body, columns `toner_model,client_code,branch,returned_weight`.
async fn preview_batch(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Vec<ReturnPreview>>, ApiError> {
    Ok(Json(state.processor.preview_batch(&body).await?))
}

// ---------------------------------------------------------------------------
// Assessments, dashboard, admin
// ---------------------------------------------------------------------------

async fn assess_five_s(
    Json(submission): Json<FiveSSubmission>,
) -> Result<Json<FiveSReport>, ApiError> {
    Ok(Json(score_five_s(submission)?))
}

async fn assess_disc(Json(submission): Json<DiscSubmission>) -> Result<Json<DiscReport>, ApiError> {
    Ok(Json(score_disc(submission)?))
}

async fn stats(State(state): State<AppState>) -> Json<tonerqc_workflow::DashboardStats> {
    Json(dashboard_stats(&state.store).await)
}

async fn delete_admin_record(
    State(state): State<AppState>,
    Json(target): Json<DeleteTarget>,
) -> Result<StatusCode, ApiError> {
    delete_record(&state.store, target).await?;
    Ok(StatusCode::NO_CONTENT)
}
