//! Route table and handlers.

use super::{ApiError, AppState, AuthenticatedUser};
use crate::aggregation::domain::{AggregateView, ProviderStatus};
use crate::identity::{
    domain::{IssuedSession, User, UserId},
    services::RegisterUserRequest,
};
use crate::oauth::domain::{AuthorizationRedirect, CallbackParams};
use crate::provider::domain::ProviderKind;
use crate::task::domain::{Priority, Task, TaskId, TaskView};
use crate::task::services::CreateTaskRequest;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/accounts", post(register_account))
        .route("/auth/{provider}", get(start_authorization).delete(unlink))
        .route("/auth/{provider}/callback", get(complete_authorization))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/digest", get(digest))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct AggregateResponse<'a> {
    tasks: &'a [TaskView],
    providers: &'a [ProviderStatus],
    reconnect_required: Vec<ProviderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
}

impl<'a> AggregateResponse<'a> {
    fn new(view: &'a AggregateView, summary: Option<&'a str>) -> Self {
        Self {
            tasks: view.tasks(),
            providers: view.providers(),
            reconnect_required: view.reconnect_required(),
            summary,
        }
    }
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    display_name: String,
    credential_hash: String,
}

#[derive(Serialize)]
struct AccountResponse {
    id: UserId,
    email: String,
    display_name: String,
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccountResponse {
    fn new(user: &User, session: IssuedSession) -> Self {
        Self {
            id: user.id(),
            email: user.email().as_str().to_owned(),
            display_name: user.display_name().to_owned(),
            token: session.token,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateTaskBody {
    title: String,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    schedule_hint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateTaskBody {
    completed: bool,
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Creates an account and returns a session for it.
///
/// The credential hash comes from the caller's password hashing and is
/// stored as given.
async fn register_account(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let user = state
        .accounts
        .register(RegisterUserRequest::new(
            body.email,
            body.display_name,
            body.credential_hash,
        ))
        .await?;
    let session = state.guard.issue(user.id())?;
    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::new(&user, session)),
    ))
}

fn parse_provider(raw: &str) -> Result<ProviderKind, ApiError> {
    ProviderKind::try_from(raw).map_err(|_| ApiError::UnknownProvider(raw.to_owned()))
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
async fn start_authorization(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(provider): Path<String>,
) -> Result<Json<AuthorizationRedirect>, ApiError> {
    let kind = parse_provider(&provider)?;
    Ok(Json(state.oauth.authorize(user, kind)?))
}

/// Query key used on the dashboard redirect when the path names no provider.
const UNKNOWN_PROVIDER_KEY: &str = "provider";

async fn complete_authorization(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    uri: Uri,
) -> Redirect {
    let Ok(kind) = ProviderKind::try_from(provider.as_str()) else {
        warn!("authorization callback for unknown provider");
        return dashboard_redirect(
            &state.client_url,
            UNKNOWN_PROVIDER_KEY,
            Err("unknown_provider"),
        );
    };
    let Ok(Query(params)) = Query::<CallbackParams>::try_from_uri(&uri) else {
        warn!(provider = %kind, "authorization callback with unreadable query");
        return dashboard_redirect(&state.client_url, kind.as_str(), Err("invalid_callback"));
    };

    let outcome = state.oauth.callback(kind, params).await;
    dashboard_redirect(
        &state.client_url,
        kind.as_str(),
        outcome.map(|_| ()).map_err(|err| err.reason_code()),
    )
}

fn dashboard_redirect(client_url: &str, key: &str, outcome: Result<(), &'static str>) -> Redirect {
    let target = outcome.map_or_else(
        |reason| format!("{client_url}/dashboard?{key}=failed&reason={reason}"),
        |()| format!("{client_url}/dashboard?{key}=success"),
    );
    Redirect::to(&target)
}

async fn unlink(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(provider): Path<String>,
) -> Result<StatusCode, ApiError> {
    let kind = parse_provider(&provider)?;
    if state.oauth.unlink(user, kind).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotLinked)
    }
}

async fn list_tasks(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Response, ApiError> {
    let view = state.engine.aggregate(user).await?;
    Ok(Json(AggregateResponse::new(&view, None)).into_response())
}

async fn digest(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Response, ApiError> {
    if let Some(service) = &state.digest {
        let digest = service.digest(user).await?;
        return Ok(
            Json(AggregateResponse::new(&digest.view, digest.summary.as_deref())).into_response(),
        );
    }
    let view = state.engine.aggregate(user).await?;
    Ok(Json(AggregateResponse::new(&view, None)).into_response())
}

async fn create_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let mut request = CreateTaskRequest::new(body.title);
    if let Some(priority) = body.priority {
        request = request.with_priority(priority);
    }
    if let Some(hint) = body.schedule_hint {
        request = request.with_schedule_hint(hint);
    }
    let task = state.tasks.create(user, request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks
        .set_completed(user, TaskId::from_uuid(id), body.completed)
        .await?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete(user, TaskId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
