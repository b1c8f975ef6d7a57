//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the admin REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use archstudio_core::domain::UserRecord;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_user_handler,
        list_users_handler,
        set_active_handler,
        delete_user_handler,
        update_password_handler,
        update_quota_handler,
        update_expiry_handler,
        put_api_key_handler,
    ),
    components(
        schemas(
            CreateUserRequest,
            UserResponse,
            SetActiveRequest,
            UpdatePasswordRequest,
            UpdateQuotaRequest,
            UpdateExpiryRequest,
            PutApiKeyRequest,
        )
    ),
    tags(
        (name = "ArchStudio Admin API", description = "User directory and settings endpoints for the studio admin console.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub daily_quota: u32,
    /// Days until the account expires, counted from now.
    pub duration_days: i64,
}

/// A user as exposed to the admin console. The stored password never leaves
/// the server.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub is_active: bool,
    pub expiry_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub daily_quota: u32,
    pub usage_count: u32,
    pub last_usage_date: NaiveDate,
    /// Marketing tier derived from the daily quota.
    pub plan_name: String,
}

impl UserResponse {
    fn from_domain(user: UserRecord) -> Self {
        let plan_name = user.plan_name().to_string();
        Self {
            id: user.id,
            username: user.username,
            is_active: user.is_active,
            expiry_date: user.expiry_date,
            created_at: user.created_at,
            daily_quota: user.daily_quota,
            usage_count: user.usage_count,
            last_usage_date: user.last_usage_date,
            plan_name,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateQuotaRequest {
    pub daily_quota: u32,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateExpiryRequest {
    /// Calendar day; the account stays valid through the end of this day.
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct PutApiKeyRequest {
    pub api_key: String,
}

fn internal_error(context: &str, e: impl std::fmt::Display) -> (StatusCode, String) {
    error!("{}: {}", context, e);
    (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Create a new member account.
///
/// Usernames are checked against the current list as a best-effort guard;
/// there is no hard uniqueness constraint.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 409, description = "Username is already taken"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let existing = app_state
        .directory
        .list_users()
        .await
        .map_err(|e| internal_error("Failed to list users", e))?;
    if existing.iter().any(|u| u.username == payload.username) {
        return Err((
            StatusCode::CONFLICT,
            format!("Username '{}' is already taken", payload.username),
        ));
    }

    let user = app_state
        .directory
        .create_user(
            &payload.username,
            &payload.password,
            payload.daily_quota,
            payload.duration_days,
        )
        .await
        .map_err(|e| internal_error("Failed to create user", e))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_domain(user))))
}

/// List all member accounts, newest first.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let users = app_state
        .directory
        .list_users()
        .await
        .map_err(|e| internal_error("Failed to list users", e))?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from_domain).collect();
    Ok(Json(response))
}

/// A realtime feed of the user list as Server-Sent Events. Each event holds
/// the complete list; clients replace their table wholesale.
pub async fn watch_users_handler(
    State(app_state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let snapshots = app_state.directory.subscribe_users();
    let stream = snapshots.map(|users| {
        let response: Vec<UserResponse> =
            users.into_iter().map(UserResponse::from_domain).collect();
        Event::default().json_data(&response)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Enable or disable an account.
#[utoipa::path(
    patch,
    path = "/users/{id}/active",
    request_body = SetActiveRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 500, description = "Internal server error")
    ),
    params(("id" = Uuid, Path, description = "The user's unique ID."))
)]
pub async fn set_active_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .directory
        .set_active(id, payload.active)
        .await
        .map_err(|e| internal_error("Failed to update user", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Permanently delete an account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    responses(
        (status = 204, description = "Deleted"),
        (status = 500, description = "Internal server error")
    ),
    params(("id" = Uuid, Path, description = "The user's unique ID."))
)]
pub async fn delete_user_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .directory
        .delete_user(id)
        .await
        .map_err(|e| internal_error("Failed to delete user", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace an account's password.
#[utoipa::path(
    patch,
    path = "/users/{id}/password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 500, description = "Internal server error")
    ),
    params(("id" = Uuid, Path, description = "The user's unique ID."))
)]
pub async fn update_password_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .directory
        .update_password(id, &payload.password)
        .await
        .map_err(|e| internal_error("Failed to update password", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change an account's daily premium quota.
#[utoipa::path(
    patch,
    path = "/users/{id}/quota",
    request_body = UpdateQuotaRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 500, description = "Internal server error")
    ),
    params(("id" = Uuid, Path, description = "The user's unique ID."))
)]
pub async fn update_quota_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuotaRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .directory
        .update_quota(id, payload.daily_quota)
        .await
        .map_err(|e| internal_error("Failed to update quota", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move an account's expiry to the end of the given calendar day.
#[utoipa::path(
    patch,
    path = "/users/{id}/expiry",
    request_body = UpdateExpiryRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid date"),
        (status = 500, description = "Internal server error")
    ),
    params(("id" = Uuid, Path, description = "The user's unique ID."))
)]
pub async fn update_expiry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpiryRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let end_of_day = payload
        .date
        .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default());
    let expiry = Utc
        .from_local_datetime(&end_of_day)
        .single()
        .ok_or((StatusCode::BAD_REQUEST, "Invalid date".to_string()))?;

    app_state
        .directory
        .update_expiry(id, expiry)
        .await
        .map_err(|e| internal_error("Failed to update expiry", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Store the shared fallback API key used when the server has none configured.
#[utoipa::path(
    put,
    path = "/settings/api-key",
    request_body = PutApiKeyRequest,
    responses(
        (status = 204, description = "Stored"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn put_api_key_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<PutApiKeyRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .directory
        .upsert_global_api_key(&payload.api_key)
        .await
        .map_err(|e| internal_error("Failed to store API key", e))?;
    Ok(StatusCode::NO_CONTENT)
}
