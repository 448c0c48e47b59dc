//! Account and session endpoints.
//!
//! ```text
//! POST /api/v1/auth/register {"name":"Ada","email":"ada@example.com","password":"correct horse"}
//! POST /api/v1/auth/login    {"email":"ada@example.com","password":"correct horse"}
//! GET  /api/v1/auth/me
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DisplayName, Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::UserBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ValidationCode, credential_error, field_error};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Profile change; an absent or blank name keeps the current one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&name, &email, &password)
        .map_err(|err| credential_error(&err))?;
    let profile = state.accounts.register(&registration).await?;
    session.persist_user(&profile.id)?;
    Ok(HttpResponse::Created().json(UserBody::from(profile)))
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = UserBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserBody>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| credential_error(&err))?;
    let profile = state.login.authenticate(&credentials).await?;
    session.persist_user(&profile.id)?;
    Ok(web::Json(profile.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = UserBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserBody>> {
    let caller = session.require_user_id()?;
    let profile = state.users.me(&caller).await?;
    Ok(web::Json(profile.into()))
}

/// Every other account, ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/auth/users",
    responses(
        (status = 200, description = "Other accounts", body = [UserBody]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "listUsers"
)]
#[get("/auth/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserBody>>> {
    let caller = session.require_user_id()?;
    let users = state.users.list_users(&caller).await?;
    Ok(web::Json(users.into_iter().map(UserBody::from).collect()))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated account", body = UserBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["auth"],
    operation_id = "updateProfile"
)]
#[put("/auth/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<UserBody>> {
    let caller = session.require_user_id()?;
    let display_name = payload
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .map(DisplayName::new)
        .transpose()
        .map_err(|err| {
            field_error(
                FieldName::new("name"),
                ValidationCode::InvalidValue,
                err.to_string(),
            )
        })?;
    let profile = state.accounts.update_profile(&caller, display_name).await?;
    Ok(web::Json(profile.into()))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
