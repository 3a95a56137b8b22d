use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::dto::{AccountPath, AdminActionResponse};
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::within;

use super::require_admin;

/// Handler for POST /api/v1/admin/users/{id}/ban
///
/// Deactivates the account and blocks its refresh tokens immediately.
pub async fn ban<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
    path: web::Path<AccountPath>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let admin = require_admin(&state, &req)?;
    let id = path.id;
    within(state.request_timeout, state.admin.ban(id))
        .await
        .map_err(ApiError::admin)?;

    info!(admin_id = admin.id, account_id = id, "Ban requested");
    Ok(HttpResponse::Ok().json(AdminActionResponse::new(id, "ban")))
}

/// Handler for POST /api/v1/admin/users/{id}/unban
pub async fn unban<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
    path: web::Path<AccountPath>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let admin = require_admin(&state, &req)?;
    let id = path.id;
    within(state.request_timeout, state.admin.unban(id))
        .await
        .map_err(ApiError::admin)?;

    info!(admin_id = admin.id, account_id = id, "Unban requested");
    Ok(HttpResponse::Ok().json(AdminActionResponse::new(id, "unban")))
}

/// Handler for POST /api/v1/admin/users/{id}/kick
///
/// Refresh tokens stop working until unkick or until the kick expires
/// after one refresh-token lifetime.
pub async fn kick<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
    path: web::Path<AccountPath>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let admin = require_admin(&state, &req)?;
    let id = path.id;
    within(state.request_timeout, state.admin.kick(id))
        .await
        .map_err(ApiError::admin)?;

    info!(admin_id = admin.id, account_id = id, "Kick requested");
    Ok(HttpResponse::Ok().json(AdminActionResponse::new(id, "kick")))
}

/// Handler for POST /api/v1/admin/users/{id}/unkick
pub async fn unkick<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
    path: web::Path<AccountPath>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let admin = require_admin(&state, &req)?;
    let id = path.id;
    within(state.request_timeout, state.admin.unkick(id))
        .await
        .map_err(ApiError::admin)?;

    info!(admin_id = admin.id, account_id = id, "Unkick requested");
    Ok(HttpResponse::Ok().json(AdminActionResponse::new(id, "unkick")))
}
