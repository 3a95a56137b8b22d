use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use fa_core::domain::value_objects::MassLogoutStatus;
use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::handlers::ApiResult;
use crate::middleware::within;

use super::require_admin;

/// Handler for GET /api/v1/admin/mass_logout
///
/// ## Success (200 OK)
/// ```json
/// { "active": true, "since": "2024-01-01T00:00:00Z" }
/// ```
pub async fn get_mass_logout<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    require_admin(&state, &req)?;
    let status = within(state.request_timeout, state.admin.get_mass_logout_status()).await?;
    Ok(HttpResponse::Ok().json(status))
}

/// Handler for POST /api/v1/admin/mass_logout
///
/// Every refresh token issued up to now stops working.
pub async fn activate_mass_logout<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let admin = require_admin(&state, &req)?;
    let status = within(state.request_timeout, state.admin.activate_mass_logout()).await?;

    info!(admin_id = admin.id, "Mass logout requested");
    Ok(HttpResponse::Ok().json(status))
}

/// Handler for DELETE /api/v1/admin/mass_logout
pub async fn deactivate_mass_logout<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let admin = require_admin(&state, &req)?;
    within(state.request_timeout, state.admin.deactivate_mass_logout()).await?;

    info!(admin_id = admin.id, "Mass logout lifted");
    Ok(HttpResponse::Ok().json(MassLogoutStatus::default()))
}
