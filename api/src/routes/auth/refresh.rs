use actix_web::{web, HttpRequest, HttpResponse};

use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::dto::AccessTokenResponse;
use crate::handlers::ApiResult;
use crate::middleware::within;

/// Handler for POST /api/v1/auth/token/refresh
///
/// Exchanges the refresh cookie for a new access cookie. The refresh
/// token itself is not rotated.
///
/// ## Errors
/// - 401 Unauthorized: missing, invalid or revoked refresh token
/// - 503 Service Unavailable: revocation cache or directory unreachable
pub async fn refresh_token<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let refresh = state.cookies.refresh(&req)?;
    let access = within(state.request_timeout, state.credentials.refresh_token(&refresh)).await?;

    let mut response = HttpResponse::Ok();
    state.cookies.set_access(&mut response, &access);
    Ok(response.json(AccessTokenResponse { access }))
}
