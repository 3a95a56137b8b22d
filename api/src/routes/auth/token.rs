use actix_web::{web, HttpRequest, HttpResponse};

use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::handlers::ApiResult;

/// Handler for GET /api/v1/auth/token
///
/// Returns the identity carried by the access cookie. Only the signature
/// and expiry are checked; revocation applies at refresh time.
pub async fn token<U, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, C>>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let access = state.cookies.access(&req)?;
    let payload = state.credentials.token(&access)?;
    Ok(HttpResponse::Ok().json(payload))
}
