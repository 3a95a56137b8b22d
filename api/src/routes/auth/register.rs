use actix_web::{web, HttpResponse};

use fa_core::domain::value_objects::RegisterRequest;
use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::handlers::ApiResult;
use crate::middleware::within;

use super::token_pair_response;

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "email": "a@b.com",
///     "username": "alice",
///     "password1": "secret1",
///     "password2": "secret1",
///     "captcha": "..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid field (with `field` and `reason` details) or captcha
/// - 409 Conflict: email or username already taken
/// - 503 Service Unavailable: directory unreachable or deadline exceeded
pub async fn register<U, C>(
    state: web::Data<AppState<U, C>>,
    request: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let pair = within(
        state.request_timeout,
        state.credentials.register(request.into_inner()),
    )
    .await?;

    Ok(token_pair_response(&state, pair))
}
