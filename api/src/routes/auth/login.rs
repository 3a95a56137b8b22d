use actix_web::{web, HttpResponse};

use fa_core::domain::value_objects::LoginRequest;
use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::handlers::ApiResult;
use crate::middleware::within;

use super::token_pair_response;

/// Handler for POST /api/v1/auth/login
///
/// `login` is an email or a username. Unknown accounts, inactive accounts
/// and wrong passwords all answer 401 with the same body.
pub async fn login<U, C>(
    state: web::Data<AppState<U, C>>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let pair = within(
        state.request_timeout,
        state.credentials.login(request.into_inner()),
    )
    .await?;

    Ok(token_pair_response(&state, pair))
}
