use actix_web::{web, HttpRequest, HttpResponse};

use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::handlers::ApiResult;
use crate::middleware::within;

/// Handler for GET /api/v1/auth/me
pub async fn me<U, C>(req: HttpRequest, state: web::Data<AppState<U, C>>) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let access = state.cookies.access(&req)?;
    let profile = within(state.request_timeout, state.credentials.me(&access)).await?;
    Ok(HttpResponse::Ok().json(profile))
}
