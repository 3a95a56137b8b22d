use actix_web::{web, HttpResponse};

use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::dto::LogoutResponse;

/// Handler for POST /api/v1/auth/logout
///
/// Expires both token cookies on the client. Tokens already copied
/// elsewhere stay valid until they expire or are revoked.
pub async fn logout<U, C>(state: web::Data<AppState<U, C>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let mut response = HttpResponse::Ok();
    state.cookies.clear(&mut response);
    response.json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}
