//! Authentication route handlers
//!
//! Tokens travel in HttpOnly cookies. Registration and login also return
//! both tokens in the body.

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod token;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh_token;
pub use register::register;
pub use token::token;

use actix_web::HttpResponse;

use fa_core::domain::entities::TokenPair;
use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::dto::TokenPairResponse;

/// Set both token cookies and echo the pair in the body
fn token_pair_response<U, C>(state: &AppState<U, C>, pair: TokenPair) -> HttpResponse
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let mut response = HttpResponse::Ok();
    state.cookies.set_access(&mut response, &pair.access);
    state.cookies.set_refresh(&mut response, &pair.refresh);
    response.json(TokenPairResponse::from(pair))
}
