//! Administration route handlers
//!
//! Every handler first checks that the access cookie carries the `admin`
//! role. Unknown account ids answer 404.

pub mod mass_logout;
pub mod users;

pub use mass_logout::{activate_mass_logout, deactivate_mass_logout, get_mass_logout};
pub use users::{ban, kick, unban, unkick};

use actix_web::HttpRequest;

use fa_core::domain::entities::{SessionPayload, ADMIN_ROLE};
use fa_core::repositories::{RevocationCache, UserRepository};

use crate::app::AppState;
use crate::handlers::ApiResult;

/// Resolve the calling administrator from the access cookie
fn require_admin<U, C>(state: &AppState<U, C>, req: &HttpRequest) -> ApiResult<SessionPayload>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let access = state.cookies.access(req)?;
    Ok(state.credentials.authorize(&access, ADMIN_ROLE)?)
}
