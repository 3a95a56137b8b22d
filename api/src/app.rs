//! Application state and factory
//!
//! This module holds the state shared by every worker and builds the
//! Actix-web application with all routes registered.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpResponse};
use tracing::warn;
use tracing_actix_web::TracingLogger;

use fa_core::domain::value_objects::StoreHealth;
use fa_core::repositories::{RevocationCache, UserRepository};
use fa_core::services::{AdministrationService, CredentialService};

use crate::handlers::ApiError;
use crate::middleware::TokenCookies;
use crate::routes::{admin, auth};

/// State shared by every route handler
pub struct AppState<U, C>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    pub credentials: Arc<CredentialService<U, C>>,
    pub admin: Arc<AdministrationService<U, C>>,
    pub cookies: TokenCookies,
    /// Upper bound for any single service call
    pub request_timeout: Duration,
}

impl<U, C> AppState<U, C>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    pub fn new(
        credentials: Arc<CredentialService<U, C>>,
        admin: Arc<AdministrationService<U, C>>,
        cookies: TokenCookies,
        request_timeout: Duration,
    ) -> Self {
        Self {
            credentials,
            admin,
            cookies,
            request_timeout,
        }
    }
}

/// Create the application with all routes
pub fn create_app<U, C>(
    app_state: web::Data<AppState<U, C>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(path_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<U, C>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::<U, C>))
                        .route("/login", web::post().to(auth::login::<U, C>))
                        .route("/token", web::get().to(auth::token::<U, C>))
                        .route("/token/refresh", web::post().to(auth::refresh_token::<U, C>))
                        .route("/logout", web::post().to(auth::logout::<U, C>))
                        .route("/me", web::get().to(auth::me::<U, C>)),
                )
                .service(
                    web::scope("/admin")
                        .route("/mass_logout", web::get().to(admin::get_mass_logout::<U, C>))
                        .route("/mass_logout", web::post().to(admin::activate_mass_logout::<U, C>))
                        .route(
                            "/mass_logout",
                            web::delete().to(admin::deactivate_mass_logout::<U, C>),
                        )
                        .route("/users/{id}/ban", web::post().to(admin::ban::<U, C>))
                        .route("/users/{id}/unban", web::post().to(admin::unban::<U, C>))
                        .route("/users/{id}/kick", web::post().to(admin::kick::<U, C>))
                        .route("/users/{id}/unkick", web::post().to(admin::unkick::<U, C>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Answers 503 when either store is unreachable or does not answer in time.
async fn health_check<U, C>(state: web::Data<AppState<U, C>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let stores = tokio::time::timeout(state.request_timeout, state.credentials.store_health())
        .await
        .unwrap_or_else(|_| {
            warn!("Store health check timed out");
            StoreHealth::default()
        });

    let (mut response, status) = if stores.is_healthy() {
        (HttpResponse::Ok(), "healthy")
    } else {
        (HttpResponse::ServiceUnavailable(), "degraded")
    };

    response.json(serde_json::json!({
        "status": status,
        "service": "fauth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "stores": stores,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(fa_shared::ErrorResponse::new(
        fa_shared::error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
