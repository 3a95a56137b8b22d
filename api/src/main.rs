//! Fauth API server bootstrap

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fa_api::middleware::TokenCookies;
use fa_api::{create_app, AppState};
use fa_core::domain::entities::NewAccount;
use fa_core::{
    AdministrationService, CaptchaVerifier, Clock, CompositeVerifier, CredentialService,
    DebugCaptcha, InMemoryRevocationCache, InMemoryUserRepository, JwtTokenCodec, KeyMaterial,
    KeyRing, PasswordVerifier, RevocationCache, RevocationStore, RevocationStoreConfig,
    SystemClock, TokenCodec, TokenLifetimes, UserRepository, VerificationKey,
};
use fa_infra::{DatabasePool, MySqlUserRepository, ReCaptchaVerifier, RedisClient};
use fa_shared::{
    AdminSeedConfig, AppConfig, CaptchaConfig, JwtConfig, LogFormat, LoggingConfig,
    PasswordConfig, StorageBackend,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Fauth API server");

    if config.environment.is_production() && config.auth.password.plaintext {
        bail!("PASSWORD_PLAINTEXT must not be enabled in production");
    }

    let keys = load_keys(&config.auth.jwt)?;
    let captcha = build_captcha(&config)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    match config.storage {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; accounts and revocations are lost on restart");
            let users = Arc::new(InMemoryUserRepository::new());
            if let Some(seed) = &config.auth.admin_seed {
                seed_admin(&users, seed, &config.auth.password).await?;
            } else {
                warn!("ADMIN_SEED_* not set; admin routes are unreachable with in-memory storage");
            }
            let cache = Arc::new(InMemoryRevocationCache::with_clock(clock.clone()));
            serve(&config, users, cache, keys, captcha, clock).await
        }
        StorageBackend::External => {
            if config.auth.admin_seed.is_some() {
                warn!("ADMIN_SEED_* is ignored outside in-memory storage");
            }
            let pool = DatabasePool::new(config.database.clone()).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            if !pool.health_check().await? {
                bail!("Account directory did not answer the health check");
            }
            info!(pool = %pool.get_statistics(), "Account directory ready");
            let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
            let cache = Arc::new(RedisClient::new(config.cache.clone()).await?);
            serve(&config, users, cache, keys, captcha, clock).await
        }
    }
}

/// Wire the services over the given stores and run the HTTP server
async fn serve<U, C>(
    config: &AppConfig,
    users: Arc<U>,
    cache: Arc<C>,
    keys: KeyRing,
    captcha: Arc<dyn CaptchaVerifier>,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let lifetimes = TokenLifetimes::from(&config.auth.jwt);

    let revocation = Arc::new(RevocationStore::new(
        cache,
        clock.clone(),
        RevocationStoreConfig::from_config(&config.auth.revocation, &config.auth.jwt),
    ));

    info!(trusted_kids = ?keys.trusted_kids(), "Token keys loaded");
    let codec: Arc<dyn TokenCodec> = Arc::new(JwtTokenCodec::new(keys, clock.clone()));

    let passwords = Arc::new(CompositeVerifier::from_config(&config.auth.password));
    info!(strategies = ?passwords.comparer_names(), "Password strategies configured");

    let credentials = Arc::new(CredentialService::new(
        users.clone(),
        revocation.clone(),
        codec,
        passwords,
        captcha,
        clock,
        lifetimes,
    ));
    let admin = Arc::new(AdministrationService::new(users, revocation, lifetimes));

    let state = web::Data::new(AppState::new(
        credentials,
        admin,
        TokenCookies::new(config.server.cookies.clone(), lifetimes),
        Duration::from_secs(config.server.request_timeout),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Create the configured administrator in the in-memory directory
async fn seed_admin(
    users: &InMemoryUserRepository,
    seed: &AdminSeedConfig,
    passwords: &PasswordConfig,
) -> anyhow::Result<()> {
    let password_hash = CompositeVerifier::from_config(passwords)
        .hash(&seed.password)
        .context("Failed to hash the seeded admin password")?;

    let id = users
        .seed_admin(NewAccount {
            email: seed.email.clone(),
            username: seed.username.clone(),
            password_hash: Some(password_hash),
            verified: true,
        })
        .await
        .context("Failed to seed the admin account")?;

    info!(user_id = id, username = %seed.username, "Seeded admin account");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Load the signing pair and, when configured, one retired public key
fn load_keys(jwt: &JwtConfig) -> anyhow::Result<KeyRing> {
    let private_key = read_key(&jwt.private_key_path)?;
    let public_key = read_key(&jwt.public_key_path)?;

    let signing = if is_pem(&private_key) {
        KeyMaterial::from_pem(jwt.kid.clone(), &private_key, &public_key)?
    } else {
        KeyMaterial::from_raw(jwt.kid.clone(), &private_key, &public_key)?
    };
    let mut keys = KeyRing::new(signing);

    if let (Some(path), Some(kid)) = (&jwt.retired_public_key_path, &jwt.retired_kid) {
        let retired = read_key(path)?;
        let key = if is_pem(&retired) {
            VerificationKey::from_pem(kid.clone(), &retired)?
        } else {
            VerificationKey::from_raw(kid.clone(), &retired)?
        };
        warn!(kid = %kid, "Trusting retired token key");
        keys = keys.with_retired(key);
    }

    Ok(keys)
}

fn read_key(path: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read key file {}", path))
}

fn is_pem(bytes: &[u8]) -> bool {
    bytes.starts_with(b"-----BEGIN")
}

fn build_captcha(config: &AppConfig) -> anyhow::Result<Arc<dyn CaptchaVerifier>> {
    let captcha: &CaptchaConfig = &config.auth.captcha;

    if let Some(secret) = &captcha.recaptcha_secret {
        return Ok(Arc::new(ReCaptchaVerifier::new(secret.clone())?));
    }

    if config.environment.is_production() {
        bail!("RECAPTCHA_SECRET is required in production");
    }

    match &captcha.debug_value {
        Some(value) => Ok(Arc::new(DebugCaptcha::expecting(value.clone()))),
        None => {
            warn!("No captcha configured; every registration proof is accepted");
            Ok(Arc::new(DebugCaptcha::accept_all()))
        }
    }
}
