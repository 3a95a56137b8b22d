//! Wiring shared by the service tests

use std::sync::Arc;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::domain::entities::{AccountId, NewAccount, SessionClaims, TokenPair, TokenType};
use crate::domain::value_objects::RegisterRequest;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{InMemoryRevocationCache, InMemoryUserRepository, UserRepository};
use crate::services::{
    AdministrationService, BcryptVerifier, CompositeVerifier, CredentialService, DebugCaptcha,
    JwtTokenCodec, KeyMaterial, KeyRing, LegacyPbkdf2Verifier, RevocationStore,
    RevocationStoreConfig, TokenCodec, TokenLifetimes,
};

pub(crate) const PRIVATE_PEM: &str = include_str!("../../tests/fixtures/keys/current_private.pem");
pub(crate) const PUBLIC_PEM: &str = include_str!("../../tests/fixtures/keys/current_public.pem");

pub(crate) const START: i64 = 1_700_000_000;
pub(crate) const CAPTCHA: &str = "human";
pub(crate) const PASSWORD: &str = "secret1";

/// PBKDF2-HMAC-SHA256 of "secret1"
pub(crate) const LEGACY_HASH: &str =
    "pbkdf2_sha256$1000$Zl1kPq9sRt$6r6V4D+DZ7FbfWfEGh0RP2NNHC+jo1OkrCXrD+z70cY=";

pub(crate) const LIFETIMES: TokenLifetimes = TokenLifetimes {
    access: 60 * 15,
    refresh: 60 * 60 * 24,
};
pub(crate) const RECENT_BAN_TTL: i64 = 600;

type Users = InMemoryUserRepository;
type Cache = InMemoryRevocationCache;

pub(crate) struct Harness {
    pub clock: ManualClock,
    pub users: Arc<Users>,
    pub cache: Arc<Cache>,
    pub revocation: Arc<RevocationStore<Cache>>,
    pub codec: Arc<JwtTokenCodec>,
    pub credentials: CredentialService<Users, Cache>,
    pub admin: AdministrationService<Users, Cache>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = ManualClock::new(START);
        let users = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(InMemoryRevocationCache::with_clock(Arc::new(clock.clone())));
        let revocation = Arc::new(RevocationStore::new(
            cache.clone(),
            Arc::new(clock.clone()),
            RevocationStoreConfig {
                kick_ttl: LIFETIMES.refresh,
                recent_ban_ttl: RECENT_BAN_TTL,
            },
        ));

        let key = KeyMaterial::from_pem("test-kid", PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes())
            .unwrap();
        let codec = Arc::new(JwtTokenCodec::new(KeyRing::new(key), Arc::new(clock.clone())));

        let passwords = Arc::new(
            CompositeVerifier::new(Arc::new(BcryptVerifier::new(4)))
                .with_comparer(Arc::new(LegacyPbkdf2Verifier)),
        );

        let credentials = CredentialService::new(
            users.clone(),
            revocation.clone(),
            codec.clone(),
            passwords,
            Arc::new(DebugCaptcha::expecting(CAPTCHA)),
            Arc::new(clock.clone()),
            LIFETIMES,
        );
        let admin = AdministrationService::new(users.clone(), revocation.clone(), LIFETIMES);

        Self {
            clock,
            users,
            cache,
            revocation,
            codec,
            credentials,
            admin,
        }
    }

    /// Register `username` with the default password and return its id and tokens
    pub async fn register(&self, username: &str) -> (AccountId, TokenPair) {
        let pair = self
            .credentials
            .register(register_request(username))
            .await
            .unwrap();
        let id = self.claims(&pair.access, TokenType::Access).id;
        (id, pair)
    }

    /// Store an account directly, bypassing registration
    pub async fn seed(&self, username: &str, password_hash: Option<&str>) -> AccountId {
        self.users
            .create(NewAccount {
                email: format!("{}@example.com", username),
                username: username.to_string(),
                password_hash: password_hash.map(str::to_string),
                verified: true,
            })
            .await
            .unwrap()
    }

    pub fn claims(&self, token: &str, expected: TokenType) -> SessionClaims {
        self.codec.decode(token, expected).unwrap()
    }
}

pub(crate) fn register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        email: format!("{}@example.com", username),
        username: username.to_string(),
        password1: PASSWORD.to_string(),
        password2: PASSWORD.to_string(),
        captcha: CAPTCHA.to_string(),
    }
}

pub(crate) fn auth_error(result: Result<impl std::fmt::Debug, DomainError>) -> AuthError {
    match result {
        Err(DomainError::Auth(e)) => e,
        other => panic!("expected auth error, got {:?}", other),
    }
}

/// Poll `condition` until it holds; background writes run on spawned tasks
pub(crate) async fn eventually<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached");
}
