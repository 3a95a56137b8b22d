//! Shared wiring for route tests: in-memory stores, a manual clock and
//! fixture keys

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::{test::TestRequest, web};

use fa_api::middleware::TokenCookies;
use fa_api::AppState;
use fa_core::{
    AccountId, AdministrationService, BcryptVerifier, Clock, CompositeVerifier,
    CredentialService, DebugCaptcha, InMemoryRevocationCache, InMemoryUserRepository,
    JwtTokenCodec, KeyMaterial, KeyRing, LoginRequest, ManualClock, RegisterRequest,
    RevocationStore, RevocationStoreConfig, TokenLifetimes, TokenPair, ADMIN_ROLE,
};
use fa_shared::CookieConfig;

const PRIVATE_PEM: &str = include_str!("../../../core/tests/fixtures/keys/current_private.pem");
const PUBLIC_PEM: &str = include_str!("../../../core/tests/fixtures/keys/current_public.pem");

pub const START: i64 = 1_700_000_000;
pub const CAPTCHA: &str = "human";
pub const PASSWORD: &str = "secret1";
pub const LIFETIMES: TokenLifetimes = TokenLifetimes {
    access: 900,
    refresh: 86400,
};

pub type Users = InMemoryUserRepository;
pub type Cache = InMemoryRevocationCache;
pub type State = web::Data<AppState<Users, Cache>>;

pub struct TestEnv {
    pub clock: ManualClock,
    pub users: Arc<Users>,
    pub cache: Arc<Cache>,
    pub state: State,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(5))
    }

    pub fn with_timeout(request_timeout: Duration) -> Self {
        let clock = ManualClock::new(START);
        let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());

        let users = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(InMemoryRevocationCache::with_clock(shared_clock.clone()));
        let revocation = Arc::new(RevocationStore::new(
            cache.clone(),
            shared_clock.clone(),
            RevocationStoreConfig {
                kick_ttl: LIFETIMES.refresh,
                recent_ban_ttl: 600,
            },
        ));

        let key = KeyMaterial::from_pem("test", PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes())
            .expect("fixture keys form a pair");
        let codec = Arc::new(JwtTokenCodec::new(KeyRing::new(key), shared_clock.clone()));

        let credentials = Arc::new(CredentialService::new(
            users.clone(),
            revocation.clone(),
            codec,
            Arc::new(CompositeVerifier::new(Arc::new(BcryptVerifier::new(4)))),
            Arc::new(DebugCaptcha::expecting(CAPTCHA)),
            shared_clock,
            LIFETIMES,
        ));
        let admin = Arc::new(AdministrationService::new(
            users.clone(),
            revocation,
            LIFETIMES,
        ));

        let state = web::Data::new(AppState::new(
            credentials,
            admin,
            TokenCookies::new(CookieConfig::default(), LIFETIMES),
            request_timeout,
        ));

        Self {
            clock,
            users,
            cache,
            state,
        }
    }

    /// Register through the service and return the new account's tokens
    pub async fn register(&self, username: &str) -> (AccountId, TokenPair) {
        let pair = self
            .state
            .credentials
            .register(register_form(username))
            .await
            .expect("registration succeeds");
        let id = self.state.credentials.token(&pair.access).unwrap().id;
        (id, pair)
    }

    /// Tokens for a freshly registered account holding the admin role
    pub async fn admin_session(&self) -> TokenPair {
        let (id, _) = self.register("root").await;
        self.users.grant_role(id, ADMIN_ROLE).await.unwrap();
        self.state
            .credentials
            .login(LoginRequest {
                login: "root".to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("admin login succeeds")
    }
}

pub fn register_form(username: &str) -> RegisterRequest {
    RegisterRequest {
        email: format!("{}@example.com", username),
        username: username.to_string(),
        password1: PASSWORD.to_string(),
        password2: PASSWORD.to_string(),
        captcha: CAPTCHA.to_string(),
    }
}

pub fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("access_c", token.to_string())
}

pub fn refresh_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("refresh_c", token.to_string())
}

/// POST to an admin route with the given access token
pub fn admin_post(uri: &str, access: &str) -> TestRequest {
    TestRequest::post().uri(uri).cookie(access_cookie(access))
}

/// Value of a cookie set on the response
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}
