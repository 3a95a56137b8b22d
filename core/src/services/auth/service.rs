//! Credential issuance, refresh and introspection

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::domain::entities::{
    AccountId, NewAccount, SessionClaims, SessionPayload, TokenPair, TokenType,
};
use crate::domain::value_objects::{LoginRequest, Me, RegisterRequest, StoreHealth};
use crate::errors::{AuthError, DomainError, DomainResult, PasswordError, RevocationReason};
use crate::repositories::{RevocationCache, UserRepository};
use crate::services::captcha::CaptchaVerifier;
use crate::services::password::{CompositeVerifier, PasswordMatch, PasswordVerifier};
use crate::services::revocation::RevocationStore;
use crate::services::token::{TokenCodec, TokenLifetimes};

/// Orchestrates registration, login, refresh and token introspection
///
/// Every flow is stateless across calls. Dropping a returned future abandons
/// any directory or cache call still in flight.
pub struct CredentialService<U, C>
where
    U: UserRepository + 'static,
    C: RevocationCache,
{
    /// Account directory
    users: Arc<U>,
    /// Kick, recent-ban and mass-logout facts
    revocation: Arc<RevocationStore<C>>,
    /// Token signing and verification
    tokens: Arc<dyn TokenCodec>,
    /// Password hashing and comparison
    passwords: Arc<CompositeVerifier>,
    /// Humanness check for registration
    captcha: Arc<dyn CaptchaVerifier>,
    clock: Arc<dyn Clock>,
    lifetimes: TokenLifetimes,
}

impl<U, C> CredentialService<U, C>
where
    U: UserRepository + 'static,
    C: RevocationCache,
{
    pub fn new(
        users: Arc<U>,
        revocation: Arc<RevocationStore<C>>,
        tokens: Arc<dyn TokenCodec>,
        passwords: Arc<CompositeVerifier>,
        captcha: Arc<dyn CaptchaVerifier>,
        clock: Arc<dyn Clock>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            users,
            revocation,
            tokens,
            passwords,
            captcha,
            clock,
            lifetimes,
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Register an account and issue its first token pair
    ///
    /// This method:
    /// 1. Validates the form and trims email and username
    /// 2. Checks the humanness proof
    /// 3. Rejects a taken email, then a taken username
    /// 4. Hashes the password and creates the account
    /// 5. Issues access and refresh tokens
    pub async fn register(&self, mut request: RegisterRequest) -> DomainResult<TokenPair> {
        request.validate()?;

        if !self.captcha.is_valid(&request.captcha).await {
            debug!("Registration rejected by captcha");
            return Err(AuthError::InvalidCaptcha.into());
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::DuplicateEmail.into());
        }
        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AuthError::DuplicateUsername.into());
        }

        let password_hash = self.hash_password(request.password1).await?;

        let id = self
            .users
            .create(NewAccount {
                email: request.email,
                username: request.username.clone(),
                password_hash: Some(password_hash),
                verified: false,
            })
            .await?;

        info!(account_id = id, "Account registered");

        self.issue_pair(&SessionPayload {
            id,
            username: request.username,
            roles: Vec::new(),
        })
    }

    /// Log in with an email or username and a password
    pub async fn login(&self, request: LoginRequest) -> DomainResult<TokenPair> {
        let account = self
            .users
            .find_by_login(request.login.trim())
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !account.active {
            return Err(AuthError::AccountNotActive.into());
        }

        let hash = account
            .password_hash
            .clone()
            .ok_or(AuthError::NoPasswordSet)?;

        let matched = self.verify_password(hash, request.password.clone()).await?;

        self.record_login(account.id);
        if matched.needs_rehash {
            self.upgrade_hash(account.id, request.password, matched.strategy);
        }

        info!(account_id = account.id, "Login succeeded");
        self.issue_pair(&SessionPayload::from(&account))
    }

    /// Decode an access token
    ///
    /// Every decode failure is reported as `TokenDecodeFailed`.
    pub fn token(&self, access_token: &str) -> DomainResult<SessionPayload> {
        self.decode(access_token, TokenType::Access)
            .map(|claims| claims.payload())
    }

    /// Decode an access token and require a role
    pub fn authorize(&self, access_token: &str, role: &str) -> DomainResult<SessionPayload> {
        let payload = self.token(access_token)?;
        if !payload.roles.iter().any(|r| r == role) {
            warn!(account_id = payload.id, role, "Missing role");
            return Err(AuthError::InsufficientPermissions.into());
        }
        Ok(payload)
    }

    /// Exchange a refresh token for a new access token
    ///
    /// Checks run in order and the first failure wins: recent ban, kick,
    /// mass-logout cutover, then a fresh directory read. The refresh token
    /// itself is not rotated.
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<String> {
        let claims = self.decode(refresh_token, TokenType::Refresh)?;
        let id = claims.id;

        if self.revocation.was_recently_banned(id).await? {
            warn!(account_id = id, reason = %RevocationReason::RecentlyBanned, "Refresh rejected");
            return Err(AuthError::AccountNotActive.into());
        }

        if self.revocation.is_kicked(id).await? {
            return Err(self.revoked(id, RevocationReason::Kicked));
        }

        if let Some(cutover) = self.revocation.get_mass_logout_cutover().await? {
            if claims.iat <= cutover {
                return Err(self.revoked(id, RevocationReason::MassLogout));
            }
        }

        let account = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !account.active {
            warn!(account_id = id, "Refresh rejected: account not active");
            return Err(AuthError::AccountNotActive.into());
        }

        debug!(account_id = id, "Access token refreshed");
        self.tokens.encode(
            &SessionPayload::from(&account),
            self.lifetimes.access,
            TokenType::Access,
        )
    }

    /// Public profile of the access token's account
    pub async fn me(&self, access_token: &str) -> DomainResult<Me> {
        let claims = self.decode(access_token, TokenType::Access)?;
        let account = self
            .users
            .find_by_id(claims.id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        Ok(Me::from(&account))
    }

    /// Ping the directory and the revocation cache concurrently
    pub async fn store_health(&self) -> StoreHealth {
        let (directory, cache) = tokio::join!(self.users.ping(), self.revocation.ping());

        if let Err(e) = &directory {
            warn!(error = %e, "Account directory is unreachable");
        }
        if let Err(e) = &cache {
            warn!(error = %e, "Revocation cache is unreachable");
        }

        StoreHealth {
            directory: directory.is_ok(),
            cache: cache.is_ok(),
        }
    }

    fn decode(&self, token: &str, expected: TokenType) -> DomainResult<SessionClaims> {
        self.tokens.decode(token, expected).map_err(|e| {
            debug!(error = %e, expected = %expected, "Token rejected");
            DomainError::from(AuthError::TokenDecodeFailed)
        })
    }

    fn revoked(&self, id: AccountId, reason: RevocationReason) -> DomainError {
        warn!(account_id = id, reason = %reason, "Refresh rejected");
        AuthError::SessionRevoked { reason }.into()
    }

    fn issue_pair(&self, payload: &SessionPayload) -> DomainResult<TokenPair> {
        Ok(TokenPair {
            access: self
                .tokens
                .encode(payload, self.lifetimes.access, TokenType::Access)?,
            refresh: self
                .tokens
                .encode(payload, self.lifetimes.refresh, TokenType::Refresh)?,
        })
    }

    async fn hash_password(&self, secret: String) -> DomainResult<String> {
        hash_blocking(self.passwords.clone(), secret).await
    }

    async fn verify_password(&self, hash: String, secret: String) -> DomainResult<PasswordMatch> {
        let passwords = self.passwords.clone();
        let result = tokio::task::spawn_blocking(move || passwords.verify(&hash, &secret))
            .await
            .map_err(|e| DomainError::internal(format!("password task failed: {}", e)))?;

        result.map_err(|e| match e {
            DomainError::Password(PasswordError::HashFailed { .. }) => e,
            DomainError::Password(_) => AuthError::PasswordMismatch.into(),
            other => other,
        })
    }

    /// Best-effort last-login update; failure never fails the login
    fn record_login(&self, id: AccountId) {
        let users = self.users.clone();
        let at = self.clock.now_utc();
        tokio::spawn(async move {
            if let Err(e) = users.update_last_login(id, at).await {
                warn!(account_id = id, error = %e, "Failed to update last login");
            }
        });
    }

    /// Best-effort rewrite of a legacy hash under the current hasher
    fn upgrade_hash(&self, id: AccountId, secret: String, strategy: &'static str) {
        let users = self.users.clone();
        let passwords = self.passwords.clone();
        tokio::spawn(async move {
            let rehashed = match hash_blocking(passwords, secret).await {
                Ok(hash) => hash,
                Err(e) => {
                    warn!(account_id = id, error = %e, "Failed to rehash password");
                    return;
                }
            };
            match users.set_password_hash(id, &rehashed).await {
                Ok(()) => info!(account_id = id, from = strategy, "Password hash upgraded"),
                Err(e) => warn!(account_id = id, error = %e, "Failed to store upgraded hash"),
            }
        });
    }
}

async fn hash_blocking(passwords: Arc<CompositeVerifier>, secret: String) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || passwords.hash(&secret))
        .await
        .map_err(|e| DomainError::internal(format!("password task failed: {}", e)))?
}
