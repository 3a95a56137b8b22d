//! MySQL implementation of the UserRepository trait.
//!
//! Accounts live in the `auth_user` table. Role tags are stored as one
//! comma-separated column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};

use fa_core::domain::entities::{Account, AccountId, NewAccount};
use fa_core::errors::{AuthError, DomainError};
use fa_core::repositories::UserRepository;

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, username, password, roles, active, verified, created_at, last_login
    FROM auth_user
"#;

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: Param<'_>) -> Result<Option<Account>, DomainError> {
        let sql = format!("{} WHERE {} = ? LIMIT 1", SELECT_ACCOUNT, filter);
        let query = sqlx::query(&sql);
        let query = match value {
            Param::Id(id) => query.bind(id),
            Param::Text(text) => query.bind(text),
        };

        let row = query.fetch_optional(&self.pool).await.map_err(query_failed)?;
        row.as_ref().map(row_to_account).transpose()
    }
}

enum Param<'a> {
    Id(AccountId),
    Text(&'a str),
}

/// Convert database row to Account entity
fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
    let column = |e: sqlx::Error| DomainError::store(format!("Failed to decode account row: {}", e));

    let roles: String = row.try_get("roles").map_err(column)?;

    Ok(Account {
        id: row.try_get("id").map_err(column)?,
        email: row.try_get("email").map_err(column)?,
        username: row.try_get("username").map_err(column)?,
        password_hash: row.try_get("password").map_err(column)?,
        roles: split_roles(&roles),
        active: row.try_get("active").map_err(column)?,
        verified: row.try_get("verified").map_err(column)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(column)?,
        last_login: row.try_get::<DateTime<Utc>, _>("last_login").map_err(column)?,
    })
}

pub(crate) fn split_roles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}

fn query_failed(e: sqlx::Error) -> DomainError {
    error!("Database query failed: {}", e);
    DomainError::store(format!("Database query failed: {}", e))
}

/// Map a unique key violation message to the matching duplicate error
pub(crate) fn duplicate_kind(message: &str) -> AuthError {
    if message.contains("uk_auth_user_username") {
        AuthError::DuplicateUsername
    } else {
        AuthError::DuplicateEmail
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        self.find_one("id", Param::Id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("email", Param::Text(email)).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("username", Param::Text(username)).await
    }

    async fn create(&self, account: NewAccount) -> Result<AccountId, DomainError> {
        let query = r#"
            INSERT INTO auth_user (email, username, password, roles, active, verified)
            VALUES (?, ?, ?, '', TRUE, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&account.email)
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(account.verified)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                let id = AccountId::try_from(done.last_insert_id())
                    .map_err(|_| DomainError::store("account id out of range"))?;
                debug!(account_id = id, "Account row inserted");
                Ok(id)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(duplicate_kind(db.message()).into())
            }
            Err(e) => Err(query_failed(e)),
        }
    }

    async fn update_last_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE auth_user SET last_login = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(())
    }

    async fn set_password_hash(&self, id: AccountId, hash: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE auth_user SET password = ? WHERE id = ?")
            .bind(hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(())
    }

    async fn set_active(&self, id: AccountId, active: bool) -> Result<(), DomainError> {
        sqlx::query("UPDATE auth_user SET active = ? WHERE id = ?")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(())
    }
}
