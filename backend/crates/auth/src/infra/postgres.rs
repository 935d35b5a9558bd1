//! PostgreSQL Credential Store

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use platform::password::HashedPassword;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::{CredentialStore, StoreError, StoreResult};
use crate::domain::value_object::{account_id::AccountId, email::Email};

/// Postgres unique_violation error code
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn create(&self, new_account: NewAccount) -> StoreResult<Account> {
        let account_id = AccountId::new();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                password_hash,
                first_name,
                last_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(new_account.email.as_str())
        .bind(new_account.password_hash.as_phc_string())
        .bind(new_account.first_name.as_deref())
        .bind(new_account.last_name.as_deref())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(Account {
            account_id,
            email: new_account.email,
            password_hash: Some(new_account.password_hash),
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                first_name,
                last_name,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }
}

/// 23505 on the email uniqueness constraint means the identifier is
/// taken; everything else is an ordinary database failure.
fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::DuplicateIdentifier;
        }
    }
    StoreError::Database(err)
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    password_hash: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> StoreResult<Account> {
        let password_hash = self
            .password_hash
            .map(HashedPassword::from_phc_string)
            .transpose()
            .map_err(|_| {
                StoreError::Database(sqlx::Error::Decode(
                    "invalid password hash in accounts row".into(),
                ))
            })?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
