use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::{Account, NewAccount, UserType};
use crate::services::password::PasswordHash;

const ACCOUNT_COLUMNS: &str = "id, user_type, first_name, last_name, email, password_hash, \
     password_salt, child_name, child_age, subject, experience";

/// Stores the account with an already hashed password. A second account
/// with the same type and email fails with a unique violation.
pub async fn insert_account(
    db: &SqlitePool,
    account: &NewAccount,
    password: &PasswordHash,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        r#"
        INSERT INTO accounts
            (user_type, first_name, last_name, email, password_hash, password_salt,
            child_name, child_age, subject, experience)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        RETURNING {ACCOUNT_COLUMNS}
        "#
    ))
    .bind(account.user_type)
    .bind(&account.first_name)
    .bind(&account.last_name)
    .bind(&account.email)
    .bind(&password.hash)
    .bind(&password.salt)
    .bind(&account.child_name)
    .bind(account.child_age)
    .bind(&account.subject)
    .bind(&account.experience)
    .fetch_one(db)
    .await
}

pub async fn find_account_by_email(
    db: &SqlitePool,
    user_type: UserType,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE user_type = ? AND email = ?"
    ))
    .bind(user_type)
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn find_parent<'e, E>(db: E, id: i64) -> Result<Option<Account>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ? AND user_type = 'parent'"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}
