use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::AdminSeed;
use crate::db::accounts;
use crate::error::AppError;
use crate::models::{Credentials, NewAccount, UserProfile, UserType};
use crate::services::password::{hash_password, verify_password};

pub async fn signup(db: &SqlitePool, account: NewAccount) -> Result<UserProfile, AppError> {
    let hash = hash_password(&account.password);
    let stored = accounts::insert_account(db, &account, &hash)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "an account with this email already exists"))?;

    info!("Registered {} account {}", stored.user_type, stored.id);
    Ok(stored.into())
}

/// Creates the configured admin account unless one with that email already
/// exists. Returns whether a row was written.
pub async fn seed_admin(db: &SqlitePool, seed: &AdminSeed) -> Result<bool, AppError> {
    if accounts::find_account_by_email(db, UserType::Admin, &seed.email).await?.is_some() {
        info!("Admin account {} already present", seed.email);
        return Ok(false);
    }

    let admin = NewAccount {
        user_type: UserType::Admin,
        first_name: "System".to_string(),
        last_name: "Administrator".to_string(),
        email: seed.email.clone(),
        password: seed.password.clone(),
        child_name: None,
        child_age: None,
        subject: None,
        experience: None,
    };
    let hash = hash_password(&admin.password);
    match accounts::insert_account(db, &admin, &hash).await {
        Ok(stored) => {
            info!("Seeded admin account {}", stored.id);
            Ok(true)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Unknown email and wrong password both yield `Unauthorized`.
pub async fn login(db: &SqlitePool, credentials: Credentials) -> Result<UserProfile, AppError> {
    let Some(account) = accounts::find_account_by_email(db, credentials.user_type, &credentials.email).await? else {
        warn!("Login failed for unknown {} account", credentials.user_type);
        return Err(AppError::Unauthorized);
    };

    if !verify_password(&credentials.password, &account.password_salt, &account.password_hash) {
        warn!("Login failed for account {}", account.id);
        return Err(AppError::Unauthorized);
    }

    info!("Account {} logged in", account.id);
    Ok(account.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::accounts::tests::new_parent;
    use crate::db::setup_test_db;

    fn credentials(password: &str) -> Credentials {
        Credentials {
            user_type: UserType::Parent,
            email: "sarah@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let pool = setup_test_db().await;
        let profile = signup(&pool, new_parent("sarah@example.com"))
            .await
            .expect("Failed to sign up");

        let logged_in = login(&pool, credentials("secret-pass"))
            .await
            .expect("Failed to log in");
        assert_eq!(logged_in, profile);

        assert!(matches!(
            login(&pool, credentials("wrong-pass")).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let pool = setup_test_db().await;
        signup(&pool, new_parent("sarah@example.com")).await.unwrap();
        let err = signup(&pool, new_parent("sarah@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let pool = setup_test_db().await;
        let seed = AdminSeed {
            email: "admin@example.com".to_string(),
            password: "admin-pass".to_string(),
        };

        assert!(seed_admin(&pool, &seed).await.expect("Failed to seed admin"));
        assert!(!seed_admin(&pool, &seed).await.expect("Failed to re-seed admin"));

        let admin = login(
            &pool,
            Credentials {
                user_type: UserType::Admin,
                email: "admin@example.com".to_string(),
                password: "admin-pass".to_string(),
            },
        )
        .await
        .expect("seeded admin should log in");
        assert_eq!(admin.user_type, UserType::Admin);
    }
}
