use std::env;
use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("{missing} must be set together with {present}")]
    Incomplete { missing: &'static str, present: &'static str },
}

/// Admin account created at startup when it does not exist yet.
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub cors_permissive: bool,
    pub admin: Option<AdminSeed>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://eduadmin.db?mode=rwc".to_string());

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value })?,
            None => SocketAddr::from(([127, 0, 0, 1], 9999)),
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value }),
            },
            None => 5,
        };

        let cors_permissive = match lookup("CORS_PERMISSIVE") {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::Invalid { key: "CORS_PERMISSIVE", value }),
            },
            None => true,
        };

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => {
                if !email.contains('@') {
                    return Err(ConfigError::Invalid { key: "ADMIN_EMAIL", value: email });
                }
                if password.is_empty() {
                    return Err(ConfigError::Invalid { key: "ADMIN_PASSWORD", value: String::new() });
                }
                Some(AdminSeed {
                    email: email.trim().to_ascii_lowercase(),
                    password,
                })
            }
            (Some(_), None) => {
                return Err(ConfigError::Incomplete { missing: "ADMIN_PASSWORD", present: "ADMIN_EMAIL" });
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete { missing: "ADMIN_EMAIL", present: "ADMIN_PASSWORD" });
            }
            (None, None) => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            cors_permissive,
            admin,
        })
    }
}
