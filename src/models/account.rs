use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::input::{self, Numeric};
use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserType {
    Parent,
    Teacher,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Parent => "parent",
            UserType::Teacher => "teacher",
            UserType::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(UserType::Parent),
            "teacher" => Ok(UserType::Teacher),
            "admin" => Ok(UserType::Admin),
            _ => Err(ValidationError::InvalidVariant {
                field: "userType",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub child_name: Option<String>,
    pub child_age: Option<i64>,
    pub subject: Option<String>,
    pub experience: Option<String>,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_type: UserType,
}

impl From<Account> for UserProfile {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name,
            last_name: a.last_name,
            email: a.email,
            user_type: a.user_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_type: Option<String>,
    pub form_data: Option<SignupForm>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub child_name: Option<String>,
    pub child_age: Option<Numeric>,
    pub subject: Option<String>,
    pub experience: Option<Numeric>,
}

/// Account fields ready for insertion; the password is still in clear
/// text here and is hashed by the auth service.
#[derive(Clone, PartialEq)]
pub struct NewAccount {
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub child_name: Option<String>,
    pub child_age: Option<i64>,
    pub subject: Option<String>,
    pub experience: Option<String>,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("user_type", &self.user_type)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

const MIN_PASSWORD_LEN: usize = 6;

impl SignupRequest {
    pub fn validate(self) -> Result<NewAccount, ValidationError> {
        let user_type: UserType = input::required(self.user_type, "userType")?.parse()?;
        if user_type == UserType::Admin {
            return Err(ValidationError::InvalidVariant {
                field: "userType",
                value: user_type.to_string(),
            });
        }
        let form = self.form_data.ok_or(ValidationError::Missing { field: "formData" })?;
        let email = normalize_email(input::required(form.email, "email")?)?;
        let password = form.password.unwrap_or_default();
        if password.is_empty() {
            return Err(ValidationError::Missing { field: "password" });
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::InvalidFormat {
                field: "password",
                reason: "must be at least 6 characters",
            });
        }

        let (child_name, child_age, subject, experience) = match user_type {
            UserType::Parent => (
                input::optional(form.child_name),
                form.child_age
                    .as_ref()
                    .filter(|a| **a != Numeric::Text(String::new()))
                    .map(|a| a.to_i64("childAge"))
                    .transpose()?,
                None,
                None,
            ),
            _ => (
                None,
                None,
                input::optional(form.subject),
                form.experience.map(|e| e.to_text()).filter(|e| !e.is_empty()),
            ),
        };

        Ok(NewAccount {
            user_type,
            first_name: input::required(form.first_name, "firstName")?,
            last_name: input::required(form.last_name, "lastName")?,
            email,
            password,
            child_name,
            child_age,
            subject,
            experience,
        })
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_type: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_type", &self.user_type)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

pub struct Credentials {
    pub user_type: UserType,
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, ValidationError> {
        let user_type = input::required(self.user_type, "userType")?.parse()?;
        let email = normalize_email(input::required(self.email, "email")?)?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::Missing { field: "password" })?;
        Ok(Credentials {
            user_type,
            email,
            password,
        })
    }
}

fn normalize_email(email: String) -> Result<String, ValidationError> {
    if !email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "expected an email address",
        });
    }
    Ok(email.to_ascii_lowercase())
}
