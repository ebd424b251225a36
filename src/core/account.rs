//! # Account Session
//!
//! The signed-in user's details, held by `App` for the lifetime of a login.
//! Screens receive it by reference instead of reading a global.
//!
//! There is no authentication: signing in only checks that every field was
//! filled in. The password is kept so it can be changed from settings, and is
//! redacted from `Debug` output.

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

const FALLBACK_NAME: &str = "User";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Username,
    Email,
    Password,
}

impl AccountField {
    pub const ALL: [AccountField; 3] = [
        AccountField::Username,
        AccountField::Email,
        AccountField::Password,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccountField::Username => "Username",
            AccountField::Email => "Email",
            AccountField::Password => "Password",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("{} cannot be empty", .0.label())]
    EmptyValue(AccountField),
}

#[derive(Clone)]
pub struct UserSession {
    username: String,
    email: String,
    password: String,
    logged_in_at: DateTime<Utc>,
}

impl fmt::Debug for UserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSession")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("logged_in_at", &self.logged_in_at)
            .finish()
    }
}

/// Start a session from the login form. All fields are trimmed and required.
pub fn login(username: &str, email: &str, password: &str) -> Result<UserSession, AccountError> {
    let (username, email, password) = (username.trim(), email.trim(), password.trim());
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields);
    }
    Ok(UserSession {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        logged_in_at: Utc::now(),
    })
}

impl UserSession {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn logged_in_at(&self) -> DateTime<Utc> {
        self.logged_in_at
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Value shown next to a field in settings. Passwords are masked.
    pub fn display_value(&self, field: AccountField) -> &str {
        match field {
            AccountField::Username => &self.username,
            AccountField::Email => &self.email,
            AccountField::Password => "••••••••",
        }
    }

    /// Change one field. Empty values are rejected and leave the session as-is.
    pub fn update(&mut self, field: AccountField, value: &str) -> Result<(), AccountError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AccountError::EmptyValue(field));
        }
        let slot = match field {
            AccountField::Username => &mut self.username,
            AccountField::Email => &mut self.email,
            AccountField::Password => &mut self.password,
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// Name used in greetings: the username with its first letter capitalized,
/// or "User" when nobody is signed in.
pub fn display_name(session: Option<&UserSession>) -> String {
    let name = session.map_or(FALLBACK_NAME, |s| s.username());
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
