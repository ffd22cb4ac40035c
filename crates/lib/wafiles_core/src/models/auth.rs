//! Account models.

use serde::{Deserialize, Serialize};

/// Authenticated account as returned by `/me` and `/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Bearer token issued on sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Registration request.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Form body for `/login` (OAuth2 password flow field names).
#[derive(Debug, Serialize)]
pub(crate) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
