//! Account client: sign-in, registration and sign-out.
//!
//! The issued credential is handed to the transport, which owns its storage.

use std::sync::Arc;

use tracing::info;

use crate::error::ClientResult;
use crate::models::auth::{LoginForm, RegisterData, Token, User};
use crate::transport::AuthTransport;

pub struct AuthClient {
    transport: Arc<AuthTransport>,
}

impl AuthClient {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self { transport }
    }

    /// Exchange email and password for a bearer token and persist it.
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Token> {
        let token: Token = self
            .transport
            .post_form(
                "/login",
                &LoginForm {
                    username: email,
                    password,
                },
            )
            .await?;
        self.transport.store_credential(&token.access_token)?;
        info!(email, "signed in");
        Ok(token)
    }

    pub async fn register(&self, data: &RegisterData) -> ClientResult<User> {
        self.transport.post_json("/register", data).await
    }

    /// Account the stored credential belongs to.
    pub async fn me(&self) -> ClientResult<User> {
        self.transport.get("/me").await
    }

    /// Forget the credential. No server call is made.
    pub fn sign_out(&self) -> ClientResult<()> {
        self.transport.clear_credential()?;
        info!("signed out");
        Ok(())
    }

    pub fn is_signed_in(&self) -> bool {
        self.transport.has_credential()
    }
}
