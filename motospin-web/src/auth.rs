//! Identity provider client
//!
//! Authentication is delegated to an external identity service; this module
//! defines the interface the session layer consumes and a reqwest-backed
//! client for it. Provider failure messages are passed through to the user
//! verbatim.

use async_trait::async_trait;
use motospin_common::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Default timeout for identity service requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// The authenticated user, as reported by the identity service.
///
/// Only `uid` is load-bearing; it scopes the favorites collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// The identity service operations the session layer consumes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<Identity>;
    async fn reset_password(&self, email: &str) -> Result<()>;
}

/// HTTP client for the configured identity service.
pub struct HttpIdentityProvider {
    http_client: Client,
    base_url: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
        }
    }

    /// POST a JSON body to an identity endpoint, mapping any non-success
    /// response into an [`Error::Auth`] carrying the service's message.
    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!(%url, "Identity service request");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Auth(format!("Identity service unreachable: {}", e)))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .unwrap_or_else(|_| json!({}));

        if !status.is_success() {
            // Pass the service's message through verbatim when it sent one
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Authentication failed ({})", status));
            return Err(Error::Auth(message));
        }

        Ok(payload)
    }

    fn parse_identity(payload: Value) -> Result<Identity> {
        serde_json::from_value(payload)
            .map_err(|e| Error::Auth(format!("Malformed identity response: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let payload = self
            .post("sign-in", json!({"email": email, "password": password}))
            .await?;
        Self::parse_identity(payload)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<Identity> {
        let payload = self
            .post(
                "sign-up",
                json!({
                    "email": email,
                    "password": password,
                    "display_name": display_name,
                }),
            )
            .await?;
        Self::parse_identity(payload)
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        self.post("reset-password", json!({"email": email})).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_parses_minimal_payload() {
        let identity =
            HttpIdentityProvider::parse_identity(json!({"uid": "user-1"})).unwrap();
        assert_eq!(identity.uid, "user-1");
        assert!(identity.display_name.is_none());
        assert!(identity.email.is_none());
    }

    #[test]
    fn identity_parses_full_payload() {
        let identity = HttpIdentityProvider::parse_identity(json!({
            "uid": "user-1",
            "display_name": "Ada",
            "email": "ada@example.com",
            "photo_url": "https://example.com/ada.png",
        }))
        .unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("Ada"));
        assert_eq!(identity.photo_url.as_deref(), Some("https://example.com/ada.png"));
    }

    #[test]
    fn missing_uid_is_an_auth_error() {
        let result = HttpIdentityProvider::parse_identity(json!({"email": "x@example.com"}));
        assert!(matches!(result, Err(Error::Auth(_))));
    }
}
