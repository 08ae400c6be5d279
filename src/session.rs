//! Bearer-token session over durable key-value storage.
//!
//! The session is created explicitly and handed to [`crate::remote::RemoteClient`];
//! nothing reads tokens from ambient global state.

use std::sync::Arc;

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use time::OffsetDateTime;

use crate::model::TokenPair;
use crate::store::TokenStorage;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// No access token stored.
    Anonymous,
    /// Token present and not expired. `expires_at` is the `exp` claim, when present.
    Active { expires_at: Option<OffsetDateTime> },
    Expired,
    /// Token present but not a decodable JWT.
    Malformed,
}

impl SessionStatus {
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Active { .. })
    }
}

pub struct AuthSession {
    storage: Arc<dyn TokenStorage>,
}

impl AuthSession {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    pub fn access_token(&self) -> Option<String> {
        match self.storage.get(ACCESS_TOKEN_KEY) {
            Ok(v) => v.filter(|t| !t.is_empty()),
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "read access token");
                None
            }
        }
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY).ok().flatten()
    }

    /// Value for the `Authorization` header, if a token is stored.
    pub fn authorization(&self) -> Option<String> {
        self.access_token().map(|t| format!("Bearer {}", t))
    }

    pub fn login(&self, tokens: &TokenPair) -> Result<()> {
        self.storage
            .set(ACCESS_TOKEN_KEY, &tokens.access)
            .context("store access token")?;
        self.storage
            .set(REFRESH_TOKEN_KEY, &tokens.refresh)
            .context("store refresh token")?;
        tracing::info!("session tokens stored");
        Ok(())
    }

    /// Removes both tokens. Used on logout and whenever the server rejects the token.
    pub fn purge(&self) -> Result<()> {
        self.storage
            .remove(ACCESS_TOKEN_KEY)
            .context("remove access token")?;
        self.storage
            .remove(REFRESH_TOKEN_KEY)
            .context("remove refresh token")?;
        tracing::info!("session tokens purged");
        Ok(())
    }

    pub fn status(&self, now: OffsetDateTime) -> SessionStatus {
        let Some(token) = self.access_token() else {
            return SessionStatus::Anonymous;
        };
        match token_expiry(&token) {
            Err(_) => SessionStatus::Malformed,
            Ok(Some(exp)) if exp <= now => SessionStatus::Expired,
            Ok(expires_at) => SessionStatus::Active { expires_at },
        }
    }

    pub fn is_authenticated(&self, now: OffsetDateTime) -> bool {
        self.status(now).is_active()
    }

    /// Startup check: expired or undecodable tokens are purged.
    pub fn restore(&self, now: OffsetDateTime) -> Result<SessionStatus> {
        let status = self.status(now);
        if matches!(status, SessionStatus::Expired | SessionStatus::Malformed) {
            tracing::debug!(?status, "discarding stored session");
            self.purge()?;
        }
        Ok(status)
    }
}

#[derive(Debug, serde::Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Reads the `exp` claim of a JWT without verifying its signature.
pub fn token_expiry(token: &str) -> Result<Option<OffsetDateTime>> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_sig), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        anyhow::bail!("token is not a JWT");
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .context("decode token payload")?;
    let claims: Claims = serde_json::from_slice(&bytes).context("parse token claims")?;
    claims
        .exp
        .map(|exp| OffsetDateTime::from_unix_timestamp(exp).context("token exp out of range"))
        .transpose()
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
