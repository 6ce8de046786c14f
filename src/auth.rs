//! Server-side admin authorization for moderation RPCs.
//!
//! Callers present `authorization: Bearer <token>`. The daemon never stores
//! raw tokens: the config lists SHA-256 hex digests, and a token is accepted
//! when its digest is one of them.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;
use tonic::metadata::MetadataMap;
use tonic::Status;

pub const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("admin credentials required")]
    MissingCredentials,

    #[error("authorization header must be 'Bearer <token>'")]
    Malformed,

    #[error("admin token not accepted")]
    Denied,
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials | AuthError::Malformed => {
                Status::unauthenticated(err.to_string())
            }
            AuthError::Denied => Status::permission_denied(err.to_string()),
        }
    }
}

/// SHA-256 of `token`, lowercase hex.
#[must_use]
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAuthorizer {
    token_digests: HashSet<String>,
}

impl AdminAuthorizer {
    pub fn new<I, S>(digests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let token_digests = digests
            .into_iter()
            .map(|d| d.as_ref().trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { token_digests }
    }

    /// Whether any admin token is configured at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.token_digests.is_empty()
    }

    pub fn check_token(&self, token: &str) -> Result<(), AuthError> {
        if self.token_digests.contains(&token_digest(token)) {
            Ok(())
        } else {
            Err(AuthError::Denied)
        }
    }

    /// Authorize a request from its metadata.
    pub fn authorize(&self, metadata: &MetadataMap) -> Result<(), AuthError> {
        let value = metadata
            .get(AUTHORIZATION_HEADER)
            .ok_or(AuthError::MissingCredentials)?
            .to_str()
            .map_err(|_| AuthError::Malformed)?;
        let token = bearer_token(value).ok_or(AuthError::Malformed)?;
        self.check_token(token)
    }

    #[must_use]
    pub fn is_admin(&self, metadata: &MetadataMap) -> bool {
        self.authorize(metadata).is_ok()
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
