//! HS256 token issuing and verification.
//!
//! [`TokenService`] is built once from a [`JwtConfig`] and cloned into the
//! application state. It owns the signing keys, the validation rules and the
//! two token lifetimes, so nothing here reads the environment.
//!
//! Verification stops at the first failure:
//!
//! 1. signature and algorithm (HS256 only)
//! 2. the payload parses as [`TokenClaims`]: `exp` is present and `type` is
//!    a known kind, otherwise [`TokenError::Malformed`]
//! 3. `exp` is not in the past (no leeway)
//! 4. `sub` is non-empty (a missing `sub` reads as empty)
//! 5. `type` matches the kind the caller expects
//!
//! Parsing happens before the expiry check, so an expired token with no
//! `type` reports `Malformed`. Callers at the HTTP boundary log the
//! [`TokenError`] and reply with [`AppError::invalid_credentials`] instead of
//! exposing it.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use classbook_config::JwtConfig;
use classbook_core::AppError;

use crate::claims::{TokenClaims, TokenKind};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature or algorithm is invalid")]
    InvalidSignature,
    #[error("token has no subject")]
    MissingSubject,
    #[error("token has expired")]
    Expired,
    #[error("expected a {expected} token, got a {found} token")]
    WrongKind {
        expected: TokenKind,
        found: TokenKind,
    },
    #[error("token is malformed")]
    Malformed,
}

impl TokenError {
    /// Logs the reason and collapses it into the uniform 401.
    pub fn into_rejection(self) -> AppError {
        tracing::debug!(reason = %self, "Bearer token rejected");
        AppError::invalid_credentials()
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: Duration::seconds(config.access_token_expiry),
            refresh_ttl: Duration::seconds(config.refresh_token_expiry),
        }
    }

    /// Access-token lifetime in seconds, reported to clients as `expires_in`.
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Signs a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str, kind: TokenKind, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = TokenClaims {
            sub: subject.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal_error(format!("Failed to create {} token: {}", kind, e)))
    }

    pub fn issue_access(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, TokenKind::Access, self.access_ttl)
    }

    pub fn issue_refresh(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, TokenKind::Refresh, self.refresh_ttl)
    }

    /// Validates `token` and checks it was minted as `expected`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.sub.is_empty() {
            return Err(TokenError::MissingSubject);
        }

        if claims.kind != expected {
            return Err(TokenError::WrongKind {
                expected,
                found: claims.kind,
            });
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &ALGORITHM)
            .field("access_ttl", &self.access_ttl.num_seconds())
            .field("refresh_ttl", &self.refresh_ttl.num_seconds())
            .finish_non_exhaustive()
    }
}
