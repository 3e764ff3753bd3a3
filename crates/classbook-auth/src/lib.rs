//! # Classbook Auth
//!
//! Bearer-token primitives for the Classbook API.
//!
//! - [`claims`]: the claim set carried by every token and the [`TokenKind`]
//!   discriminator
//! - [`jwt`]: [`TokenService`], which signs and verifies HS256 tokens using an
//!   immutable [`JwtConfig`](classbook_config::JwtConfig)
//!
//! Tokens are stateless. Nothing is stored server-side, so a token stays
//! valid until its `exp` passes.
//!
//! # Example
//!
//! ```ignore
//! use classbook_auth::{TokenKind, TokenService};
//! use classbook_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let access = tokens.issue_access("t1")?;
//! let claims = tokens.verify(&access, TokenKind::Access)?;
//! assert_eq!(claims.sub, "t1");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{TokenClaims, TokenKind};
pub use jwt::{TokenError, TokenService};
