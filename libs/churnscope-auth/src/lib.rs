//! Identity tokens, password hashing and request authentication.
//!
//! Three concerns live here because they form one trust boundary:
//! - [`token`]: stateless signed identity tokens with a fixed validity window
//! - [`password`]: one-way argon2id credential hashing
//! - [`axum_ext`]: the `require_auth` middleware and [`CurrentUser`] extractor
//!
//! No code path outside [`token::TokenCodec::verify`] accepts a subject claim.

pub mod axum_ext;
pub mod password;
pub mod token;

pub use axum_ext::{CurrentUser, extract_bearer_token, require_auth};
pub use password::{hash_password, verify_password};
pub use token::{TokenCodec, TokenError};
