//! Caller authentication
//!
//! Uploads are authorized against the `sub` of a bearer JWT. The verifier is
//! a trait object so the upload pipeline does not depend on how tokens are
//! issued.

pub mod jwt;

use axum::http::HeaderMap;
use tubely_core::AppError;
use uuid::Uuid;

pub use jwt::{JwtClaims, JwtVerifier};

/// Verified caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

pub trait IdentityVerifier: Send + Sync {
    /// Resolve the caller from request headers.
    ///
    /// Fails with `Unauthenticated` when no usable credential is present and
    /// with `InvalidCredential` when the credential does not verify.
    fn verify(&self, headers: &HeaderMap) -> Result<Identity, AppError>;
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("Couldn't find JWT".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated("Malformed authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("Malformed authorization header".to_string()))?;

    Ok(token)
}
