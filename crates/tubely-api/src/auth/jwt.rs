use super::{bearer_token, Identity, IdentityVerifier};
use axum::http::HeaderMap;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tubely_core::AppError;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub iss: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// HS256 bearer token verifier
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data = decode::<JwtClaims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::InvalidCredential("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::InvalidCredential("Invalid token issuer".to_string())
                }
                _ => AppError::InvalidCredential(format!("Invalid token: {}", e)),
            }
        })?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AppError::InvalidCredential("Invalid token subject".to_string()))
    }
}

impl IdentityVerifier for JwtVerifier {
    fn verify(&self, headers: &HeaderMap) -> Result<Identity, AppError> {
        let token = bearer_token(headers)?;
        let user_id = self.validate_token(token)?;
        Ok(Identity { user_id })
    }
}
