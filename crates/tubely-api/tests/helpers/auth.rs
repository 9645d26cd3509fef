use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tubely_api::auth::JwtClaims;
use uuid::Uuid;

/// Secret shared by the test app's verifier and the tokens minted here.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_ISSUER: &str = "tubely-access";

/// Mint a valid access token for `user_id`.
pub fn make_token(user_id: Uuid) -> String {
    make_token_with(user_id, TEST_JWT_SECRET, 3600)
}

pub fn make_token_with(user_id: Uuid, secret: &str, ttl_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        sub: user_id.to_string(),
        iss: TEST_ISSUER.to_string(),
        exp: now + ttl_secs,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
