use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::models::user::User;

pub const TOKEN_TTL: Duration = Duration::hours(2);

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User id
    pub username: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Who is calling, as embedded in the token at issuance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// HS256 keys derived once from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

pub fn generate_token(user: &User, keys: &JwtKeys) -> Result<String, jsonwebtoken::errors::Error> {
    generate_token_at(user, keys, OffsetDateTime::now_utc())
}

fn generate_token_at(user: &User, keys: &JwtKeys, issued_at: OffsetDateTime) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user.user_id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        iat: issued_at.unix_timestamp() as usize,
        exp: (issued_at + TOKEN_TTL).unix_timestamp() as usize,
    };
    encode(&Header::default(), &claims, &keys.encoding)
}

pub fn validate_token(token: &str, keys: &JwtKeys) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &keys.decoding, &Validation::new(jsonwebtoken::Algorithm::HS256))
        .map(|data| data.claims)
}

/// Recovers the caller from `Authorization: Bearer <token>`. Anything else,
/// including an expired or forged token, means an anonymous caller.
pub fn resolve_identity(headers: &HeaderMap, keys: &JwtKeys) -> Option<Identity> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|auth| auth.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))?;

    match validate_token(token, keys) {
        Ok(claims) => Some(Identity { id: claims.sub, username: claims.username, email: claims.email }),
        Err(err) => {
            log::debug!("Rejected bearer token: {}", err);
            None
        }
    }
}
