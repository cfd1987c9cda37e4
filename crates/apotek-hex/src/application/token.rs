use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use apotek_types::domain::user::User;

pub const TOKEN_TYPE_BEARER: &str = "Bearer";
const SECONDS_PER_HOUR: i64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Signs and verifies HS256 tokens for the user service.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    expiration_hours: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: impl Into<Vec<u8>>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    pub fn issue(&self, user: &User) -> anyhow::Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .context("token lifetime out of range")?;
        let expires_in = self
            .expiration_hours
            .checked_mul(SECONDS_PER_HOUR)
            .context("token lifetime out of range")?;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };
        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )?;
        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        })
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}
