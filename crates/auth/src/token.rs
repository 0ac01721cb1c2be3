//! Signed credential token encoding/decoding.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::JwtClaims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Encode(String),

    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Codec turning claims into signed tokens and back.
///
/// Behind a trait so the API layer and tests can swap implementations without
/// caring about the signing algorithm.
pub trait TokenCodec: Send + Sync {
    fn encode(&self, claims: &JwtClaims) -> Result<String, TokenError>;
    fn decode(&self, token: &str) -> Result<JwtClaims, TokenError>;
}

/// HS256 symmetric-secret codec.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn encode(&self, claims: &JwtClaims) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<JwtClaims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let data = decode::<JwtClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }
}

impl<T: TokenCodec + ?Sized> TokenCodec for std::sync::Arc<T> {
    fn encode(&self, claims: &JwtClaims) -> Result<String, TokenError> {
        (**self).encode(claims)
    }

    fn decode(&self, token: &str) -> Result<JwtClaims, TokenError> {
        (**self).decode(token)
    }
}
