use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use adhera_core::{DelegateId, UserId};

use crate::{Principal, Role};

/// What a token is good for. Carried in the `typ` claim so access and
/// refresh tokens cannot be swapped for one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// JWT claims model (transport-agnostic).
///
/// Beyond `sub`/`role`/`exp`, fields are advisory hints for callers: the
/// resolver recomputes anything authorization-critical from live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Email at issuance time (display hint).
    pub email: String,

    /// Role granted at issuance time.
    pub role: Role,

    /// Delegate identity, embedded only for the Delegate role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_id: Option<DelegateId>,

    /// Token use, `access` or `refresh`.
    pub typ: TokenUse,

    /// Issued-at, seconds since epoch.
    pub iat: i64,

    /// Expiration, seconds since epoch.
    pub exp: i64,
}

impl JwtClaims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// The principal these claims describe.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            role: self.role,
            delegate_id: self.delegate_id,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate JWT claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// lives in the token codec.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now.timestamp() < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
