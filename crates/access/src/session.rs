//! Credential validation and token issuance.
//!
//! Login verifies email + password against the directory (rejecting
//! soft-deleted accounts) and issues an access/refresh token pair. For a
//! Delegate the resolved delegate id is embedded at issuance time; no
//! region-manager scope is ever embedded — that is recomputed live on every
//! request by the resolver.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use adhera_auth::{
    validate_claims, verify_password, JwtClaims, Role, TokenCodec, TokenUse, UserSummary,
};
use adhera_core::{DomainError, DomainResult};
use adhera_directory::Directory;

/// Token lifetimes.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Access token lifetime in seconds (default: 1h).
    pub access_token_ttl: i64,
    /// Refresh token lifetime in seconds (default: 7 days).
    pub refresh_token_ttl: i64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: 3_600,
            refresh_token_ttl: 604_800,
        }
    }
}

/// Signed access/refresh pair returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Stateless login/refresh service.
#[derive(Clone)]
pub struct SessionService {
    dir: Directory,
    codec: Arc<dyn TokenCodec>,
    config: AccessConfig,
}

impl SessionService {
    pub fn new(dir: Directory, codec: Arc<dyn TokenCodec>, config: AccessConfig) -> Self {
        Self { dir, codec, config }
    }

    /// Verify email + password. Never returns the stored hash.
    ///
    /// All three failure modes (unknown email, wrong password, soft-deleted
    /// account) collapse into the same `Unauthorized`.
    pub fn authenticate(&self, email: &str, plain_password: &str) -> DomainResult<UserSummary> {
        let user = match self.dir.user_by_email(email) {
            Some(u) => u,
            None => {
                warn!(email, "login rejected: unknown email");
                return Err(DomainError::Unauthorized);
            }
        };
        if user.is_deleted() {
            warn!(user = %user.id, "login rejected: account disabled");
            return Err(DomainError::Unauthorized);
        }
        if !verify_password(plain_password, &user.password_hash) {
            warn!(user = %user.id, "login rejected: bad password");
            return Err(DomainError::Unauthorized);
        }
        Ok(user.summary())
    }

    /// Issue a token pair for an authenticated user.
    pub fn issue(&self, user: &UserSummary, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        // Delegate identity is embedded once at issuance; it is the only
        // role-specific hint a token carries.
        let delegate_id = if user.role == Role::Delegate {
            self.dir.delegate_id_for_user(user.id)
        } else {
            None
        };

        let access = JwtClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            delegate_id,
            typ: TokenUse::Access,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.access_token_ttl)).timestamp(),
        };
        let refresh = JwtClaims {
            typ: TokenUse::Refresh,
            exp: (now + Duration::seconds(self.config.refresh_token_ttl)).timestamp(),
            ..access.clone()
        };

        let access_token = self
            .codec
            .encode(&access)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        let refresh_token = self
            .codec
            .encode(&refresh)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        info!(user = %user.id, role = %user.role, "token pair issued");
        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer",
            expires_in: self.config.access_token_ttl,
        })
    }

    /// Login: authenticate then issue.
    pub fn login(
        &self,
        email: &str,
        plain_password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenPair> {
        let user = self.authenticate(email, plain_password)?;
        self.issue(&user, now)
    }

    /// Exchange a refresh token for a fresh pair.
    ///
    /// Re-checks that the subject still exists and has not been soft-deleted
    /// since issuance.
    pub fn refresh(&self, refresh_token: &str, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let claims = self
            .codec
            .decode(refresh_token)
            .map_err(|_| DomainError::Unauthorized)?;
        validate_claims(&claims, now).map_err(|_| DomainError::Unauthorized)?;
        if claims.typ != TokenUse::Refresh {
            warn!(user = %claims.sub, "refresh rejected: not a refresh token");
            return Err(DomainError::Unauthorized);
        }

        let user = self
            .dir
            .users
            .get(&claims.sub)
            .filter(|u| !u.is_deleted())
            .ok_or(DomainError::Unauthorized)?;

        self.issue(&user.summary(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhera_auth::{hash_password, Hs256TokenCodec};
    use adhera_core::{AssignmentId, DelegateId, RegionId, UserId};
    use adhera_directory::{Delegate, UserRecord};

    fn service() -> (SessionService, Directory) {
        let dir = Directory::in_memory();
        let codec = Arc::new(Hs256TokenCodec::new(b"test-secret"));
        (
            SessionService::new(dir.clone(), codec, AccessConfig::default()),
            dir,
        )
    }

    fn seed_user(dir: &Directory, role: Role, email: &str, password: &str) -> UserRecord {
        let now = Utc::now();
        let user = UserRecord {
            id: UserId::new(),
            name: email.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        dir.users.upsert(user.id, user.clone());
        user
    }

    #[test]
    fn login_issues_a_decodable_pair() {
        let (svc, dir) = service();
        seed_user(&dir, Role::GlobalManager, "gm@example.com", "password123");
        let pair = svc.login("gm@example.com", "password123", Utc::now()).unwrap();
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3_600);
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let (svc, dir) = service();
        let user = seed_user(&dir, Role::Delegate, "d@example.com", "password123");

        let unknown = svc.login("nobody@example.com", "password123", Utc::now());
        let wrong = svc.login("d@example.com", "wrong", Utc::now());

        let mut deleted_user = user;
        deleted_user.deleted_at = Some(Utc::now());
        dir.users.upsert(deleted_user.id, deleted_user);
        let disabled = svc.login("d@example.com", "password123", Utc::now());

        for outcome in [unknown, wrong, disabled] {
            assert_eq!(outcome.unwrap_err(), DomainError::Unauthorized);
        }
    }

    #[test]
    fn delegate_tokens_embed_the_delegate_id() {
        let (svc, dir) = service();
        let user = seed_user(&dir, Role::Delegate, "d@example.com", "password123");
        let delegate = Delegate {
            id: DelegateId::new(),
            name: "D1".to_string(),
            phone: None,
            region_id: RegionId::new(),
            assignment_id: AssignmentId::new(),
            user_id: Some(user.id),
            created_at: Utc::now(),
        };
        dir.delegates.upsert(delegate.id, delegate.clone());

        let pair = svc.login("d@example.com", "password123", Utc::now()).unwrap();
        let codec = Hs256TokenCodec::new(b"test-secret");
        let claims = adhera_auth::TokenCodec::decode(&codec, &pair.access_token).unwrap();
        assert_eq!(claims.delegate_id, Some(delegate.id));
        assert_eq!(claims.role, Role::Delegate);
    }

    #[test]
    fn manager_tokens_carry_no_scope_hints() {
        let (svc, dir) = service();
        seed_user(&dir, Role::RegionManager, "m@example.com", "password123");
        let pair = svc.login("m@example.com", "password123", Utc::now()).unwrap();
        let codec = Hs256TokenCodec::new(b"test-secret");
        let claims = adhera_auth::TokenCodec::decode(&codec, &pair.access_token).unwrap();
        assert_eq!(claims.delegate_id, None);
    }

    #[test]
    fn refresh_rejects_a_user_deleted_after_issuance() {
        let (svc, dir) = service();
        let user = seed_user(&dir, Role::RegionManager, "m@example.com", "password123");
        let pair = svc.login("m@example.com", "password123", Utc::now()).unwrap();

        let mut gone = user;
        gone.deleted_at = Some(Utc::now());
        dir.users.upsert(gone.id, gone);

        assert_eq!(
            svc.refresh(&pair.refresh_token, Utc::now()).unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[test]
    fn issued_tokens_are_marked_by_use() {
        let (svc, dir) = service();
        seed_user(&dir, Role::GlobalManager, "gm@example.com", "password123");
        let pair = svc.login("gm@example.com", "password123", Utc::now()).unwrap();
        let codec = Hs256TokenCodec::new(b"test-secret");
        let access = adhera_auth::TokenCodec::decode(&codec, &pair.access_token).unwrap();
        let refresh = adhera_auth::TokenCodec::decode(&codec, &pair.refresh_token).unwrap();
        assert_eq!(access.typ, TokenUse::Access);
        assert_eq!(refresh.typ, TokenUse::Refresh);
    }

    #[test]
    fn refresh_rejects_an_access_token() {
        let (svc, dir) = service();
        seed_user(&dir, Role::GlobalManager, "gm@example.com", "password123");
        let pair = svc.login("gm@example.com", "password123", Utc::now()).unwrap();
        assert_eq!(
            svc.refresh(&pair.access_token, Utc::now()).unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[test]
    fn refresh_returns_a_new_valid_pair() {
        let (svc, dir) = service();
        seed_user(&dir, Role::GlobalManager, "gm@example.com", "password123");
        let pair = svc.login("gm@example.com", "password123", Utc::now()).unwrap();
        let refreshed = svc.refresh(&pair.refresh_token, Utc::now()).unwrap();
        assert!(!refreshed.access_token.is_empty());
    }

    #[test]
    fn refresh_rejects_garbage_tokens() {
        let (svc, _) = service();
        assert_eq!(
            svc.refresh("garbage", Utc::now()).unwrap_err(),
            DomainError::Unauthorized
        );
    }
}
