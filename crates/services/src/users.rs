//! User account administration (GM only).

use chrono::Utc;
use tracing::info;

use adhera_access::{access_for, Access, Entity, Operation, ScopeResolver};
use adhera_auth::{hash_password, Principal, Role, UserSummary};
use adhera_core::{DomainError, DomainResult, UserId};
use adhera_directory::UserRecord;

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Clone)]
pub struct UsersService {
    resolver: ScopeResolver,
}

impl UsersService {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    fn authorize(&self, principal: &Principal, op: Operation) -> DomainResult<()> {
        match access_for(principal.role, Entity::User, op) {
            Access::Full => Ok(()),
            _ => Err(DomainError::forbidden("user administration is GM-only")),
        }
    }

    pub fn create(&self, principal: &Principal, input: CreateUser) -> DomainResult<UserSummary> {
        self.authorize(principal, Operation::Create)?;
        let dir = self.resolver.directory();

        if dir.user_by_email(&input.email).is_some() {
            return Err(DomainError::validation("email is already in use"));
        }

        let now = Utc::now();
        let user = UserRecord {
            id: UserId::new(),
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)
                .map_err(|e| DomainError::validation(e.to_string()))?,
            role: input.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        dir.users.upsert(user.id, user.clone());
        info!(user = %user.id, role = %user.role, "user created");
        Ok(user.summary())
    }

    pub fn list(&self, principal: &Principal) -> DomainResult<Vec<UserSummary>> {
        self.authorize(principal, Operation::List)?;
        let mut users: Vec<UserRecord> = self
            .resolver
            .directory()
            .users
            .list()
            .into_iter()
            .filter(|u| !u.is_deleted())
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users.iter().map(UserRecord::summary).collect())
    }

    pub fn get(&self, principal: &Principal, id: UserId) -> DomainResult<UserSummary> {
        self.authorize(principal, Operation::Read)?;
        self.resolver
            .directory()
            .users
            .get(&id)
            .filter(|u| !u.is_deleted())
            .map(|u| u.summary())
            .ok_or(DomainError::NotFound)
    }

    pub fn update(
        &self,
        principal: &Principal,
        id: UserId,
        input: UpdateUser,
    ) -> DomainResult<UserSummary> {
        self.authorize(principal, Operation::Update)?;
        let dir = self.resolver.directory();
        let mut user = dir
            .users
            .get(&id)
            .filter(|u| !u.is_deleted())
            .ok_or(DomainError::NotFound)?;

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            if email != user.email && dir.user_by_email(&email).is_some() {
                return Err(DomainError::validation("email is already in use"));
            }
            user.email = email;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(password) = input.password {
            user.password_hash =
                hash_password(&password).map_err(|e| DomainError::validation(e.to_string()))?;
        }
        user.updated_at = Utc::now();
        dir.users.upsert(user.id, user.clone());
        Ok(user.summary())
    }

    /// Soft delete: the account is kept for audit but can never
    /// authenticate again.
    pub fn soft_delete(&self, principal: &Principal, id: UserId) -> DomainResult<UserSummary> {
        self.authorize(principal, Operation::Delete)?;
        let dir = self.resolver.directory();
        let mut user = dir
            .users
            .get(&id)
            .filter(|u| !u.is_deleted())
            .ok_or(DomainError::NotFound)?;
        user.deleted_at = Some(Utc::now());
        dir.users.upsert(user.id, user.clone());
        info!(user = %user.id, "user soft-deleted");
        Ok(user.summary())
    }
}
