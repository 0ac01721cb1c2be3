//! Delegate management.
//!
//! Creation/update/deletion are GM-only. Region managers see the delegates
//! created under their active assignments; a delegate role sees none (the
//! entity is denied to it entirely).

use chrono::Utc;
use tracing::info;

use adhera_access::{access_for, Access, Entity, Operation, Scope, ScopeResolver};
use adhera_auth::{Principal, Role};
use adhera_core::{AssignmentId, DelegateId, DomainError, DomainResult, RegionId, UserId};
use adhera_directory::Delegate;

#[derive(Debug, Clone)]
pub struct CreateDelegate {
    pub name: String,
    pub phone: Option<String>,
    pub region_id: RegionId,
    pub assignment_id: AssignmentId,
    /// Optional login account; must hold the DELEGATE role and not be linked
    /// to another delegate record.
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDelegate {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
}

/// List filters; all optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct DelegateQuery {
    pub region_id: Option<RegionId>,
    /// Case-insensitive substring match on the delegate name.
    pub q: Option<String>,
}

#[derive(Clone)]
pub struct DelegatesService {
    resolver: ScopeResolver,
}

impl DelegatesService {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    pub fn create(&self, principal: &Principal, input: CreateDelegate) -> DomainResult<Delegate> {
        if access_for(principal.role, Entity::Delegate, Operation::Create) != Access::Full {
            return Err(DomainError::forbidden("delegate creation is GM-only"));
        }
        let dir = self.resolver.directory();
        let now = Utc::now();

        if dir.regions.get(&input.region_id).is_none() {
            return Err(DomainError::validation("unknown region"));
        }
        let assignment = dir
            .assignments
            .get(&input.assignment_id)
            .ok_or_else(|| DomainError::validation("unknown assignment"))?;
        if assignment.region_id != input.region_id {
            return Err(DomainError::validation(
                "assignment does not belong to the given region",
            ));
        }
        if !assignment.is_active_at(now) {
            return Err(DomainError::validation("assignment is not active"));
        }
        if let Some(user_id) = input.user_id {
            let user = dir
                .users
                .get(&user_id)
                .filter(|u| !u.is_deleted())
                .ok_or_else(|| DomainError::validation("unknown user"))?;
            if user.role != Role::Delegate {
                return Err(DomainError::validation(
                    "linked user must hold the DELEGATE role",
                ));
            }
            if dir.delegate_id_for_user(user_id).is_some() {
                return Err(DomainError::validation(
                    "user is already linked to a delegate",
                ));
            }
        }

        let delegate = Delegate {
            id: DelegateId::new(),
            name: input.name,
            phone: input.phone,
            region_id: input.region_id,
            assignment_id: input.assignment_id,
            user_id: input.user_id,
            created_at: now,
        };
        dir.delegates.upsert(delegate.id, delegate.clone());
        info!(delegate = %delegate.id, region = %delegate.region_id, "delegate created");
        Ok(delegate)
    }

    pub fn list(
        &self,
        principal: &Principal,
        query: &DelegateQuery,
    ) -> DomainResult<Vec<Delegate>> {
        let now = Utc::now();
        let scope = self
            .resolver
            .resolve(principal, Entity::Delegate, Operation::List, now);
        match scope {
            Scope::Denied => Err(DomainError::forbidden("role may not list delegates")),
            Scope::Empty => Ok(vec![]),
            scope => {
                let needle = query.q.as_deref().map(str::to_lowercase);
                let mut delegates: Vec<Delegate> = self
                    .resolver
                    .directory()
                    .delegates
                    .list()
                    .into_iter()
                    .filter(|d| self.resolver.delegate_in_scope(&scope, d))
                    .filter(|d| query.region_id.is_none_or(|r| d.region_id == r))
                    .filter(|d| {
                        needle
                            .as_deref()
                            .is_none_or(|n| d.name.to_lowercase().contains(n))
                    })
                    .collect();
                delegates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(delegates)
            }
        }
    }

    pub fn get(&self, principal: &Principal, id: DelegateId) -> DomainResult<Delegate> {
        self.resolver
            .guard_delegate(principal, id, Operation::Read, Utc::now())
    }

    pub fn update(
        &self,
        principal: &Principal,
        id: DelegateId,
        input: UpdateDelegate,
    ) -> DomainResult<Delegate> {
        if access_for(principal.role, Entity::Delegate, Operation::Update) != Access::Full {
            return Err(DomainError::forbidden("delegate updates are GM-only"));
        }
        let dir = self.resolver.directory();
        let mut delegate = dir.delegates.get(&id).ok_or(DomainError::NotFound)?;
        if let Some(name) = input.name {
            delegate.name = name;
        }
        if let Some(phone) = input.phone {
            delegate.phone = phone;
        }
        dir.delegates.upsert(delegate.id, delegate.clone());
        Ok(delegate)
    }

    /// Remove a delegate. Refused while any member is still owned by it; the
    /// members must be reassigned first.
    pub fn delete(&self, principal: &Principal, id: DelegateId) -> DomainResult<()> {
        if access_for(principal.role, Entity::Delegate, Operation::Delete) != Access::Full {
            return Err(DomainError::forbidden("delegate deletion is GM-only"));
        }
        let dir = self.resolver.directory();
        if dir.delegates.get(&id).is_none() {
            return Err(DomainError::NotFound);
        }
        if dir.members.list().iter().any(|m| m.delegate_id == id) {
            return Err(DomainError::validation(
                "delegate still owns members",
            ));
        }
        dir.delegates.remove(&id);
        info!(delegate = %id, "delegate deleted");
        Ok(())
    }
}
