//! Member management, the most scope-sensitive surface.
//!
//! A delegate principal always acts as itself: on create, any client-supplied
//! owner id is ignored and the caller's own delegate record is used. Region
//! managers get read access plus delete within their active assignments; GM
//! is unrestricted except that it must name a valid owning delegate.

use chrono::Utc;
use tracing::info;

use adhera_access::{access_for, Access, Entity, Operation, Scope, ScopeResolver};
use adhera_auth::{Principal, Role};
use adhera_core::{DelegateId, DomainError, DomainResult, MemberId};
use adhera_directory::{Member, MemberStatus};

#[derive(Debug, Clone)]
pub struct CreateMember {
    pub cin: String,
    pub full_name: String,
    /// Required for GM callers; ignored for delegate callers.
    pub delegate_id: Option<DelegateId>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMember {
    pub full_name: Option<String>,
    pub status: Option<MemberStatus>,
}

/// List filters; all optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    pub status: Option<MemberStatus>,
    /// Case-insensitive substring match on CIN or full name.
    pub q: Option<String>,
}

#[derive(Clone)]
pub struct MembersService {
    resolver: ScopeResolver,
}

impl MembersService {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    fn owner_for_create(
        &self,
        principal: &Principal,
        requested: Option<DelegateId>,
    ) -> DomainResult<DelegateId> {
        match principal.role {
            Role::Delegate => self
                .resolver
                .own_delegate_id(principal)
                .ok_or_else(|| DomainError::validation("no delegate record for this user")),
            _ => {
                let delegate_id = requested
                    .ok_or_else(|| DomainError::validation("delegate_id is required"))?;
                if self
                    .resolver
                    .directory()
                    .delegates
                    .get(&delegate_id)
                    .is_none()
                {
                    return Err(DomainError::validation("unknown delegate"));
                }
                Ok(delegate_id)
            }
        }
    }

    pub fn create(&self, principal: &Principal, input: CreateMember) -> DomainResult<Member> {
        if access_for(principal.role, Entity::Member, Operation::Create) == Access::Deny {
            return Err(DomainError::forbidden("role may not create members"));
        }
        let cin = input.cin.trim().to_string();
        if cin.is_empty() {
            return Err(DomainError::validation("cin must not be empty"));
        }
        let dir = self.resolver.directory();
        if dir.members.list().iter().any(|m| m.cin == cin) {
            return Err(DomainError::validation("cin is already registered"));
        }
        let delegate_id = self.owner_for_create(principal, input.delegate_id)?;

        let now = Utc::now();
        let member = Member {
            id: MemberId::new(),
            cin,
            full_name: input.full_name,
            status: MemberStatus::Active,
            delegate_id,
            created_at: now,
            updated_at: now,
        };
        dir.members.upsert(member.id, member.clone());
        info!(member = %member.id, delegate = %delegate_id, "member created");
        Ok(member)
    }

    pub fn list(&self, principal: &Principal, query: &MemberQuery) -> DomainResult<Vec<Member>> {
        let now = Utc::now();
        let scope = self
            .resolver
            .resolve(principal, Entity::Member, Operation::List, now);
        match scope {
            Scope::Denied => Err(DomainError::forbidden("role may not list members")),
            Scope::Empty => Ok(vec![]),
            scope => {
                let needle = query.q.as_deref().map(str::to_lowercase);
                let mut members: Vec<Member> = self
                    .resolver
                    .directory()
                    .members
                    .list()
                    .into_iter()
                    .filter(|m| self.resolver.member_in_scope(&scope, m))
                    .filter(|m| query.status.is_none_or(|s| m.status == s))
                    .filter(|m| {
                        needle.as_deref().is_none_or(|n| {
                            m.cin.to_lowercase().contains(n)
                                || m.full_name.to_lowercase().contains(n)
                        })
                    })
                    .collect();
                members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(members)
            }
        }
    }

    pub fn get(&self, principal: &Principal, id: MemberId) -> DomainResult<Member> {
        self.resolver
            .guard_member(principal, id, Operation::Read, Utc::now())
    }

    pub fn update(
        &self,
        principal: &Principal,
        id: MemberId,
        input: UpdateMember,
    ) -> DomainResult<Member> {
        let mut member = self
            .resolver
            .guard_member(principal, id, Operation::Update, Utc::now())?;
        if let Some(full_name) = input.full_name {
            member.full_name = full_name;
        }
        if let Some(status) = input.status {
            member.status = status;
        }
        member.updated_at = Utc::now();
        self.resolver
            .directory()
            .members
            .upsert(member.id, member.clone());
        Ok(member)
    }

    /// Remove a member. Refused while payments still reference it, so the
    /// payment ledger never dangles.
    pub fn delete(&self, principal: &Principal, id: MemberId) -> DomainResult<()> {
        let member = self
            .resolver
            .guard_member(principal, id, Operation::Delete, Utc::now())?;
        let dir = self.resolver.directory();
        if dir.payments.list().iter().any(|p| p.member_id == member.id) {
            return Err(DomainError::validation("member has recorded payments"));
        }
        dir.members.remove(&member.id);
        info!(member = %member.id, "member deleted");
        Ok(())
    }
}
