//! Region-manager assignment administration (GM only).
//!
//! Thin authorization shell over the directory's assignment registry, which
//! owns the window validation rules. Deletion is denied for every role:
//! assignments are history, never removed, only closed.

use chrono::{DateTime, Utc};
use tracing::info;

use adhera_access::{access_for, Access, Entity, Operation, ScopeResolver};
use adhera_auth::Principal;
use adhera_core::{AssignmentId, DomainError, DomainResult, RegionId, UserId};
use adhera_directory::Assignment;

#[derive(Clone)]
pub struct AssignmentsService {
    resolver: ScopeResolver,
}

impl AssignmentsService {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    fn authorize(&self, principal: &Principal, op: Operation) -> DomainResult<()> {
        match access_for(principal.role, Entity::Assignment, op) {
            Access::Full => Ok(()),
            _ => Err(DomainError::forbidden(
                "assignment administration is GM-only",
            )),
        }
    }

    pub fn grant(
        &self,
        principal: &Principal,
        user_id: UserId,
        region_id: RegionId,
        start_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Assignment> {
        self.authorize(principal, Operation::Create)?;
        let now = Utc::now();
        let assignment = self
            .resolver
            .directory()
            .grant_assignment(user_id, region_id, start_at, now)?;
        info!(
            assignment = %assignment.id,
            manager = %user_id,
            region = %region_id,
            "assignment granted"
        );
        Ok(assignment)
    }

    pub fn revoke(
        &self,
        principal: &Principal,
        id: AssignmentId,
        end_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Assignment> {
        self.authorize(principal, Operation::Update)?;
        let now = Utc::now();
        let assignment = self.resolver.directory().revoke_assignment(id, end_at, now)?;
        info!(assignment = %assignment.id, "assignment revoked");
        Ok(assignment)
    }

    pub fn list(&self, principal: &Principal) -> DomainResult<Vec<Assignment>> {
        self.authorize(principal, Operation::List)?;
        let mut assignments = self.resolver.directory().assignments.list();
        assignments.sort_by(|a, b| b.start_at.cmp(&a.start_at));
        Ok(assignments)
    }

    pub fn get(&self, principal: &Principal, id: AssignmentId) -> DomainResult<Assignment> {
        self.authorize(principal, Operation::Read)?;
        self.resolver
            .directory()
            .assignments
            .get(&id)
            .ok_or(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhera_auth::Role;
    use adhera_directory::{Directory, Region, UserRecord};

    fn seeded() -> (AssignmentsService, Principal, UserId, RegionId) {
        let dir = Directory::in_memory();
        let now = Utc::now();
        let manager = UserRecord {
            id: UserId::new(),
            name: "M".to_string(),
            email: "m@example.com".to_string(),
            password_hash: String::new(),
            role: Role::RegionManager,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let region = Region {
            id: RegionId::new(),
            name: "Nord".to_string(),
            created_at: now,
        };
        dir.users.upsert(manager.id, manager.clone());
        dir.regions.upsert(region.id, region.clone());
        let gm = Principal::new(UserId::new(), Role::GlobalManager);
        (
            AssignmentsService::new(ScopeResolver::new(dir)),
            gm,
            manager.id,
            region.id,
        )
    }

    #[test]
    fn gm_grants_lists_and_revokes() {
        let (svc, gm, manager, region) = seeded();
        let granted = svc.grant(&gm, manager, region, None).unwrap();
        assert!(granted.end_at.is_none());
        assert_eq!(svc.list(&gm).unwrap().len(), 1);

        let revoked = svc.revoke(&gm, granted.id, None).unwrap();
        assert!(revoked.end_at.is_some());
        // Closed, not deleted.
        assert_eq!(svc.get(&gm, granted.id).unwrap().id, granted.id);
    }

    #[test]
    fn non_gm_roles_cannot_touch_assignments() {
        let (svc, gm, manager, region) = seeded();
        let granted = svc.grant(&gm, manager, region, None).unwrap();
        for role in [Role::RegionManager, Role::Delegate] {
            let p = Principal::new(UserId::new(), role);
            assert!(matches!(
                svc.grant(&p, manager, region, None).unwrap_err(),
                DomainError::Forbidden(_)
            ));
            assert!(matches!(svc.list(&p).unwrap_err(), DomainError::Forbidden(_)));
            assert!(matches!(
                svc.revoke(&p, granted.id, None).unwrap_err(),
                DomainError::Forbidden(_)
            ));
        }
    }

    #[test]
    fn registry_validation_errors_pass_through() {
        let (svc, gm, manager, region) = seeded();
        svc.grant(&gm, manager, region, None).unwrap();
        // Duplicate active assignment for the same manager/region pair.
        assert!(matches!(
            svc.grant(&gm, manager, region, None).unwrap_err(),
            DomainError::Validation(_)
        ));
        // Unknown manager.
        assert!(matches!(
            svc.grant(&gm, UserId::new(), region, None).unwrap_err(),
            DomainError::Validation(_)
        ));
    }
}
