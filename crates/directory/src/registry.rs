//! Assignment Registry: time-bounded grants of region-manager authority.
//!
//! The active sets computed here are the authoritative source of truth for
//! region-manager scoping. They are recomputed from the store on every call;
//! nothing here is ever served from a value embedded in a credential token.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::info;

use adhera_auth::Role;
use adhera_core::{AssignmentId, DomainError, DomainResult, RegionId, UserId};

use crate::model::Assignment;
use crate::store::Directory;

impl Directory {
    /// Grant a region-manager assignment over a region.
    ///
    /// Rejects unknown users/regions, users without the RegionManager role,
    /// and a second *active* assignment for the same (user, region) pair.
    pub fn grant_assignment(
        &self,
        user_id: UserId,
        region_id: RegionId,
        start_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<Assignment> {
        let user = self
            .users
            .get(&user_id)
            .ok_or_else(|| DomainError::validation("unknown user"))?;
        if user.role != Role::RegionManager {
            return Err(DomainError::validation(
                "user must hold the REGION_MANAGER role",
            ));
        }
        if self.regions.get(&region_id).is_none() {
            return Err(DomainError::validation("unknown region"));
        }

        // Check-then-act; the race window under concurrent grants is closed
        // by a storage-level unique constraint in relational deployments.
        let duplicate = self
            .assignments
            .list()
            .into_iter()
            .any(|a| a.user_id == user_id && a.region_id == region_id && a.is_active_at(now));
        if duplicate {
            return Err(DomainError::validation(
                "an active assignment already exists for this user and region",
            ));
        }

        let assignment = Assignment {
            id: AssignmentId::new(),
            user_id,
            region_id,
            start_at: start_at.unwrap_or(now),
            end_at: None,
        };
        self.assignments.upsert(assignment.id, assignment.clone());
        info!(user = %user_id, region = %region_id, assignment = %assignment.id, "assignment granted");
        Ok(assignment)
    }

    /// Close an assignment (`end_at` defaults to now). Assignments are never
    /// deleted, so history is preserved.
    pub fn revoke_assignment(
        &self,
        assignment_id: AssignmentId,
        end_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<Assignment> {
        let mut assignment = self
            .assignments
            .get(&assignment_id)
            .ok_or(DomainError::NotFound)?;
        assignment.end_at = Some(end_at.unwrap_or(now));
        self.assignments.upsert(assignment.id, assignment.clone());
        info!(assignment = %assignment.id, "assignment revoked");
        Ok(assignment)
    }

    /// All regions the user currently manages. Empty set if none.
    pub fn active_region_ids_for(&self, user_id: UserId, now: DateTime<Utc>) -> HashSet<RegionId> {
        self.assignments
            .list()
            .into_iter()
            .filter(|a| a.user_id == user_id && a.is_active_at(now))
            .map(|a| a.region_id)
            .collect()
    }

    /// All currently-active assignment ids held by the user.
    ///
    /// Used when scoping by assignment identity rather than region identity:
    /// a delegate's parent link is an assignment, so this excludes delegates
    /// created under a now-closed assignment even if another assignment later
    /// reopened the same region.
    pub fn active_assignment_ids_for(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> HashSet<AssignmentId> {
        self.assignments
            .list()
            .into_iter()
            .filter(|a| a.user_id == user_id && a.is_active_at(now))
            .map(|a| a.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Region, UserRecord};
    use chrono::Duration;

    fn dir_with_manager() -> (Directory, UserId, RegionId) {
        let dir = Directory::in_memory();
        let now = Utc::now();
        let user = UserRecord {
            id: UserId::new(),
            name: "Manager".to_string(),
            email: "manager@example.com".to_string(),
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
        dir.users.upsert(user.id, user.clone());
        dir.regions.upsert(region.id, region.clone());
        (dir, user.id, region.id)
    }

    #[test]
    fn grant_creates_an_open_ended_assignment() {
        let (dir, user_id, region_id) = dir_with_manager();
        let now = Utc::now();
        let a = dir.grant_assignment(user_id, region_id, None, now).unwrap();
        assert_eq!(a.end_at, None);
        assert!(dir.active_region_ids_for(user_id, now).contains(&region_id));
    }

    #[test]
    fn grant_rejects_duplicate_active_assignment() {
        let (dir, user_id, region_id) = dir_with_manager();
        let now = Utc::now();
        dir.grant_assignment(user_id, region_id, None, now).unwrap();
        let err = dir.grant_assignment(user_id, region_id, None, now).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn grant_allowed_again_after_previous_assignment_closed() {
        let (dir, user_id, region_id) = dir_with_manager();
        let now = Utc::now();
        let first = dir.grant_assignment(user_id, region_id, None, now).unwrap();
        dir.revoke_assignment(first.id, None, now).unwrap();
        let later = now + Duration::seconds(1);
        assert!(dir.grant_assignment(user_id, region_id, None, later).is_ok());
    }

    #[test]
    fn grant_rejects_non_manager_user() {
        let (dir, _user_id, region_id) = dir_with_manager();
        let now = Utc::now();
        let delegate_user = UserRecord {
            id: UserId::new(),
            name: "D".to_string(),
            email: "d@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Delegate,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        dir.users.upsert(delegate_user.id, delegate_user.clone());
        let err = dir
            .grant_assignment(delegate_user.id, region_id, None, now)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn revoke_unknown_assignment_is_not_found() {
        let (dir, _, _) = dir_with_manager();
        let err = dir
            .revoke_assignment(AssignmentId::new(), None, Utc::now())
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn revocation_is_visible_on_the_very_next_call() {
        let (dir, user_id, region_id) = dir_with_manager();
        let now = Utc::now();
        let a = dir.grant_assignment(user_id, region_id, None, now).unwrap();
        assert!(!dir.active_region_ids_for(user_id, now).is_empty());

        dir.revoke_assignment(a.id, Some(now), now).unwrap();
        let next = now + Duration::seconds(1);
        assert!(dir.active_region_ids_for(user_id, next).is_empty());
        assert!(dir.active_assignment_ids_for(user_id, next).is_empty());
    }

    #[test]
    fn active_sets_are_idempotent_between_mutations() {
        let (dir, user_id, region_id) = dir_with_manager();
        let now = Utc::now();
        dir.grant_assignment(user_id, region_id, None, now).unwrap();
        let first = dir.active_region_ids_for(user_id, now);
        let second = dir.active_region_ids_for(user_id, now);
        assert_eq!(first, second);
    }
}
