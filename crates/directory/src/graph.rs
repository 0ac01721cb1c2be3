//! Ownership Graph Accessor: read-only walks of the hierarchy.
//!
//! Pure lookups used by the scope resolver and the ownership guard. No
//! scoping decisions are made here.

use adhera_core::{DelegateId, DomainError, DomainResult, MemberId, PaymentId, UserId};

use crate::model::{Assignment, Delegate, Region};
use crate::store::Directory;

impl Directory {
    pub fn region_of_delegate(&self, delegate_id: DelegateId) -> DomainResult<Region> {
        let delegate = self.delegates.get(&delegate_id).ok_or(DomainError::NotFound)?;
        self.regions
            .get(&delegate.region_id)
            .ok_or(DomainError::NotFound)
    }

    pub fn assignment_of_delegate(&self, delegate_id: DelegateId) -> DomainResult<Assignment> {
        let delegate = self.delegates.get(&delegate_id).ok_or(DomainError::NotFound)?;
        self.assignments
            .get(&delegate.assignment_id)
            .ok_or(DomainError::NotFound)
    }

    pub fn delegate_of_member(&self, member_id: MemberId) -> DomainResult<Delegate> {
        let member = self.members.get(&member_id).ok_or(DomainError::NotFound)?;
        self.delegates
            .get(&member.delegate_id)
            .ok_or(DomainError::NotFound)
    }

    pub fn delegate_of_payment(&self, payment_id: PaymentId) -> DomainResult<Delegate> {
        let payment = self.payments.get(&payment_id).ok_or(DomainError::NotFound)?;
        self.delegates
            .get(&payment.delegate_id)
            .ok_or(DomainError::NotFound)
    }

    /// The delegate record linked to a user account, if any.
    ///
    /// At most one delegate may reference a given user.
    pub fn delegate_id_for_user(&self, user_id: UserId) -> Option<DelegateId> {
        self.delegates
            .list()
            .into_iter()
            .find(|d| d.user_id == Some(user_id))
            .map(|d| d.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, MemberStatus};
    use adhera_core::{AssignmentId, RegionId};
    use chrono::Utc;

    fn seeded() -> (Directory, Delegate, Member) {
        let dir = Directory::in_memory();
        let now = Utc::now();
        let region = Region {
            id: RegionId::new(),
            name: "Nord".to_string(),
            created_at: now,
        };
        let assignment = Assignment {
            id: AssignmentId::new(),
            user_id: UserId::new(),
            region_id: region.id,
            start_at: now,
            end_at: None,
        };
        let delegate = Delegate {
            id: DelegateId::new(),
            name: "D1".to_string(),
            phone: None,
            region_id: region.id,
            assignment_id: assignment.id,
            user_id: Some(UserId::new()),
            created_at: now,
        };
        let member = Member {
            id: MemberId::new(),
            cin: "AB123456".to_string(),
            full_name: "Member One".to_string(),
            status: MemberStatus::Active,
            delegate_id: delegate.id,
            created_at: now,
            updated_at: now,
        };
        dir.regions.upsert(region.id, region);
        dir.assignments.upsert(assignment.id, assignment);
        dir.delegates.upsert(delegate.id, delegate.clone());
        dir.members.upsert(member.id, member.clone());
        (dir, delegate, member)
    }

    #[test]
    fn walks_resolve_parent_records() {
        let (dir, delegate, member) = seeded();
        assert_eq!(dir.region_of_delegate(delegate.id).unwrap().id, delegate.region_id);
        assert_eq!(
            dir.assignment_of_delegate(delegate.id).unwrap().id,
            delegate.assignment_id
        );
        assert_eq!(dir.delegate_of_member(member.id).unwrap().id, delegate.id);
    }

    #[test]
    fn missing_links_are_not_found() {
        let (dir, _, _) = seeded();
        assert_eq!(
            dir.delegate_of_member(MemberId::new()).unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(
            dir.region_of_delegate(DelegateId::new()).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn delegate_id_for_user_returns_none_for_unlinked_user() {
        let (dir, delegate, _) = seeded();
        assert_eq!(dir.delegate_id_for_user(delegate.user_id.unwrap()), Some(delegate.id));
        assert_eq!(dir.delegate_id_for_user(UserId::new()), None);
    }
}
