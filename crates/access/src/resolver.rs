//! Access Scope Resolver: per-request computation of what a principal may see.
//!
//! For every restricted role the scope is recomputed from the assignment
//! registry / ownership graph at call time, so a revocation is effective on
//! the very next request. An empty active set short-circuits to
//! [`Scope::Empty`] — callers must never turn it into a storage query with an
//! empty IN-list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use adhera_auth::{Principal, Role};
use adhera_core::{AssignmentId, DelegateId};
use adhera_directory::{Delegate, Directory, Member, Payment};

use crate::matrix::{access_for, Access, Entity, Operation};

/// The restriction applied inside [`Scope::Restricted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFilter {
    /// Rows owned (via their delegate) by one of these assignments.
    AssignmentIn(HashSet<AssignmentId>),
    /// Rows owned by exactly this delegate.
    DelegateIs(DelegateId),
}

/// The resolved authorization result for one (principal, entity, operation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// No restriction; query the entity unfiltered.
    Unrestricted,
    /// Only rows matching the filter.
    Restricted(ScopeFilter),
    /// The principal's active scope is empty: zero rows, no storage query.
    Empty,
    /// The role may not perform this operation at all.
    Denied,
}

/// Resolves scopes against live directory state.
#[derive(Clone)]
pub struct ScopeResolver {
    dir: Directory,
}

impl ScopeResolver {
    pub fn new(dir: Directory) -> Self {
        Self { dir }
    }

    pub fn directory(&self) -> &Directory {
        &self.dir
    }

    /// Resolve the scope for `principal` performing `op` on `entity` at `now`.
    pub fn resolve(
        &self,
        principal: &Principal,
        entity: Entity,
        op: Operation,
        now: DateTime<Utc>,
    ) -> Scope {
        match access_for(principal.role, entity, op) {
            Access::Deny => {
                debug!(user = %principal.user_id, role = %principal.role, ?entity, ?op, "access denied by matrix");
                Scope::Denied
            }
            Access::Full => Scope::Unrestricted,
            Access::Scoped => self.scoped(principal, now),
        }
    }

    fn scoped(&self, principal: &Principal, now: DateTime<Utc>) -> Scope {
        match principal.role {
            // The matrix never marks GM cells as scoped.
            Role::GlobalManager => Scope::Unrestricted,
            Role::RegionManager => {
                let active = self.dir.active_assignment_ids_for(principal.user_id, now);
                if active.is_empty() {
                    Scope::Empty
                } else {
                    Scope::Restricted(ScopeFilter::AssignmentIn(active))
                }
            }
            Role::Delegate => match self.own_delegate_id(principal) {
                Some(id) => Scope::Restricted(ScopeFilter::DelegateIs(id)),
                None => Scope::Empty,
            },
        }
    }

    /// The delegate identity a Delegate principal acts as.
    ///
    /// The token claim is used when present (a delegate's single record is
    /// effectively immutable for a session) and re-derived live when absent.
    pub fn own_delegate_id(&self, principal: &Principal) -> Option<DelegateId> {
        if principal.role != Role::Delegate {
            return None;
        }
        principal
            .delegate_id
            .or_else(|| self.dir.delegate_id_for_user(principal.user_id))
    }

    /// Whether a delegate row falls inside a resolved scope.
    pub fn delegate_in_scope(&self, scope: &Scope, delegate: &Delegate) -> bool {
        match scope {
            Scope::Unrestricted => true,
            Scope::Empty | Scope::Denied => false,
            Scope::Restricted(ScopeFilter::AssignmentIn(set)) => {
                set.contains(&delegate.assignment_id)
            }
            // A delegate role cannot see peer delegates, including itself,
            // through this entity.
            Scope::Restricted(ScopeFilter::DelegateIs(_)) => false,
        }
    }

    /// Whether a member row falls inside a resolved scope.
    pub fn member_in_scope(&self, scope: &Scope, member: &Member) -> bool {
        match scope {
            Scope::Unrestricted => true,
            Scope::Empty | Scope::Denied => false,
            Scope::Restricted(ScopeFilter::DelegateIs(id)) => member.delegate_id == *id,
            Scope::Restricted(ScopeFilter::AssignmentIn(set)) => self
                .dir
                .delegates
                .get(&member.delegate_id)
                .is_some_and(|d| set.contains(&d.assignment_id)),
        }
    }

    /// Whether a payment row falls inside a resolved scope.
    ///
    /// Evaluated via the payment's member's *current* delegate; the payment's
    /// own `delegate_id` is an audit pointer, not a live ownership edge.
    pub fn payment_in_scope(&self, scope: &Scope, payment: &Payment) -> bool {
        match scope {
            Scope::Unrestricted => true,
            Scope::Empty | Scope::Denied => false,
            _ => match self.dir.members.get(&payment.member_id) {
                Some(member) => self.member_in_scope(scope, &member),
                None => false,
            },
        }
    }
}


#[cfg(test)]
mod props {
    use super::*;
    use adhera_core::{RegionId, UserId};
    use adhera_directory::Assignment;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    /// Arbitrary validity windows around a fixed "now".
    fn windows() -> impl Strategy<Value = Vec<(i64, Option<i64>)>> {
        prop::collection::vec(
            (-1000i64..1000, prop::option::of(-1000i64..1000)),
            0..12,
        )
    }

    proptest! {
        /// A manager's scope is `Restricted` with exactly the active
        /// assignments, or `Empty` when none are active — never a restricted
        /// scope over an empty set.
        #[test]
        fn manager_scope_matches_active_windows(windows in windows()) {
            let dir = Directory::in_memory();
            let now = chrono::Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
            let user_id = UserId::new();

            let mut expected = HashSet::new();
            for (start_off, end_off) in &windows {
                let a = Assignment {
                    id: adhera_core::AssignmentId::new(),
                    user_id,
                    region_id: RegionId::new(),
                    start_at: now + Duration::seconds(*start_off),
                    end_at: end_off.map(|e| now + Duration::seconds(e)),
                };
                if a.is_active_at(now) {
                    expected.insert(a.id);
                }
                dir.assignments.upsert(a.id, a);
            }

            let resolver = ScopeResolver::new(dir);
            let principal = Principal::new(user_id, Role::RegionManager);
            let scope = resolver.resolve(&principal, Entity::Member, Operation::List, now);

            if expected.is_empty() {
                prop_assert_eq!(scope, Scope::Empty);
            } else {
                prop_assert_eq!(scope, Scope::Restricted(ScopeFilter::AssignmentIn(expected)));
            }
        }
    }
}
