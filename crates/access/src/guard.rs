//! Ownership Guard: single-resource scope checks before reads and mutations.
//!
//! Read/lookup paths deliberately do not distinguish "does not exist" from
//! "exists but is not yours": both surface as `NotFound`, so existence never
//! leaks across scopes. Denied operations (the role may not touch the entity
//! at all) surface as `Forbidden` instead, since no existence question was
//! ever answered.

use chrono::{DateTime, Utc};
use tracing::debug;

use adhera_auth::Principal;
use adhera_core::{DelegateId, DomainError, DomainResult, MemberId, PaymentId};
use adhera_directory::{Delegate, Member, Payment};

use crate::matrix::{Entity, Operation};
use crate::resolver::{Scope, ScopeResolver};

impl ScopeResolver {
    /// Fetch a delegate iff it is inside the principal's scope for `op`.
    pub fn guard_delegate(
        &self,
        principal: &Principal,
        delegate_id: DelegateId,
        op: Operation,
        now: DateTime<Utc>,
    ) -> DomainResult<Delegate> {
        let scope = self.resolve(principal, Entity::Delegate, op, now);
        if let Scope::Denied = scope {
            return Err(DomainError::forbidden("role may not access delegates"));
        }
        let delegate = self
            .directory()
            .delegates
            .get(&delegate_id)
            .ok_or(DomainError::NotFound)?;
        if !self.delegate_in_scope(&scope, &delegate) {
            debug!(user = %principal.user_id, delegate = %delegate_id, "delegate outside scope");
            return Err(DomainError::NotFound);
        }
        Ok(delegate)
    }

    /// Fetch a member iff it is inside the principal's scope for `op`.
    pub fn guard_member(
        &self,
        principal: &Principal,
        member_id: MemberId,
        op: Operation,
        now: DateTime<Utc>,
    ) -> DomainResult<Member> {
        let scope = self.resolve(principal, Entity::Member, op, now);
        if let Scope::Denied = scope {
            return Err(DomainError::forbidden("role may not access members"));
        }
        let member = self
            .directory()
            .members
            .get(&member_id)
            .ok_or(DomainError::NotFound)?;
        if !self.member_in_scope(&scope, &member) {
            debug!(user = %principal.user_id, member = %member_id, "member outside scope");
            return Err(DomainError::NotFound);
        }
        Ok(member)
    }

    /// Fetch a payment iff it is inside the principal's scope for `op`.
    pub fn guard_payment(
        &self,
        principal: &Principal,
        payment_id: PaymentId,
        op: Operation,
        now: DateTime<Utc>,
    ) -> DomainResult<Payment> {
        let scope = self.resolve(principal, Entity::Payment, op, now);
        if let Scope::Denied = scope {
            return Err(DomainError::forbidden("role may not access payments"));
        }
        let payment = self
            .directory()
            .payments
            .get(&payment_id)
            .ok_or(DomainError::NotFound)?;
        if !self.payment_in_scope(&scope, &payment) {
            debug!(user = %principal.user_id, payment = %payment_id, "payment outside scope");
            return Err(DomainError::NotFound);
        }
        Ok(payment)
    }

    /// Strict same-owner check for mutations: the payment was already
    /// confirmed to exist within a broader scope, so a mismatch is
    /// `Forbidden`, not `NotFound`.
    pub fn ensure_payment_owner(
        &self,
        principal: &Principal,
        payment: &Payment,
    ) -> DomainResult<()> {
        if principal.role != adhera_auth::Role::Delegate {
            return Ok(());
        }
        let own = self
            .own_delegate_id(principal)
            .ok_or_else(|| DomainError::forbidden("no delegate record for this user"))?;
        if payment.delegate_id != own {
            return Err(DomainError::forbidden("only the recording delegate may amend a payment"));
        }
        Ok(())
    }
}
