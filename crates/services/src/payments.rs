//! Payment ledger.
//!
//! Payments are append-only audit records: created by the owning delegate or
//! by GM, amendable only by the recording delegate (or GM), never deletable
//! by anyone. Visibility always follows the payment's member's *current*
//! owner, so reassigned members carry their history to the new scope.

use chrono::{DateTime, Utc};
use tracing::info;

use adhera_access::{access_for, Access, Entity, Operation, Scope, ScopeResolver};
use adhera_auth::{Principal, Role};
use adhera_core::{DelegateId, DomainError, DomainResult, MemberId, PaymentId};
use adhera_directory::Payment;

#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub member_id: MemberId,
    pub amount_cents: u64,
    /// Defaults to the recording time.
    pub paid_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePayment {
    pub amount_cents: Option<u64>,
    pub paid_at: Option<DateTime<Utc>>,
    pub note: Option<Option<String>>,
}

/// List filters; all optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    pub member_id: Option<MemberId>,
    pub delegate_id: Option<DelegateId>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct PaymentsService {
    resolver: ScopeResolver,
}

impl PaymentsService {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    pub fn create(&self, principal: &Principal, input: CreatePayment) -> DomainResult<Payment> {
        if access_for(principal.role, Entity::Payment, Operation::Create) == Access::Deny {
            return Err(DomainError::forbidden("role may not record payments"));
        }
        if input.amount_cents == 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        let now = Utc::now();

        // The recording delegate. For a delegate caller the member must be in
        // its own scope (guard hides foreign members as NotFound); for GM it
        // is the member's current owner.
        let delegate_id = match principal.role {
            Role::Delegate => {
                self.resolver
                    .guard_member(principal, input.member_id, Operation::Read, now)?;
                self.resolver
                    .own_delegate_id(principal)
                    .ok_or_else(|| DomainError::validation("no delegate record for this user"))?
            }
            _ => {
                let member = self
                    .resolver
                    .directory()
                    .members
                    .get(&input.member_id)
                    .ok_or_else(|| DomainError::validation("unknown member"))?;
                member.delegate_id
            }
        };

        let payment = Payment {
            id: PaymentId::new(),
            member_id: input.member_id,
            delegate_id,
            amount_cents: input.amount_cents,
            paid_at: input.paid_at.unwrap_or(now),
            note: input.note,
            created_at: now,
        };
        self.resolver
            .directory()
            .payments
            .upsert(payment.id, payment.clone());
        info!(
            payment = %payment.id,
            member = %payment.member_id,
            amount_cents = payment.amount_cents,
            "payment recorded"
        );
        Ok(payment)
    }

    pub fn list(&self, principal: &Principal, query: &PaymentQuery) -> DomainResult<Vec<Payment>> {
        let now = Utc::now();
        let scope = self
            .resolver
            .resolve(principal, Entity::Payment, Operation::List, now);
        match scope {
            Scope::Denied => Err(DomainError::forbidden("role may not list payments")),
            Scope::Empty => Ok(vec![]),
            scope => {
                let mut payments: Vec<Payment> = self
                    .resolver
                    .directory()
                    .payments
                    .list()
                    .into_iter()
                    .filter(|p| self.resolver.payment_in_scope(&scope, p))
                    .filter(|p| query.member_id.is_none_or(|m| p.member_id == m))
                    .filter(|p| query.delegate_id.is_none_or(|d| p.delegate_id == d))
                    .filter(|p| query.from.is_none_or(|t| p.paid_at >= t))
                    .filter(|p| query.to.is_none_or(|t| p.paid_at <= t))
                    .collect();
                payments.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
                Ok(payments)
            }
        }
    }

    pub fn get(&self, principal: &Principal, id: PaymentId) -> DomainResult<Payment> {
        self.resolver
            .guard_payment(principal, id, Operation::Read, Utc::now())
    }

    /// Amend amount, date or note. Only the recording delegate (or GM) may
    /// amend; member and delegate pointers are immutable.
    pub fn update(
        &self,
        principal: &Principal,
        id: PaymentId,
        input: UpdatePayment,
    ) -> DomainResult<Payment> {
        let mut payment = self
            .resolver
            .guard_payment(principal, id, Operation::Update, Utc::now())?;
        self.resolver.ensure_payment_owner(principal, &payment)?;

        if let Some(amount_cents) = input.amount_cents {
            if amount_cents == 0 {
                return Err(DomainError::validation("amount must be positive"));
            }
            payment.amount_cents = amount_cents;
        }
        if let Some(paid_at) = input.paid_at {
            payment.paid_at = paid_at;
        }
        if let Some(note) = input.note {
            payment.note = note;
        }
        self.resolver
            .directory()
            .payments
            .upsert(payment.id, payment.clone());
        Ok(payment)
    }

    /// Always refused, for every role. Reversal is a compensating payment.
    pub fn delete(&self, _principal: &Principal, _id: PaymentId) -> DomainResult<()> {
        Err(DomainError::forbidden(
            "payments are immutable audit records",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhera_core::{RegionId, UserId};
    use adhera_directory::{Delegate, Directory, Member, MemberStatus, Region, UserRecord};

    struct Fixture {
        svc: PaymentsService,
        gm: Principal,
        manager: Principal,
        d1: Principal,
        d2: Principal,
        m1: MemberId,
        m2: MemberId,
    }

    fn user(dir: &Directory, role: Role, email: &str) -> UserId {
        let now = Utc::now();
        let rec = UserRecord {
            id: UserId::new(),
            name: email.to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let id = rec.id;
        dir.users.upsert(id, rec);
        id
    }

    fn fixture() -> Fixture {
        let dir = Directory::in_memory();
        let now = Utc::now();
        let region = Region {
            id: RegionId::new(),
            name: "Nord".to_string(),
            created_at: now,
        };
        dir.regions.upsert(region.id, region.clone());
        let manager_id = user(&dir, Role::RegionManager, "m@example.com");
        let assignment = dir
            .grant_assignment(manager_id, region.id, None, now)
            .unwrap();

        let mk = |email: &str, cin: &str| {
            let uid = user(&dir, Role::Delegate, email);
            let delegate = Delegate {
                id: DelegateId::new(),
                name: email.to_string(),
                phone: None,
                region_id: region.id,
                assignment_id: assignment.id,
                user_id: Some(uid),
                created_at: now,
            };
            dir.delegates.upsert(delegate.id, delegate.clone());
            let member = Member {
                id: MemberId::new(),
                cin: cin.to_string(),
                full_name: format!("member {cin}"),
                status: MemberStatus::Active,
                delegate_id: delegate.id,
                created_at: now,
                updated_at: now,
            };
            dir.members.upsert(member.id, member.clone());
            (Principal::with_delegate(uid, delegate.id), member.id)
        };
        let (d1, m1) = mk("d1@example.com", "AA000001");
        let (d2, m2) = mk("d2@example.com", "AA000002");

        Fixture {
            svc: PaymentsService::new(ScopeResolver::new(dir)),
            gm: Principal::new(UserId::new(), Role::GlobalManager),
            manager: Principal::new(manager_id, Role::RegionManager),
            d1,
            d2,
            m1,
            m2,
        }
    }

    fn record(svc: &PaymentsService, p: &Principal, member: MemberId, cents: u64) -> Payment {
        svc.create(
            p,
            CreatePayment {
                member_id: member,
                amount_cents: cents,
                paid_at: None,
                note: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn delegate_records_for_own_member_only() {
        let f = fixture();
        let payment = record(&f.svc, &f.d1, f.m1, 10_000);
        assert_eq!(payment.delegate_id, f.d1.delegate_id.unwrap());

        // Foreign member: hidden, not forbidden.
        let err = f
            .svc
            .create(
                &f.d1,
                CreatePayment {
                    member_id: f.m2,
                    amount_cents: 10_000,
                    paid_at: None,
                    note: None,
                },
            )
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn gm_records_against_the_members_current_owner() {
        let f = fixture();
        let payment = record(&f.svc, &f.gm, f.m2, 5_000);
        assert_eq!(payment.delegate_id, f.d2.delegate_id.unwrap());
    }

    #[test]
    fn zero_amount_is_rejected() {
        let f = fixture();
        let err = f
            .svc
            .create(
                &f.d1,
                CreatePayment {
                    member_id: f.m1,
                    amount_cents: 0,
                    paid_at: None,
                    note: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn lists_are_scoped_and_filterable() {
        let f = fixture();
        record(&f.svc, &f.d1, f.m1, 10_000);
        record(&f.svc, &f.d2, f.m2, 20_000);

        assert_eq!(f.svc.list(&f.d1, &PaymentQuery::default()).unwrap().len(), 1);
        assert_eq!(f.svc.list(&f.gm, &PaymentQuery::default()).unwrap().len(), 2);
        assert_eq!(
            f.svc.list(&f.manager, &PaymentQuery::default()).unwrap().len(),
            2
        );

        let query = PaymentQuery {
            member_id: Some(f.m2),
            ..Default::default()
        };
        let listed = f.svc.list(&f.gm, &query).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount_cents, 20_000);
    }

    #[test]
    fn only_the_recording_delegate_or_gm_may_amend() {
        let f = fixture();
        let payment = record(&f.svc, &f.d1, f.m1, 10_000);

        let amended = f
            .svc
            .update(
                &f.d1,
                payment.id,
                UpdatePayment {
                    amount_cents: Some(12_000),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(amended.amount_cents, 12_000);

        // A peer delegate never even sees it.
        assert_eq!(
            f.svc
                .update(&f.d2, payment.id, UpdatePayment::default())
                .unwrap_err(),
            DomainError::NotFound
        );

        // GM passes the owner check.
        assert!(f
            .svc
            .update(&f.gm, payment.id, UpdatePayment::default())
            .is_ok());
    }

    #[test]
    fn deletion_is_refused_for_every_role() {
        let f = fixture();
        let payment = record(&f.svc, &f.d1, f.m1, 10_000);
        for p in [&f.gm, &f.manager, &f.d1] {
            assert!(matches!(
                f.svc.delete(p, payment.id).unwrap_err(),
                DomainError::Forbidden(_)
            ));
        }
        assert!(f.svc.get(&f.gm, payment.id).is_ok());
    }

    #[test]
    fn manager_sees_but_cannot_amend() {
        let f = fixture();
        let payment = record(&f.svc, &f.d1, f.m1, 10_000);
        assert!(f.svc.get(&f.manager, payment.id).is_ok());
        assert!(matches!(
            f.svc
                .update(&f.manager, payment.id, UpdatePayment::default())
                .unwrap_err(),
            DomainError::Forbidden(_)
        ));
    }
}
