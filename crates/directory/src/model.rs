//! Entity records of the organizational hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adhera_auth::{Role, UserSummary};
use adhera_core::{AssignmentId, DelegateId, MemberId, PaymentId, RegionId, UserId};

/// A user account. The only entity that can authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Opaque one-way hash; never exposed through [`UserRecord::summary`].
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker. A soft-deleted user can never authenticate again.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Projection used on every read path (mirrors a safe SELECT without the
    /// credential column).
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// A named partition of the organization. Name is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A time-bounded grant of region-manager authority over one region.
///
/// Assignments are never deleted, only closed (`end_at` set), preserving the
/// management history of each region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub user_id: UserId,
    pub region_id: RegionId,
    pub start_at: DateTime<Utc>,
    /// `None` = open-ended (active until closed).
    pub end_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Whether the validity window contains `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_at <= now && self.end_at.is_none_or(|end| end >= now)
    }
}

/// A delegate record: the unit of member ownership.
///
/// Belongs to exactly one region and the assignment it was created under;
/// optionally linked to a user account for self-service login (at most one
/// delegate per user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegate {
    pub id: DelegateId,
    pub name: String,
    pub phone: Option<String>,
    pub region_id: RegionId,
    pub assignment_id: AssignmentId,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Member lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Suspended,
    Cancelled,
}

/// A member, owned by exactly one delegate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub cin: String,
    pub full_name: String,
    pub status: MemberStatus,
    pub delegate_id: DelegateId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An append-only payment record.
///
/// `delegate_id` is the delegate responsible *at recording time*, kept as an
/// audit pointer even if the member is later reassigned. Payments are never
/// deleted; reversal is a new compensating payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub member_id: MemberId,
    pub delegate_id: DelegateId,
    /// Amount in the smallest currency unit.
    pub amount_cents: u64,
    pub paid_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
