use chrono::{DateTime, Utc};
use serde::Deserialize;

use adhera_auth::Role;
use adhera_core::{AssignmentId, DelegateId, MemberId, RegionId, UserId};
use adhera_directory::MemberStatus;

/// Distinguishes an absent field (outer `None`) from an explicit `null`
/// (`Some(None)`), so PATCH-style updates can clear optional columns.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

// -------------------------
// Auth
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// -------------------------
// Users
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

// -------------------------
// Regions
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegionNameRequest {
    pub name: String,
}

// -------------------------
// Assignments
// -------------------------

#[derive(Debug, Deserialize)]
pub struct GrantAssignmentRequest {
    pub user_id: UserId,
    pub region_id: RegionId,
    pub start_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RevokeAssignmentRequest {
    pub end_at: Option<DateTime<Utc>>,
}

// -------------------------
// Delegates
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateDelegateRequest {
    pub name: String,
    pub phone: Option<String>,
    pub region_id: RegionId,
    pub assignment_id: AssignmentId,
    pub user_id: Option<UserId>,
}

/// `phone: null` clears the number; an absent field leaves it untouched.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateDelegateRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DelegateListQuery {
    pub region_id: Option<RegionId>,
    pub q: Option<String>,
}

// -------------------------
// Members
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub cin: String,
    pub full_name: String,
    pub delegate_id: Option<DelegateId>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateMemberRequest {
    pub full_name: Option<String>,
    pub status: Option<MemberStatus>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MemberListQuery {
    pub status: Option<MemberStatus>,
    pub q: Option<String>,
}

// -------------------------
// Payments
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub member_id: MemberId,
    pub amount_cents: u64,
    pub paid_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePaymentRequest {
    pub amount_cents: Option<u64>,
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PaymentListQuery {
    pub member_id: Option<MemberId>,
    pub delegate_id: Option<DelegateId>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
