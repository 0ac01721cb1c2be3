use serde::{Deserialize, Serialize};

use adhera_core::{DelegateId, UserId};

use crate::Role;

/// The authenticated identity an authorization decision is made for.
///
/// Always passed explicitly as a parameter, never read from ambient state:
/// every scoping decision is a deterministic function of this value plus the
/// current directory contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    /// Delegate identity carried from the token for the Delegate role.
    ///
    /// Advisory only: the resolver re-derives it from the directory when
    /// absent and never trusts it for another role.
    pub delegate_id: Option<DelegateId>,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            delegate_id: None,
        }
    }

    pub fn with_delegate(user_id: UserId, delegate_id: DelegateId) -> Self {
        Self {
            user_id,
            role: Role::Delegate,
            delegate_id: Some(delegate_id),
        }
    }
}

/// A user as seen by everything downstream of credential validation.
///
/// Deliberately excludes the stored credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}
