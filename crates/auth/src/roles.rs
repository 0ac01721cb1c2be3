use serde::{Deserialize, Serialize};

/// Role held by a user account.
///
/// Roles are a closed set: the scoping rules branch on them through the
/// permission matrix, so adding a role means extending that matrix, not
/// registering a string somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Unrestricted access to all entities.
    #[serde(rename = "GM")]
    GlobalManager,
    /// Time-bounded authority over zero or more regions via assignments.
    RegionManager,
    /// Scoped to exactly one delegate record (own members and payments).
    Delegate,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::GlobalManager, Role::RegionManager, Role::Delegate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::GlobalManager => "GM",
            Role::RegionManager => "REGION_MANAGER",
            Role::Delegate => "DELEGATE",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_to_wire_names() {
        assert_eq!(serde_json::to_string(&Role::GlobalManager).unwrap(), "\"GM\"");
        assert_eq!(
            serde_json::to_string(&Role::RegionManager).unwrap(),
            "\"REGION_MANAGER\""
        );
        assert_eq!(serde_json::to_string(&Role::Delegate).unwrap(), "\"DELEGATE\"");
    }

    #[test]
    fn roles_deserialize_from_wire_names() {
        let role: Role = serde_json::from_str("\"REGION_MANAGER\"").unwrap();
        assert_eq!(role, Role::RegionManager);
    }
}
