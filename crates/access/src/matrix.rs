//! The permission matrix: (role, entity, operation) → access level.
//!
//! A single exhaustive table instead of per-service conditionals, so the whole
//! policy can be audited (and tested) in one place. `Scoped` means the scope
//! resolver computes a restriction from live assignment/delegate state;
//! `Full` bypasses it; `Deny` is terminal.

use adhera_auth::Role;

/// Entity kinds covered by the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Region,
    Assignment,
    Delegate,
    Member,
    Payment,
}

impl Entity {
    pub const ALL: [Entity; 6] = [
        Entity::User,
        Entity::Region,
        Entity::Assignment,
        Entity::Delegate,
        Entity::Member,
        Entity::Payment,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Read,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];
}

/// Access level granted by the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Role may not perform the operation at all.
    Deny,
    /// Unrestricted over the whole entity.
    Full,
    /// Restricted to rows inside the role's live scope.
    Scoped,
}

/// Look up the access level for one cell of the matrix.
pub fn access_for(role: Role, entity: Entity, op: Operation) -> Access {
    use Access::*;
    use Entity::*;
    use Operation::*;

    match (role, entity, op) {
        // Payments are immutable audit records: no role may delete them.
        (_, Payment, Delete) => Deny,
        // Assignments are closed (revoked), never deleted.
        (_, Assignment, Delete) => Deny,

        (Role::GlobalManager, _, _) => Full,

        // Regions are organization-wide reference data: readable by everyone,
        // writable by GM only.
        (_, Region, List | Read) => Full,
        (_, Region, _) => Deny,

        (Role::RegionManager, Delegate, List | Read) => Scoped,
        (Role::RegionManager, Member, List | Read) => Scoped,
        // A manager can purge members inside their regions but never creates
        // or edits them (that is the owning delegate's job).
        (Role::RegionManager, Member, Delete) => Scoped,
        (Role::RegionManager, Payment, List | Read) => Scoped,
        (Role::RegionManager, _, _) => Deny,

        // A delegate manages members, not peer delegates.
        (Role::Delegate, Member, List | Read | Create | Update) => Scoped,
        (Role::Delegate, Payment, List | Read | Create | Update) => Scoped,
        (Role::Delegate, _, _) => Deny,
    }
}

/// Iterate every cell of the matrix (for audits and exhaustive tests).
pub fn matrix() -> impl Iterator<Item = (Role, Entity, Operation, Access)> {
    Role::ALL.into_iter().flat_map(|role| {
        Entity::ALL.into_iter().flat_map(move |entity| {
            Operation::ALL
                .into_iter()
                .map(move |op| (role, entity, op, access_for(role, entity, op)))
        })
    })
}
