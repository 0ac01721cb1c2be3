//! `adhera-directory` — the hierarchy data model and its store.
//!
//! Holds the entity records (users, regions, assignments, delegates, members,
//! payments), the generic [`Store`] abstraction with an in-memory
//! implementation, the Assignment Registry (time-bounded region-manager
//! grants) and the Ownership Graph Accessor (read helpers walking the
//! hierarchy). Ownership edges are plain ids resolved through the directory,
//! never embedded references.

pub mod graph;
pub mod model;
pub mod registry;
pub mod store;

pub use model::{Assignment, Delegate, Member, MemberStatus, Payment, Region, UserRecord};
pub use store::{Directory, InMemoryStore, Store};
