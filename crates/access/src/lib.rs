//! `adhera-access` — the authorization and data-scoping engine.
//!
//! Everything protected goes through here: credential validation and token
//! issuance ([`session`]), the role/entity/operation permission matrix
//! ([`matrix`]), the per-request scope resolution ([`resolver`]) and the
//! single-resource ownership guard ([`guard`]).
//!
//! Scoping is always recomputed from live directory state. Token-embedded
//! hints (a delegate's id) are advisory; nothing read from a token is trusted
//! for enforcement beyond identity, role and expiry.

pub mod guard;
pub mod matrix;
pub mod resolver;
pub mod session;

pub use matrix::{access_for, matrix, Access, Entity, Operation};
pub use resolver::{Scope, ScopeFilter, ScopeResolver};
pub use session::{AccessConfig, SessionService, TokenPair};
