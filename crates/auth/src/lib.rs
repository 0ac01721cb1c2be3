//! `adhera-auth` — pure authentication/authorization primitives (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage. Anything that
//! needs live directory state (scope resolution, credential lookup) lives in
//! `adhera-access`.

pub mod claims;
pub mod password;
pub mod principal;
pub mod roles;
pub mod token;

pub use claims::{validate_claims, JwtClaims, TokenUse, TokenValidationError};
pub use password::{hash_password, verify_password, PasswordError};
pub use principal::{Principal, UserSummary};
pub use roles::Role;
pub use token::{Hs256TokenCodec, TokenCodec, TokenError};
