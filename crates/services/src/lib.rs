//! `adhera-services` — resource services applying resolved scopes.
//!
//! Each service takes an explicit [`adhera_auth::Principal`] and a validated
//! input, asks the resolver for a scope, and turns it into a filter over the
//! directory. None of them ever reads scoping information from ambient state
//! or from token hints.

pub mod assignments;
pub mod delegates;
pub mod members;
pub mod payments;
pub mod regions;
pub mod reports;
pub mod users;

pub use assignments::AssignmentsService;
pub use delegates::{CreateDelegate, DelegateQuery, DelegatesService, UpdateDelegate};
pub use members::{CreateMember, MemberQuery, MembersService, UpdateMember};
pub use payments::{CreatePayment, PaymentQuery, PaymentsService, UpdatePayment};
pub use regions::RegionsService;
pub use reports::{GlobalSummary, RegionReport, ReportsService};
pub use users::{CreateUser, UpdateUser, UsersService};
