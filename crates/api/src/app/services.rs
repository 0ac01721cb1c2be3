//! Service construction: one resolver over one shared directory, every
//! resource service cloned off it.

use std::sync::Arc;

use adhera_access::{AccessConfig, ScopeResolver, SessionService};
use adhera_auth::TokenCodec;
use adhera_directory::Directory;
use adhera_services::{
    AssignmentsService, DelegatesService, MembersService, PaymentsService, RegionsService,
    ReportsService, UsersService,
};

pub struct AppServices {
    pub session: SessionService,
    pub users: UsersService,
    pub regions: RegionsService,
    pub assignments: AssignmentsService,
    pub delegates: DelegatesService,
    pub members: MembersService,
    pub payments: PaymentsService,
    pub reports: ReportsService,
}

impl AppServices {
    pub fn new(dir: Directory, codec: Arc<dyn TokenCodec>) -> Self {
        let resolver = ScopeResolver::new(dir.clone());
        Self {
            session: SessionService::new(dir, codec, AccessConfig::default()),
            users: UsersService::new(resolver.clone()),
            regions: RegionsService::new(resolver.clone()),
            assignments: AssignmentsService::new(resolver.clone()),
            delegates: DelegatesService::new(resolver.clone()),
            members: MembersService::new(resolver.clone()),
            payments: PaymentsService::new(resolver.clone()),
            reports: ReportsService::new(resolver),
        }
    }
}
