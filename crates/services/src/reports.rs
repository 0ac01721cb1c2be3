//! Aggregated reporting.
//!
//! Reports are read-only rollups over the same scoping rules as the raw
//! entities: GM sees the whole organization, a region manager sees its active
//! regions, a delegate gets no reporting surface at all.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;

use adhera_access::ScopeResolver;
use adhera_auth::{Principal, Role};
use adhera_core::{DomainError, DomainResult, RegionId};
use adhera_directory::MemberStatus;

/// Organization-wide rollup (GM only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSummary {
    pub total_regions: u64,
    pub total_delegates: u64,
    pub total_members: u64,
    pub active_members: u64,
    pub total_payments: u64,
    pub total_amount_cents: u64,
}

/// Per-region rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionReport {
    pub region_id: RegionId,
    pub region_name: String,
    pub delegates: u64,
    pub members: u64,
    pub payments: u64,
    pub amount_cents: u64,
}

#[derive(Clone)]
pub struct ReportsService {
    resolver: ScopeResolver,
}

impl ReportsService {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    pub fn global_summary(&self, principal: &Principal) -> DomainResult<GlobalSummary> {
        if principal.role != Role::GlobalManager {
            return Err(DomainError::forbidden("the global summary is GM-only"));
        }
        let dir = self.resolver.directory();
        let members = dir.members.list();
        let payments = dir.payments.list();
        Ok(GlobalSummary {
            total_regions: dir.regions.list().len() as u64,
            total_delegates: dir.delegates.list().len() as u64,
            total_members: members.len() as u64,
            active_members: members
                .iter()
                .filter(|m| m.status == MemberStatus::Active)
                .count() as u64,
            total_payments: payments.len() as u64,
            total_amount_cents: payments.iter().map(|p| p.amount_cents).sum(),
        })
    }

    /// Per-region rollups over the caller's managed regions (all regions for
    /// GM). A manager with no active assignment gets an empty report.
    pub fn regions_report(&self, principal: &Principal) -> DomainResult<Vec<RegionReport>> {
        let dir = self.resolver.directory();
        let visible: HashSet<RegionId> = match principal.role {
            Role::GlobalManager => dir.regions.list().into_iter().map(|r| r.id).collect(),
            Role::RegionManager => dir.active_region_ids_for(principal.user_id, Utc::now()),
            Role::Delegate => {
                return Err(DomainError::forbidden("role may not access reports"));
            }
        };

        let delegates = dir.delegates.list();
        let members = dir.members.list();
        let payments = dir.payments.list();

        let mut reports: Vec<RegionReport> = dir
            .regions
            .list()
            .into_iter()
            .filter(|r| visible.contains(&r.id))
            .map(|region| {
                let region_delegates: HashSet<_> = delegates
                    .iter()
                    .filter(|d| d.region_id == region.id)
                    .map(|d| d.id)
                    .collect();
                let region_members: HashSet<_> = members
                    .iter()
                    .filter(|m| region_delegates.contains(&m.delegate_id))
                    .map(|m| m.id)
                    .collect();
                let region_payments: Vec<_> = payments
                    .iter()
                    .filter(|p| region_members.contains(&p.member_id))
                    .collect();
                RegionReport {
                    region_id: region.id,
                    region_name: region.name,
                    delegates: region_delegates.len() as u64,
                    members: region_members.len() as u64,
                    payments: region_payments.len() as u64,
                    amount_cents: region_payments.iter().map(|p| p.amount_cents).sum(),
                }
            })
            .collect();
        reports.sort_by(|a, b| a.region_name.cmp(&b.region_name));
        Ok(reports)
    }
}
