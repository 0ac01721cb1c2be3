//! Region catalogue. Readable by every role; mutable only by GM.

use chrono::Utc;
use tracing::info;

use adhera_access::{access_for, Access, Entity, Operation, ScopeResolver};
use adhera_auth::Principal;
use adhera_core::{DomainError, DomainResult, RegionId};
use adhera_directory::Region;

#[derive(Clone)]
pub struct RegionsService {
    resolver: ScopeResolver,
}

impl RegionsService {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    fn authorize(&self, principal: &Principal, op: Operation) -> DomainResult<()> {
        match access_for(principal.role, Entity::Region, op) {
            Access::Deny => Err(DomainError::forbidden("region changes are GM-only")),
            _ => Ok(()),
        }
    }

    pub fn create(&self, principal: &Principal, name: String) -> DomainResult<Region> {
        self.authorize(principal, Operation::Create)?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("region name must not be empty"));
        }
        let dir = self.resolver.directory();
        if dir.region_by_name(&name).is_some() {
            return Err(DomainError::validation("region name is already in use"));
        }
        let region = Region {
            id: RegionId::new(),
            name,
            created_at: Utc::now(),
        };
        dir.regions.upsert(region.id, region.clone());
        info!(region = %region.id, name = %region.name, "region created");
        Ok(region)
    }

    pub fn list(&self, principal: &Principal) -> DomainResult<Vec<Region>> {
        self.authorize(principal, Operation::List)?;
        let mut regions = self.resolver.directory().regions.list();
        regions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(regions)
    }

    pub fn get(&self, principal: &Principal, id: RegionId) -> DomainResult<Region> {
        self.authorize(principal, Operation::Read)?;
        self.resolver
            .directory()
            .regions
            .get(&id)
            .ok_or(DomainError::NotFound)
    }

    pub fn rename(
        &self,
        principal: &Principal,
        id: RegionId,
        name: String,
    ) -> DomainResult<Region> {
        self.authorize(principal, Operation::Update)?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("region name must not be empty"));
        }
        let dir = self.resolver.directory();
        let mut region = dir.regions.get(&id).ok_or(DomainError::NotFound)?;
        if name != region.name && dir.region_by_name(&name).is_some() {
            return Err(DomainError::validation("region name is already in use"));
        }
        region.name = name;
        dir.regions.upsert(region.id, region.clone());
        Ok(region)
    }

    /// Delete a region. Refused while any delegate still belongs to it;
    /// history (closed assignments) does not block deletion.
    pub fn delete(&self, principal: &Principal, id: RegionId) -> DomainResult<()> {
        self.authorize(principal, Operation::Delete)?;
        let dir = self.resolver.directory();
        if dir.regions.get(&id).is_none() {
            return Err(DomainError::NotFound);
        }
        if dir.delegates.list().iter().any(|d| d.region_id == id) {
            return Err(DomainError::validation(
                "region still has delegates attached",
            ));
        }
        dir.regions.remove(&id);
        info!(region = %id, "region deleted");
        Ok(())
    }
}
