//! In-memory [`ResourceStore`] for tests and local fixtures.
//!
//! Rows are returned in the order they were inserted; fixtures are expected
//! to be built in the order the database would return them.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use mde_core::types::DbId;

use crate::models::coverage::SpatialTemporalCoverage;
use crate::models::ggm::GgmProperties;
use crate::models::keyword::{FreeKeyword, ThesaurusKeyword};
use crate::models::party::{
    Affiliation, Author, ContactPerson, ContributorInstitution, ContributorPerson,
    OriginatingLaboratory, Role,
};
use crate::models::reference::{FundingReference, RelatedWork};
use crate::models::resource::{Description, ResourceDetail, Title};
use crate::repositories::{AffiliationOwner, RoleOwner};
use crate::store::ResourceStore;

/// Everything stored for one resource, except affiliations and roles which
/// are keyed by their owner.
#[derive(Debug, Clone)]
pub struct ResourceFixture {
    pub detail: ResourceDetail,
    pub titles: Vec<Title>,
    pub authors: Vec<Author>,
    pub contact_persons: Vec<ContactPerson>,
    pub originating_laboratories: Vec<OriginatingLaboratory>,
    pub contributor_persons: Vec<ContributorPerson>,
    pub contributor_institutions: Vec<ContributorInstitution>,
    pub descriptions: Vec<Description>,
    pub thesaurus_keywords: Vec<ThesaurusKeyword>,
    pub free_keywords: Vec<FreeKeyword>,
    pub coverages: Vec<SpatialTemporalCoverage>,
    pub related_works: Vec<RelatedWork>,
    pub funding_references: Vec<FundingReference>,
    pub ggm_properties: GgmProperties,
}

impl ResourceFixture {
    /// A resource with no related rows.
    pub fn new(detail: ResourceDetail) -> Self {
        Self {
            detail,
            titles: Vec::new(),
            authors: Vec::new(),
            contact_persons: Vec::new(),
            originating_laboratories: Vec::new(),
            contributor_persons: Vec::new(),
            contributor_institutions: Vec::new(),
            descriptions: Vec::new(),
            thesaurus_keywords: Vec::new(),
            free_keywords: Vec::new(),
            coverages: Vec::new(),
            related_works: Vec::new(),
            funding_references: Vec::new(),
            ggm_properties: GgmProperties::default(),
        }
    }
}

/// A [`ResourceStore`] holding fixtures in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    resources: BTreeMap<DbId, ResourceFixture>,
    affiliations: HashMap<(AffiliationOwner, DbId), Vec<Affiliation>>,
    roles: HashMap<(RoleOwner, DbId), Vec<Role>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, fixture: ResourceFixture) -> &mut Self {
        self.resources.insert(fixture.detail.id, fixture);
        self
    }

    /// Attach affiliations to an author, contact person, lab or contributor.
    pub fn set_affiliations(
        &mut self,
        owner: AffiliationOwner,
        owner_id: DbId,
        affiliations: Vec<Affiliation>,
    ) -> &mut Self {
        self.affiliations.insert((owner, owner_id), affiliations);
        self
    }

    /// Attach roles to a contributor.
    pub fn set_roles(&mut self, owner: RoleOwner, owner_id: DbId, roles: Vec<Role>) -> &mut Self {
        self.roles.insert((owner, owner_id), roles);
        self
    }

    /// Mutable access to a stored fixture, for tests that change data
    /// between exports.
    pub fn fixture_mut(&mut self, id: DbId) -> Option<&mut ResourceFixture> {
        self.resources.get_mut(&id)
    }

    fn collect<T: Clone>(
        &self,
        resource_id: DbId,
        pick: impl FnOnce(&ResourceFixture) -> &Vec<T>,
    ) -> Vec<T> {
        self.resources
            .get(&resource_id)
            .map(|f| pick(f).clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn find_resource(&self, id: DbId) -> Result<Option<ResourceDetail>, sqlx::Error> {
        Ok(self.resources.get(&id).map(|f| f.detail.clone()))
    }

    async fn list_resource_ids(&self) -> Result<Vec<DbId>, sqlx::Error> {
        Ok(self.resources.keys().copied().collect())
    }

    async fn titles(&self, resource_id: DbId) -> Result<Vec<Title>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.titles))
    }

    async fn authors(&self, resource_id: DbId) -> Result<Vec<Author>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.authors))
    }

    async fn contact_persons(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContactPerson>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.contact_persons))
    }

    async fn originating_laboratories(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<OriginatingLaboratory>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.originating_laboratories))
    }

    async fn contributor_persons(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContributorPerson>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.contributor_persons))
    }

    async fn contributor_institutions(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContributorInstitution>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.contributor_institutions))
    }

    async fn affiliations(
        &self,
        owner: AffiliationOwner,
        owner_id: DbId,
    ) -> Result<Vec<Affiliation>, sqlx::Error> {
        Ok(self
            .affiliations
            .get(&(owner, owner_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn roles(&self, owner: RoleOwner, owner_id: DbId) -> Result<Vec<Role>, sqlx::Error> {
        Ok(self.roles.get(&(owner, owner_id)).cloned().unwrap_or_default())
    }

    async fn descriptions(&self, resource_id: DbId) -> Result<Vec<Description>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.descriptions))
    }

    async fn thesaurus_keywords(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ThesaurusKeyword>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.thesaurus_keywords))
    }

    async fn free_keywords(&self, resource_id: DbId) -> Result<Vec<FreeKeyword>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.free_keywords))
    }

    async fn coverages(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<SpatialTemporalCoverage>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.coverages))
    }

    async fn related_works(&self, resource_id: DbId) -> Result<Vec<RelatedWork>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.related_works))
    }

    async fn funding_references(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<FundingReference>, sqlx::Error> {
        Ok(self.collect(resource_id, |f| &f.funding_references))
    }

    async fn ggm_properties(
        &self,
        resource_id: DbId,
    ) -> Result<Option<GgmProperties>, sqlx::Error> {
        Ok(self
            .resources
            .get(&resource_id)
            .map(|f| f.ggm_properties.clone()))
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
