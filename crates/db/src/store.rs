//! The read port the export pipeline assembles resources through.
//!
//! [`ResourceStore`] is injected into the pipeline instead of a shared
//! connection handle. [`PgResourceStore`] is the production implementation;
//! [`crate::memory::MemoryStore`] serves tests and fixtures.

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
use crate::repositories::{
    AffiliationOwner, AffiliationRepo, AuthorRepo, ContactPersonRepo, ContributorRepo,
    CoverageRepo, DescriptionRepo, FundingReferenceRepo, KeywordRepo, LaboratoryRepo,
    RelatedWorkRepo, ResourceRepo, RoleOwner, RoleRepo, TitleRepo,
};
use crate::DbPool;

/// Read access to a resource's full relational graph.
///
/// Collection methods return rows in a deterministic order (ascending
/// surrogate key, or display position where one exists).
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn find_resource(&self, id: DbId) -> Result<Option<ResourceDetail>, sqlx::Error>;
    async fn list_resource_ids(&self) -> Result<Vec<DbId>, sqlx::Error>;

    async fn titles(&self, resource_id: DbId) -> Result<Vec<Title>, sqlx::Error>;
    async fn authors(&self, resource_id: DbId) -> Result<Vec<Author>, sqlx::Error>;
    async fn contact_persons(&self, resource_id: DbId)
        -> Result<Vec<ContactPerson>, sqlx::Error>;
    async fn originating_laboratories(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<OriginatingLaboratory>, sqlx::Error>;
    async fn contributor_persons(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContributorPerson>, sqlx::Error>;
    async fn contributor_institutions(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContributorInstitution>, sqlx::Error>;
    async fn affiliations(
        &self,
        owner: AffiliationOwner,
        owner_id: DbId,
    ) -> Result<Vec<Affiliation>, sqlx::Error>;
    async fn roles(&self, owner: RoleOwner, owner_id: DbId) -> Result<Vec<Role>, sqlx::Error>;
    async fn descriptions(&self, resource_id: DbId) -> Result<Vec<Description>, sqlx::Error>;
    async fn thesaurus_keywords(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ThesaurusKeyword>, sqlx::Error>;
    async fn free_keywords(&self, resource_id: DbId) -> Result<Vec<FreeKeyword>, sqlx::Error>;
    async fn coverages(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<SpatialTemporalCoverage>, sqlx::Error>;
    async fn related_works(&self, resource_id: DbId) -> Result<Vec<RelatedWork>, sqlx::Error>;
    async fn funding_references(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<FundingReference>, sqlx::Error>;
    async fn ggm_properties(&self, resource_id: DbId)
        -> Result<Option<GgmProperties>, sqlx::Error>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// [`ResourceStore`] backed by a Postgres pool.
#[derive(Clone)]
pub struct PgResourceStore {
    pool: DbPool,
}

impl PgResourceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn find_resource(&self, id: DbId) -> Result<Option<ResourceDetail>, sqlx::Error> {
        ResourceRepo::find_by_id(&self.pool, id).await
    }

    async fn list_resource_ids(&self) -> Result<Vec<DbId>, sqlx::Error> {
        ResourceRepo::list_ids(&self.pool).await
    }

    async fn titles(&self, resource_id: DbId) -> Result<Vec<Title>, sqlx::Error> {
        TitleRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn authors(&self, resource_id: DbId) -> Result<Vec<Author>, sqlx::Error> {
        AuthorRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn contact_persons(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContactPerson>, sqlx::Error> {
        ContactPersonRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn originating_laboratories(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<OriginatingLaboratory>, sqlx::Error> {
        LaboratoryRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn contributor_persons(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContributorPerson>, sqlx::Error> {
        ContributorRepo::list_persons_by_resource(&self.pool, resource_id).await
    }

    async fn contributor_institutions(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ContributorInstitution>, sqlx::Error> {
        ContributorRepo::list_institutions_by_resource(&self.pool, resource_id).await
    }

    async fn affiliations(
        &self,
        owner: AffiliationOwner,
        owner_id: DbId,
    ) -> Result<Vec<Affiliation>, sqlx::Error> {
        AffiliationRepo::list_for(&self.pool, owner, owner_id).await
    }

    async fn roles(&self, owner: RoleOwner, owner_id: DbId) -> Result<Vec<Role>, sqlx::Error> {
        RoleRepo::list_for(&self.pool, owner, owner_id).await
    }

    async fn descriptions(&self, resource_id: DbId) -> Result<Vec<Description>, sqlx::Error> {
        DescriptionRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn thesaurus_keywords(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<ThesaurusKeyword>, sqlx::Error> {
        KeywordRepo::list_thesaurus_by_resource(&self.pool, resource_id).await
    }

    async fn free_keywords(&self, resource_id: DbId) -> Result<Vec<FreeKeyword>, sqlx::Error> {
        KeywordRepo::list_free_by_resource(&self.pool, resource_id).await
    }

    async fn coverages(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<SpatialTemporalCoverage>, sqlx::Error> {
        CoverageRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn related_works(&self, resource_id: DbId) -> Result<Vec<RelatedWork>, sqlx::Error> {
        RelatedWorkRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn funding_references(
        &self,
        resource_id: DbId,
    ) -> Result<Vec<FundingReference>, sqlx::Error> {
        FundingReferenceRepo::list_by_resource(&self.pool, resource_id).await
    }

    async fn ggm_properties(
        &self,
        resource_id: DbId,
    ) -> Result<Option<GgmProperties>, sqlx::Error> {
        ResourceRepo::find_ggm_properties(&self.pool, resource_id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
