//! Repositories for coverage, related works and funding references.

use mde_core::types::DbId;
use sqlx::PgPool;

use super::relation::{fetch_by_id, Relation};
use crate::models::coverage::SpatialTemporalCoverage;
use crate::models::reference::{FundingReference, RelatedWork};

pub struct CoverageRepo;

impl CoverageRepo {
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<SpatialTemporalCoverage>, sqlx::Error> {
        fetch_by_id(pool, Relation::Coverages.select_by_resource(), resource_id).await
    }
}

pub struct RelatedWorkRepo;

impl RelatedWorkRepo {
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<RelatedWork>, sqlx::Error> {
        fetch_by_id(pool, Relation::RelatedWorks.select_by_resource(), resource_id).await
    }
}

pub struct FundingReferenceRepo;

impl FundingReferenceRepo {
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<FundingReference>, sqlx::Error> {
        fetch_by_id(pool, Relation::FundingReferences.select_by_resource(), resource_id).await
    }
}
