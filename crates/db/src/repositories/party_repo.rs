//! Repositories for authors, contact persons, laboratories, contributors,
//! and the affiliations and roles linked to them.

use mde_core::types::DbId;
use sqlx::PgPool;

use super::relation::{fetch_by_id, AffiliationOwner, Relation, RoleOwner};
use crate::models::party::{
    Affiliation, Author, ContactPerson, ContributorInstitution, ContributorPerson,
    OriginatingLaboratory, Role,
};

pub struct AuthorRepo;

impl AuthorRepo {
    /// List authors in their display order.
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<Author>, sqlx::Error> {
        fetch_by_id(pool, Relation::Authors.select_by_resource(), resource_id).await
    }
}

pub struct ContactPersonRepo;

impl ContactPersonRepo {
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<ContactPerson>, sqlx::Error> {
        fetch_by_id(pool, Relation::ContactPersons.select_by_resource(), resource_id).await
    }
}

pub struct LaboratoryRepo;

impl LaboratoryRepo {
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<OriginatingLaboratory>, sqlx::Error> {
        fetch_by_id(
            pool,
            Relation::OriginatingLaboratories.select_by_resource(),
            resource_id,
        )
        .await
    }
}

/// Contributor persons and contributor institutions.
pub struct ContributorRepo;

impl ContributorRepo {
    pub async fn list_persons_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<ContributorPerson>, sqlx::Error> {
        fetch_by_id(pool, Relation::ContributorPersons.select_by_resource(), resource_id).await
    }

    pub async fn list_institutions_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<ContributorInstitution>, sqlx::Error> {
        fetch_by_id(
            pool,
            Relation::ContributorInstitutions.select_by_resource(),
            resource_id,
        )
        .await
    }
}

pub struct AffiliationRepo;

impl AffiliationRepo {
    pub async fn list_for(
        pool: &PgPool,
        owner: AffiliationOwner,
        owner_id: DbId,
    ) -> Result<Vec<Affiliation>, sqlx::Error> {
        fetch_by_id(pool, owner.select_affiliations(), owner_id).await
    }
}

pub struct RoleRepo;

impl RoleRepo {
    pub async fn list_for(
        pool: &PgPool,
        owner: RoleOwner,
        owner_id: DbId,
    ) -> Result<Vec<Role>, sqlx::Error> {
        fetch_by_id(pool, owner.select_roles(), owner_id).await
    }
}
