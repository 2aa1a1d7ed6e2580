//! A resource and everything hanging off it, loaded through a
//! [`ResourceStore`] in one pass before any XML is rendered.

use mde_core::error::CoreError;
use mde_core::types::DbId;
use mde_db::models::coverage::SpatialTemporalCoverage;
use mde_db::models::ggm::GgmProperties;
use mde_db::models::keyword::{FreeKeyword, ThesaurusKeyword};
use mde_db::models::party::{
    Affiliation, Author, ContactPerson, ContributorInstitution, ContributorPerson,
    OriginatingLaboratory, Role,
};
use mde_db::models::reference::{FundingReference, RelatedWork};
use mde_db::models::resource::{Description, ResourceDetail, Title};
use mde_db::repositories::{AffiliationOwner, RoleOwner};
use mde_db::store::ResourceStore;

use crate::error::ExportError;

/// A party row together with its affiliations.
#[derive(Debug, Clone)]
pub struct Affiliated<T> {
    pub party: T,
    pub affiliations: Vec<Affiliation>,
}

/// A contributor row together with its roles and affiliations.
#[derive(Debug, Clone)]
pub struct Contributor<T> {
    pub party: T,
    pub roles: Vec<Role>,
    pub affiliations: Vec<Affiliation>,
}

#[derive(Debug, Clone)]
pub struct ResourceGraph {
    pub detail: ResourceDetail,
    pub titles: Vec<Title>,
    pub authors: Vec<Affiliated<Author>>,
    pub contact_persons: Vec<Affiliated<ContactPerson>>,
    pub originating_laboratories: Vec<Affiliated<OriginatingLaboratory>>,
    pub contributor_persons: Vec<Contributor<ContributorPerson>>,
    pub contributor_institutions: Vec<Contributor<ContributorInstitution>>,
    pub descriptions: Vec<Description>,
    pub thesaurus_keywords: Vec<ThesaurusKeyword>,
    pub free_keywords: Vec<FreeKeyword>,
    pub coverages: Vec<SpatialTemporalCoverage>,
    pub related_works: Vec<RelatedWork>,
    pub funding_references: Vec<FundingReference>,
    pub ggm_properties: GgmProperties,
}

impl ResourceGraph {
    /// Load the full graph of `resource_id`.
    ///
    /// Fails with `NotFound` before touching any related table when the
    /// resource row does not exist.
    pub async fn load(store: &dyn ResourceStore, resource_id: DbId) -> Result<Self, ExportError> {
        let detail = store
            .find_resource(resource_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Resource",
                id: resource_id,
            })?;

        let mut authors = Vec::new();
        for author in store.authors(resource_id).await? {
            let affiliations = store
                .affiliations(AffiliationOwner::Author, author.id)
                .await?;
            authors.push(Affiliated {
                party: author,
                affiliations,
            });
        }

        let mut contact_persons = Vec::new();
        for person in store.contact_persons(resource_id).await? {
            let affiliations = store
                .affiliations(AffiliationOwner::ContactPerson, person.id)
                .await?;
            contact_persons.push(Affiliated {
                party: person,
                affiliations,
            });
        }

        let mut originating_laboratories = Vec::new();
        for lab in store.originating_laboratories(resource_id).await? {
            let affiliations = store
                .affiliations(AffiliationOwner::OriginatingLaboratory, lab.id)
                .await?;
            originating_laboratories.push(Affiliated {
                party: lab,
                affiliations,
            });
        }

        let mut contributor_persons = Vec::new();
        for person in store.contributor_persons(resource_id).await? {
            contributor_persons.push(Contributor {
                roles: store.roles(RoleOwner::ContributorPerson, person.id).await?,
                affiliations: store
                    .affiliations(AffiliationOwner::ContributorPerson, person.id)
                    .await?,
                party: person,
            });
        }

        let mut contributor_institutions = Vec::new();
        for institution in store.contributor_institutions(resource_id).await? {
            contributor_institutions.push(Contributor {
                roles: store
                    .roles(RoleOwner::ContributorInstitution, institution.id)
                    .await?,
                affiliations: store
                    .affiliations(AffiliationOwner::ContributorInstitution, institution.id)
                    .await?,
                party: institution,
            });
        }

        Ok(Self {
            detail,
            titles: store.titles(resource_id).await?,
            authors,
            contact_persons,
            originating_laboratories,
            contributor_persons,
            contributor_institutions,
            descriptions: store.descriptions(resource_id).await?,
            thesaurus_keywords: store.thesaurus_keywords(resource_id).await?,
            free_keywords: store.free_keywords(resource_id).await?,
            coverages: store.coverages(resource_id).await?,
            related_works: store.related_works(resource_id).await?,
            funding_references: store.funding_references(resource_id).await?,
            ggm_properties: store
                .ggm_properties(resource_id)
                .await?
                .unwrap_or_default(),
        })
    }
}
