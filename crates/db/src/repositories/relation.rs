//! Closed mapping from logical relation names to fixed SQL.
//!
//! Callers select a relation by enum variant; table and column names never
//! come from outside this module. Every query orders its rows explicitly so
//! exports are deterministic.

use mde_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

/// Collections hanging directly off a resource (`<table>.resource_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Titles,
    Authors,
    ContactPersons,
    OriginatingLaboratories,
    ContributorPersons,
    ContributorInstitutions,
    Descriptions,
    ThesaurusKeywords,
    FreeKeywords,
    Coverages,
    RelatedWorks,
    FundingReferences,
}

impl Relation {
    /// Full query selecting the relation's rows for one resource (`$1`).
    pub fn select_by_resource(self) -> &'static str {
        match self {
            Self::Titles => {
                "SELECT t.id, t.text, tt.name AS title_type \
                 FROM titles t \
                 JOIN title_types tt ON tt.id = t.title_type_id \
                 WHERE t.resource_id = $1 \
                 ORDER BY t.id ASC"
            }
            Self::Authors => {
                "SELECT a.id, a.position, p.family_name, p.given_name, p.orcid, \
                        i.name AS institution_name \
                 FROM authors a \
                 LEFT JOIN persons p ON p.id = a.person_id \
                 LEFT JOIN institutions i ON i.id = a.institution_id \
                 WHERE a.resource_id = $1 \
                 ORDER BY a.position ASC, a.id ASC"
            }
            Self::ContactPersons => {
                "SELECT id, position, family_name, given_name, orcid, email, website \
                 FROM contact_persons \
                 WHERE resource_id = $1 \
                 ORDER BY position ASC, id ASC"
            }
            Self::OriginatingLaboratories => {
                "SELECT id, lab_name, lab_id \
                 FROM originating_laboratories \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
            Self::ContributorPersons => {
                "SELECT id, family_name, given_name, orcid \
                 FROM contributor_persons \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
            Self::ContributorInstitutions => {
                "SELECT id, name \
                 FROM contributor_institutions \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
            Self::Descriptions => {
                "SELECT id, description_type, description \
                 FROM descriptions \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
            Self::ThesaurusKeywords => {
                "SELECT id, keyword, scheme, scheme_uri, value_uri, language \
                 FROM thesaurus_keywords \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
            Self::FreeKeywords => {
                "SELECT id, keyword, is_curated \
                 FROM free_keywords \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
            Self::Coverages => {
                "SELECT id, latitude_min, latitude_max, longitude_min, longitude_max, \
                        description, date_start, date_end, time_start, time_end, timezone \
                 FROM spatial_temporal_coverages \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
            Self::RelatedWorks => {
                "SELECT rw.id, rw.identifier, rel.name AS relation, it.name AS identifier_type \
                 FROM related_works rw \
                 JOIN relations rel ON rel.id = rw.relation_id \
                 JOIN identifier_types it ON it.id = rw.identifier_type_id \
                 WHERE rw.resource_id = $1 \
                 ORDER BY rw.id ASC"
            }
            Self::FundingReferences => {
                "SELECT id, funder, funder_id, funder_id_type, grant_number, grant_name, award_uri \
                 FROM funding_references \
                 WHERE resource_id = $1 \
                 ORDER BY id ASC"
            }
        }
    }
}

/// Entities that carry affiliations through a link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffiliationOwner {
    Author,
    ContactPerson,
    OriginatingLaboratory,
    ContributorPerson,
    ContributorInstitution,
}

impl AffiliationOwner {
    /// Query selecting the owner's affiliations (`$1` = owner id).
    pub fn select_affiliations(self) -> &'static str {
        match self {
            Self::Author => {
                "SELECT af.id, af.name, af.ror_id \
                 FROM author_affiliations l \
                 JOIN affiliations af ON af.id = l.affiliation_id \
                 WHERE l.author_id = $1 \
                 ORDER BY af.id ASC"
            }
            Self::ContactPerson => {
                "SELECT af.id, af.name, af.ror_id \
                 FROM contact_person_affiliations l \
                 JOIN affiliations af ON af.id = l.affiliation_id \
                 WHERE l.contact_person_id = $1 \
                 ORDER BY af.id ASC"
            }
            Self::OriginatingLaboratory => {
                "SELECT af.id, af.name, af.ror_id \
                 FROM laboratory_affiliations l \
                 JOIN affiliations af ON af.id = l.affiliation_id \
                 WHERE l.laboratory_id = $1 \
                 ORDER BY af.id ASC"
            }
            Self::ContributorPerson => {
                "SELECT af.id, af.name, af.ror_id \
                 FROM contributor_person_affiliations l \
                 JOIN affiliations af ON af.id = l.affiliation_id \
                 WHERE l.contributor_person_id = $1 \
                 ORDER BY af.id ASC"
            }
            Self::ContributorInstitution => {
                "SELECT af.id, af.name, af.ror_id \
                 FROM contributor_institution_affiliations l \
                 JOIN affiliations af ON af.id = l.affiliation_id \
                 WHERE l.contributor_institution_id = $1 \
                 ORDER BY af.id ASC"
            }
        }
    }
}

/// Entities that carry contributor roles through a link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleOwner {
    ContributorPerson,
    ContributorInstitution,
}

impl RoleOwner {
    /// Query selecting the owner's roles (`$1` = owner id).
    pub fn select_roles(self) -> &'static str {
        match self {
            Self::ContributorPerson => {
                "SELECT r.id, r.name \
                 FROM contributor_person_roles l \
                 JOIN roles r ON r.id = l.role_id \
                 WHERE l.contributor_person_id = $1 \
                 ORDER BY r.id ASC"
            }
            Self::ContributorInstitution => {
                "SELECT r.id, r.name \
                 FROM contributor_institution_roles l \
                 JOIN roles r ON r.id = l.role_id \
                 WHERE l.contributor_institution_id = $1 \
                 ORDER BY r.id ASC"
            }
        }
    }
}

/// Run a fixed relation query bound to a single id.
pub(crate) async fn fetch_by_id<T>(
    pool: &PgPool,
    query: &'static str,
    id: DbId,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    sqlx::query_as::<_, T>(query).bind(id).fetch_all(pool).await
}
