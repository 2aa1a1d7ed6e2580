//! People and organisations attached to a resource: authors, contact
//! persons, originating laboratories, contributors, and their affiliations
//! and roles.

use mde_core::types::DbId;
use mde_core::xml::is_blank;
use sqlx::FromRow;

/// An affiliation, optionally identified by a ROR id.
#[derive(Debug, Clone, FromRow)]
pub struct Affiliation {
    pub id: DbId,
    pub name: String,
    pub ror_id: Option<String>,
}

/// A controlled-vocabulary contributor role.
#[derive(Debug, Clone, FromRow)]
pub struct Role {
    pub id: DbId,
    pub name: String,
}

/// A row from `authors`, left-joined with the person or institution it
/// points at. Exactly one side is populated (enforced by a CHECK constraint).
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: DbId,
    pub position: i32,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub orcid: Option<String>,
    pub institution_name: Option<String>,
}

/// Borrowed view of which kind of author a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorIdentity<'a> {
    Person {
        family_name: &'a str,
        given_name: Option<&'a str>,
        orcid: Option<&'a str>,
    },
    Institution {
        name: &'a str,
    },
}

impl Author {
    /// Resolve the polymorphic author. Returns `None` for a row that has
    /// neither a person nor an institution attached.
    pub fn identity(&self) -> Option<AuthorIdentity<'_>> {
        if let Some(family_name) = self.family_name.as_deref() {
            return Some(AuthorIdentity::Person {
                family_name,
                given_name: self.given_name.as_deref(),
                orcid: self.orcid.as_deref(),
            });
        }
        self.institution_name
            .as_deref()
            .map(|name| AuthorIdentity::Institution { name })
    }
}

/// A contact person. Every field is optional in the form, so every field
/// is optional here.
#[derive(Debug, Clone, Default, FromRow)]
pub struct ContactPerson {
    pub id: DbId,
    pub position: i32,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub orcid: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl ContactPerson {
    /// `true` if no field carries any content.
    pub fn is_empty(&self) -> bool {
        [
            &self.family_name,
            &self.given_name,
            &self.orcid,
            &self.email,
            &self.website,
        ]
        .iter()
        .all(|field| is_blank(field.as_deref()))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct OriginatingLaboratory {
    pub id: DbId,
    pub lab_name: String,
    pub lab_id: Option<String>,
}

impl OriginatingLaboratory {
    /// `true` if neither the name nor the lab id carries content.
    /// Affiliations are checked by the caller, which holds them separately.
    pub fn is_empty(&self) -> bool {
        is_blank(Some(&self.lab_name)) && is_blank(self.lab_id.as_deref())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ContributorPerson {
    pub id: DbId,
    pub family_name: String,
    pub given_name: Option<String>,
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ContributorInstitution {
    pub id: DbId,
    pub name: String,
}
