//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods
//! that accept `&PgPool` as the first argument. Relation queries come from
//! the closed table in [`relation`].

pub mod descriptive_repo;
pub mod party_repo;
pub mod reference_repo;
pub mod relation;
pub mod resource_repo;

pub use descriptive_repo::{DescriptionRepo, KeywordRepo, TitleRepo};
pub use party_repo::{
    AffiliationRepo, AuthorRepo, ContactPersonRepo, ContributorRepo, LaboratoryRepo, RoleRepo,
};
pub use reference_repo::{CoverageRepo, FundingReferenceRepo, RelatedWorkRepo};
pub use relation::{AffiliationOwner, Relation, RoleOwner};
pub use resource_repo::ResourceRepo;
