//! Row structs read by the export pipeline.
//!
//! Each struct is a `FromRow` projection of one query in
//! [`crate::repositories`]; lookup tables are already resolved to names.

pub mod coverage;
pub mod ggm;
pub mod keyword;
pub mod party;
pub mod reference;
pub mod resource;
