//! Domain building blocks for the dataset metadata export pipeline.
//!
//! Everything in this crate is free of database access: format tables,
//! the canonical XML writer, artifact persistence, the XSLT processor port
//! and the envelope string helpers.

pub mod artifact;
pub mod envelope;
pub mod error;
pub mod format;
pub mod hashing;
pub mod thesaurus;
pub mod types;
pub mod xml;
pub mod xslt;
