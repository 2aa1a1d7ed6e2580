//! Repositories for titles, descriptions and keywords.

use mde_core::types::DbId;
use sqlx::PgPool;

use super::relation::{fetch_by_id, Relation};
use crate::models::keyword::{FreeKeyword, ThesaurusKeyword};
use crate::models::resource::{Description, Title};

pub struct TitleRepo;

impl TitleRepo {
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<Title>, sqlx::Error> {
        fetch_by_id(pool, Relation::Titles.select_by_resource(), resource_id).await
    }
}

pub struct DescriptionRepo;

impl DescriptionRepo {
    pub async fn list_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<Description>, sqlx::Error> {
        fetch_by_id(pool, Relation::Descriptions.select_by_resource(), resource_id).await
    }
}

/// Controlled and free keywords.
pub struct KeywordRepo;

impl KeywordRepo {
    pub async fn list_thesaurus_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<ThesaurusKeyword>, sqlx::Error> {
        fetch_by_id(pool, Relation::ThesaurusKeywords.select_by_resource(), resource_id).await
    }

    pub async fn list_free_by_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<FreeKeyword>, sqlx::Error> {
        fetch_by_id(pool, Relation::FreeKeywords.select_by_resource(), resource_id).await
    }
}
