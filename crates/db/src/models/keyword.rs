use mde_core::types::DbId;
use sqlx::FromRow;

/// A controlled-vocabulary keyword.
#[derive(Debug, Clone, FromRow)]
pub struct ThesaurusKeyword {
    pub id: DbId,
    pub keyword: String,
    pub scheme: Option<String>,
    pub scheme_uri: Option<String>,
    pub value_uri: Option<String>,
    pub language: Option<String>,
}

/// An uncontrolled keyword with its curation flag.
#[derive(Debug, Clone, FromRow)]
pub struct FreeKeyword {
    pub id: DbId,
    pub keyword: String,
    pub is_curated: bool,
}
