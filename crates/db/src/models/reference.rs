use mde_core::types::DbId;
use mde_core::xml::is_blank;
use sqlx::FromRow;

/// A related work with its resolved relation and identifier type names.
#[derive(Debug, Clone, FromRow)]
pub struct RelatedWork {
    pub id: DbId,
    pub identifier: String,
    pub relation: String,
    pub identifier_type: String,
}

impl RelatedWork {
    /// `true` if the identifier is blank. Relation and identifier type are
    /// resolved lookup names and always present.
    pub fn is_empty(&self) -> bool {
        is_blank(Some(&self.identifier))
    }
}

/// A funding reference. Only `funder` is mandatory.
#[derive(Debug, Clone, Default, FromRow)]
pub struct FundingReference {
    pub id: DbId,
    pub funder: String,
    pub funder_id: Option<String>,
    pub funder_id_type: Option<String>,
    pub grant_number: Option<String>,
    pub grant_name: Option<String>,
    pub award_uri: Option<String>,
}

impl FundingReference {
    /// `true` if none of the five optional fields carries content.
    pub fn has_only_funder(&self) -> bool {
        [
            &self.funder_id,
            &self.funder_id_type,
            &self.grant_number,
            &self.grant_name,
            &self.award_uri,
        ]
        .iter()
        .all(|field| is_blank(field.as_deref()))
    }
}
