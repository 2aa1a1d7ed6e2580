//! Repository for the `resources` table and its one-to-one lookups.

use mde_core::types::DbId;
use sqlx::PgPool;

use crate::models::ggm::GgmProperties;
use crate::models::resource::ResourceDetail;

/// Provides read access to resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Find a resource with its rights, resource type and language resolved.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ResourceDetail>, sqlx::Error> {
        sqlx::query_as::<_, ResourceDetail>(
            "SELECT r.id, r.doi, r.version, r.year, r.date_created, r.date_embargo_until, \
                    ri.text AS rights_text, ri.rights_identifier, ri.rights_uri, \
                    rt.resource_type_general, rt.description AS resource_type_description, \
                    l.code AS language_code, l.name AS language_name, \
                    r.updated_at \
             FROM resources r \
             JOIN rights ri ON ri.id = r.rights_id \
             JOIN resource_types rt ON rt.id = r.resource_type_id \
             JOIN languages l ON l.id = r.language_id \
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List every resource id, ascending.
    pub async fn list_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM resources ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    /// Load the GGM extension block.
    ///
    /// Returns `None` when the resource does not exist. For an existing
    /// resource without any GGM data every field of the result is `None`.
    pub async fn find_ggm_properties(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GgmProperties>, sqlx::Error> {
        sqlx::query_as::<_, GgmProperties>(
            "SELECT g.model_name, g.celestial_body, g.product_type, \
                    mt.name AS model_type, \
                    mr.name AS mathematical_representation, \
                    ff.name AS file_format \
             FROM resources r \
             LEFT JOIN ggm_properties g ON g.resource_id = r.id \
             LEFT JOIN model_types mt ON mt.id = r.model_type_id \
             LEFT JOIN mathematical_representations mr ON mr.id = r.mathematical_representation_id \
             LEFT JOIN file_formats ff ON ff.id = r.file_format_id \
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
