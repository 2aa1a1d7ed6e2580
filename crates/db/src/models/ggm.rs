//! Gravity-field-model extension block.

use mde_core::xml::is_blank;
use sqlx::FromRow;

/// GGM properties of a resource with model type, mathematical
/// representation and file format resolved to their names.
#[derive(Debug, Clone, Default, FromRow)]
pub struct GgmProperties {
    pub model_name: Option<String>,
    pub celestial_body: Option<String>,
    pub product_type: Option<String>,
    pub model_type: Option<String>,
    pub mathematical_representation: Option<String>,
    pub file_format: Option<String>,
}

impl GgmProperties {
    /// `true` if no field carries any content.
    pub fn is_empty(&self) -> bool {
        [
            &self.model_name,
            &self.celestial_body,
            &self.product_type,
            &self.model_type,
            &self.mathematical_representation,
            &self.file_format,
        ]
        .iter()
        .all(|field| is_blank(field.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(GgmProperties::default().is_empty());
    }

    #[test]
    fn any_resolved_name_makes_it_non_empty() {
        let props = GgmProperties {
            file_format: Some("ICGEM1.0".to_string()),
            ..Default::default()
        };
        assert!(!props.is_empty());
    }
}
