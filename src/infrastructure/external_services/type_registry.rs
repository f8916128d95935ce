use async_trait::async_trait;

use crate::application::ports::type_registry::{DocumentTypeRegistry, TypeRegistryError};
use crate::domain::value_objects::DocumentTypeFilter;

/// In-memory registry mirroring the document-management side's type table.
/// The table changes rarely; deployments override it via construction when
/// the canonical set differs.
pub struct StaticDocumentTypeRegistry {
    entries: Vec<(i32, String)>,
}

impl StaticDocumentTypeRegistry {
    pub fn new(entries: Vec<(i32, String)>) -> Self {
        Self { entries }
    }

    pub fn with_standard_types() -> Self {
        Self::new(vec![
            (1, "Quality Manual".to_string()),
            (2, "Procedure".to_string()),
            (3, "SOP".to_string()),
            (4, "Work Instruction".to_string()),
            (5, "Form".to_string()),
            (6, "Record".to_string()),
            (7, "Policy".to_string()),
            (8, "Audit Report".to_string()),
            (9, "CAPA".to_string()),
            (10, "Risk Assessment".to_string()),
        ])
    }
}

#[async_trait]
impl DocumentTypeRegistry for StaticDocumentTypeRegistry {
    async fn resolve(&self, filter: &DocumentTypeFilter) -> Result<String, TypeRegistryError> {
        match filter {
            DocumentTypeFilter::ById(type_id) => self
                .entries
                .iter()
                .find(|(id, _)| id == type_id)
                .map(|(_, name)| name.clone())
                .ok_or(TypeRegistryError::UnknownTypeId(*type_id)),
            DocumentTypeFilter::ByName(name) => self
                .entries
                .iter()
                .find(|(_, canonical)| canonical.eq_ignore_ascii_case(name.trim()))
                .map(|(_, canonical)| canonical.clone())
                .ok_or_else(|| TypeRegistryError::UnknownTypeName(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_by_id() {
        let registry = StaticDocumentTypeRegistry::with_standard_types();

        let name = registry.resolve(&DocumentTypeFilter::ById(3)).await.unwrap();
        assert_eq!(name, "SOP");
    }

    #[tokio::test]
    async fn test_resolve_by_name_is_case_insensitive() {
        let registry = StaticDocumentTypeRegistry::with_standard_types();

        let name = registry
            .resolve(&DocumentTypeFilter::ByName("sop".to_string()))
            .await
            .unwrap();
        assert_eq!(name, "SOP");
    }

    #[tokio::test]
    async fn test_unknown_id_is_an_error() {
        let registry = StaticDocumentTypeRegistry::with_standard_types();

        let result = registry.resolve(&DocumentTypeFilter::ById(99)).await;
        assert!(matches!(result, Err(TypeRegistryError::UnknownTypeId(99))));
    }

    #[tokio::test]
    async fn test_unknown_name_is_an_error() {
        let registry = StaticDocumentTypeRegistry::with_standard_types();

        let result = registry
            .resolve(&DocumentTypeFilter::ByName("Blueprint".to_string()))
            .await;
        assert!(matches!(
            result,
            Err(TypeRegistryError::UnknownTypeName(_))
        ));
    }
}
