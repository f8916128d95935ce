use async_trait::async_trait;

use crate::domain::value_objects::DocumentTypeFilter;

#[derive(Debug)]
pub enum TypeRegistryError {
    UnknownTypeId(i32),
    UnknownTypeName(String),
}

impl std::fmt::Display for TypeRegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRegistryError::UnknownTypeId(id) => write!(f, "Unknown document type id: {}", id),
            TypeRegistryError::UnknownTypeName(name) => {
                write!(f, "Unknown document type: {}", name)
            }
        }
    }
}

impl std::error::Error for TypeRegistryError {}

/// Resolves a caller-supplied document-type filter to the canonical type
/// name stored in vector payloads. The type table itself belongs to the
/// document-management side; this port is the lookup seam.
#[async_trait]
pub trait DocumentTypeRegistry: Send + Sync {
    async fn resolve(&self, filter: &DocumentTypeFilter) -> Result<String, TypeRegistryError>;
}
