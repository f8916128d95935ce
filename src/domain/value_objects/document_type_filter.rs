use serde::{Deserialize, Serialize};

/// Caller-supplied document-type filter, given either as a display name or as
/// the registry's numeric id. Parsed once at the boundary; the retrieval
/// pipeline only ever sees the resolved canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentTypeFilter {
    ById(i32),
    ByName(String),
}

impl DocumentTypeFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        DocumentTypeFilter::ByName(name.into())
    }

    pub fn by_id(id: i32) -> Self {
        DocumentTypeFilter::ById(id)
    }
}

impl std::fmt::Display for DocumentTypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentTypeFilter::ById(id) => write!(f, "type #{}", id),
            DocumentTypeFilter::ByName(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_json_parses_as_id() {
        let filter: DocumentTypeFilter = serde_json::from_str("3").unwrap();
        assert_eq!(filter, DocumentTypeFilter::ById(3));
    }

    #[test]
    fn test_string_json_parses_as_name() {
        let filter: DocumentTypeFilter = serde_json::from_str("\"Work Instruction\"").unwrap();
        assert_eq!(filter, DocumentTypeFilter::by_name("Work Instruction"));
    }
}
