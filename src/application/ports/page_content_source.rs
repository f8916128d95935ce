use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug)]
pub enum PageContentError {
    NotFound(Uuid),
    NetworkError(String),
    ApiError(String),
}

impl std::fmt::Display for PageContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageContentError::NotFound(id) => write!(f, "No extracted content for document: {}", id),
            PageContentError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            PageContentError::ApiError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for PageContentError {}

/// One page of already-extracted document content. The extraction subsystem
/// owns parsing; this side treats the markdown-ish text as opaque input.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub page_number: i32,
    pub structured_content: String,
}

#[async_trait]
pub trait PageContentSource: Send + Sync {
    /// Ordered per-page content for an approved document.
    async fn fetch_pages(
        &self,
        source_document_id: Uuid,
    ) -> Result<Vec<ExtractedPage>, PageContentError>;
}
