use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct IndexRequestDto {
    pub source_document_id: Uuid,
    pub document_type: String,
}

#[derive(Debug, Serialize)]
pub struct IndexResponseDto {
    pub success: bool,
    pub indexed_document_id: Option<Uuid>,
    pub total_chunks: Option<i32>,
    pub collection_name: Option<String>,
    pub error: Option<String>,
}

impl From<crate::application::use_cases::index_document::IndexDocumentResponse>
    for IndexResponseDto
{
    fn from(response: crate::application::use_cases::index_document::IndexDocumentResponse) -> Self {
        Self {
            success: response.success,
            indexed_document_id: response.indexed_document_id,
            total_chunks: response.total_chunks,
            collection_name: response.collection_name,
            error: response.error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexStatusResponseDto {
    pub source_document_id: Uuid,
    pub indexed: bool,
    pub indexed_document_id: Option<Uuid>,
    pub collection_name: Option<String>,
    pub total_chunks: Option<i32>,
    pub last_indexed_at: Option<String>,
}

impl IndexStatusResponseDto {
    pub fn from_response(
        source_document_id: Uuid,
        response: crate::application::use_cases::get_index_status::GetIndexStatusResponse,
    ) -> Self {
        Self {
            source_document_id,
            indexed: response.indexed,
            indexed_document_id: response.indexed_document_id,
            collection_name: response.collection_name,
            total_chunks: response.total_chunks,
            last_indexed_at: response.last_indexed_at.map(|t| t.to_rfc3339()),
        }
    }
}
