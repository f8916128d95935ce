use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::page_content_source::{
    ExtractedPage, PageContentError, PageContentSource,
};

#[derive(Deserialize)]
struct PagesResponse {
    pages: Vec<PageDto>,
}

#[derive(Deserialize)]
struct PageDto {
    page_number: i32,
    structured_content: String,
}

#[derive(Debug, Clone)]
pub struct ExtractionClientConfig {
    pub service_url: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl Default for ExtractionClientConfig {
    fn default() -> Self {
        let service_url = env::var("EXTRACTION_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self {
            service_url,
            max_retries: 3,
            timeout_secs: 60,
            backoff_factor: 1.5,
        }
    }
}

/// PageContentSource adapter over the extraction subsystem's HTTP API.
/// Extraction runs at approval time; this client only reads the stored
/// per-page result.
pub struct HttpPageContentSource {
    client: Client,
    config: ExtractionClientConfig,
}

impl HttpPageContentSource {
    pub fn new(config: ExtractionClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(ExtractionClientConfig::default())
    }

    async fn fetch_once(
        &self,
        source_document_id: Uuid,
    ) -> Result<Vec<ExtractedPage>, PageContentError> {
        let url = format!(
            "{}/documents/{}/pages",
            self.config.service_url.trim_end_matches('/'),
            source_document_id
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PageContentError::NetworkError(e.without_url().to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PageContentError::NotFound(source_document_id));
        }
        if !response.status().is_success() {
            return Err(PageContentError::ApiError(format!(
                "extraction service returned {}",
                response.status()
            )));
        }

        let body = response
            .json::<PagesResponse>()
            .await
            .map_err(|e| PageContentError::ApiError(e.to_string()))?;

        let mut pages: Vec<ExtractedPage> = body
            .pages
            .into_iter()
            .map(|page| ExtractedPage {
                page_number: page.page_number,
                structured_content: page.structured_content,
            })
            .collect();
        pages.sort_by_key(|page| page.page_number);

        Ok(pages)
    }
}

#[async_trait]
impl PageContentSource for HttpPageContentSource {
    async fn fetch_pages(
        &self,
        source_document_id: Uuid,
    ) -> Result<Vec<ExtractedPage>, PageContentError> {
        let mut attempts = 0;
        let mut last_error = None;

        loop {
            attempts += 1;

            match self.fetch_once(source_document_id).await {
                Ok(pages) => return Ok(pages),
                // A missing document will stay missing; retrying only
                // delays the failure report.
                Err(PageContentError::NotFound(id)) => {
                    return Err(PageContentError::NotFound(id));
                }
                Err(e) => {
                    last_error = Some(e);

                    if attempts > self.config.max_retries {
                        break;
                    }

                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );

                    tokio::time::sleep(backoff_time).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| PageContentError::ApiError("max retries exceeded".to_string())))
    }
}
