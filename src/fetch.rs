use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{Result, ScrapeError};
use crate::types::RawDocument;

/// Source of raw transient documents, keyed by name
#[async_trait::async_trait]
pub trait TransientSource: Send + Sync {
    async fn fetch_transient(&self, name: &str) -> Result<RawDocument>;
}

/// HTTP client for the Open Supernova Catalog JSON exports
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn document_url(&self, name: &str) -> String {
        // Catalog names can contain spaces ("SN 2011fe")
        format!("{}/{}.json", self.base_url, name.replace(' ', "%20"))
    }
}

#[async_trait::async_trait]
impl TransientSource for CatalogClient {
    #[instrument(skip(self))]
    async fn fetch_transient(&self, name: &str) -> Result<RawDocument> {
        let url = self.document_url(name);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::Api {
                message: format!(
                    "catalog returned {} for '{}'",
                    response.status().as_u16(),
                    name
                ),
            });
        }
        Ok(response.json::<RawDocument>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_url_encodes_spaces() {
        let client = CatalogClient::new("https://example.org/json/", 30).unwrap();
        assert_eq!(
            client.document_url("SN 2011fe"),
            "https://example.org/json/SN%202011fe.json"
        );
        assert_eq!(
            client.document_url("SN2011fe"),
            "https://example.org/json/SN2011fe.json"
        );
    }
}
