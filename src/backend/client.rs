// src/backend/client.rs
//! HTTP client for the hex-data backend

use super::data::{HexData, HexSummary};
use crate::error::{Result, HexError};
use reqwest::Url;
use std::time::Duration;

/// Source of per-hex payloads.
///
/// The cache talks to the backend only through this seam so tests can script
/// responses without a server.
#[allow(async_fn_in_trait)]
pub trait HexFetcher {
    /// Fetch the payload for one hex. One round-trip, no retries.
    async fn fetch_hex(&self, campaign: &str, id: &str) -> Result<HexData>;
}

/// Backend client over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| HexError::Backend(format!("Invalid server URL {}: {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("hexmap/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HexError::Other(format!("HTTP client error: {}", e)))?;

        Ok(Self { base, client })
    }

    /// Build an API URL from path segments, percent-encoding each one
    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| HexError::Backend("Server URL cannot carry paths".to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// Best-effort hex index for a campaign, used to pre-seed biome display
    pub async fn fetch_index(&self, campaign: &str) -> Result<Vec<HexSummary>> {
        let url = self.api_url(&[campaign, "hexmap"])?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(HexError::Backend(format!("HTTP {}", response.status())));
        }

        response
            .json::<Vec<HexSummary>>()
            .await
            .map_err(|e| HexError::Backend(format!("Malformed hex index: {}", e)))
    }

    /// List campaigns known to the backend
    pub async fn fetch_campaigns(&self) -> Result<Vec<String>> {
        let url = self.api_url(&["campaigns"])?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(HexError::Backend(format!("HTTP {}", response.status())));
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|e| HexError::Backend(format!("Malformed campaign list: {}", e)))
    }
}

impl HexFetcher for HttpBackend {
    async fn fetch_hex(&self, campaign: &str, id: &str) -> Result<HexData> {
        let url = self.api_url(&[campaign, "hex", id])?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(HexError::Backend(format!("HTTP {}", response.status())));
        }

        response
            .json::<HexData>()
            .await
            .map_err(|e| HexError::Backend(format!("Malformed hex payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_layout() {
        let backend = HttpBackend::new("http://localhost:8000").unwrap();
        let url = backend.api_url(&["camp1", "hex", "G7"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/camp1/hex/G7");
    }

    #[test]
    fn test_api_url_encodes_segments() {
        let backend = HttpBackend::new("http://localhost:8000").unwrap();
        let url = backend.api_url(&["winter war", "hex", "G7"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/winter%20war/hex/G7");
    }

    #[test]
    fn test_api_url_tolerates_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8000/").unwrap();
        let url = backend.api_url(&["campaigns"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/campaigns");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(HttpBackend::new("not a url").is_err());
    }
}
