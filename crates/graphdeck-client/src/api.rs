//! HTTP client for the RAG backend.
//!
//! Every failure is mapped into `graphdeck_core::Error`: transport
//! problems become `Error::Http`, non-2xx responses become `Error::Api`
//! carrying the backend's `detail` message when the body has one.

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use graphdeck_core::{ApiConfig, Error, Result};
use graphdeck_graph::KnowledgeGraph;

use crate::types::*;

/// Client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid backend URL: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Build a URL from path segments. Segments are percent-encoded, so
    /// entity names with spaces or unicode are safe in the path.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config("backend URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        debug!("{} {}", method, url);
        let mut req = self.http.request(method, url);
        if let Some(key) = &self.api_key {
            req = req.header("X-API-Key", key);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let response = req.send().await.map_err(|e| Error::Http(e.to_string()))?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| Error::Http(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Health
    // ---------------------------------------------------------------

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.url(&["health"])?;
        self.send(self.request(Method::GET, url)).await
    }

    // ---------------------------------------------------------------
    // Documents
    // ---------------------------------------------------------------

    /// `GET /documents`: the full document-status map.
    pub async fn documents(&self) -> Result<DocsStatusesResponse> {
        let url = self.url(&["documents"])?;
        self.send(self.request(Method::GET, url)).await
    }

    /// `POST /documents/scan`: trigger a server-side ingestion scan.
    pub async fn scan_new_documents(&self) -> Result<ScanResponse> {
        let url = self.url(&["documents", "scan"])?;
        self.send(self.request(Method::POST, url)).await
    }

    // ---------------------------------------------------------------
    // Knowledge graph
    // ---------------------------------------------------------------

    /// `GET /kg/{label}`: graph neighborhood around a node label.
    pub async fn knowledge_graph(&self, label: &str, max_depth: u32) -> Result<KnowledgeGraph> {
        let mut url = self.url(&["kg", label])?;
        url.query_pairs_mut()
            .append_pair("max_depth", &max_depth.to_string());
        self.send(self.request(Method::GET, url)).await
    }

    /// `GET /kg/entity/{name}`: entity details, optionally with vector data.
    pub async fn entity_info(&self, entity_name: &str, include_vector_data: bool) -> Result<EntityInfo> {
        let mut url = self.url(&["kg", "entity", entity_name])?;
        if include_vector_data {
            url.query_pairs_mut()
                .append_pair("include_vector_data", "true");
        }
        self.send(self.request(Method::GET, url)).await
    }

    /// `PUT /kg/entity/{name}`: update entity properties. The name is the
    /// entity's display label, which is how the backend keys entities.
    pub async fn update_entity<T: Serialize + ?Sized>(
        &self,
        entity_name: &str,
        properties: &T,
    ) -> Result<UpdateResponse> {
        let url = self.url(&["kg", "entity", entity_name])?;
        self.send(self.request(Method::PUT, url).json(properties))
            .await
    }

    /// `PUT /kg/relation/{src}/{tgt}`: update relationship properties,
    /// keyed by both endpoint labels.
    pub async fn update_relation<T: Serialize + ?Sized>(
        &self,
        source_entity: &str,
        target_entity: &str,
        properties: &T,
    ) -> Result<UpdateResponse> {
        let url = self.url(&["kg", "relation", source_entity, target_entity])?;
        self.send(self.request(Method::PUT, url).json(properties))
            .await
    }

    /// `DELETE /kg/entity/{name}`: remove an entity and its relations.
    pub async fn delete_entity(&self, entity_name: &str) -> Result<UpdateResponse> {
        let url = self.url(&["kg", "entity", entity_name])?;
        self.send(self.request(Method::DELETE, url)).await
    }
}

/// Map a non-2xx response to `Error::Api`, preferring the body's
/// `detail` field for the message.
async fn api_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .and_then(|d| d.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("request failed with status {}", status));
    Error::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig::default()).unwrap()
    }

    #[test]
    fn test_url_encodes_path_segments() {
        let url = client().url(&["kg", "entity", "Ada Lovelace"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9621/kg/entity/Ada%20Lovelace"
        );
    }

    #[test]
    fn test_url_relation_segments() {
        let url = client().url(&["kg", "relation", "a/b", "c"]).unwrap();
        // A slash inside a label must not create an extra segment.
        assert_eq!(url.as_str(), "http://localhost:9621/kg/relation/a%2Fb/c");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(Error::Config(_))));
    }
}
