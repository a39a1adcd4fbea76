pub mod mock_catalog_api;

use std::time::Duration;

use async_trait::async_trait;
use core_types::{Product, validate_catalog};
use surf::Url;
use thiserror::Error;

pub const PRODUCTS_ENDPOINT: &str = "product";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error: {0}")]
    UnexpectedStatus(u16),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Malformed catalog payload: {0}")]
    MalformedPayload(String),
}

/// Source of the product catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Catalog API client fetching `GET {base_url}/product`.
pub struct HttpCatalogClient {
    client: surf::Client,
    products_url: Url,
}

impl HttpCatalogClient {
    /// Create a client for the catalog served under `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the catalog API, with or without a trailing slash.
    /// * `timeout` - Optional per-request timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let products_url = build_endpoint_url(base_url, PRODUCTS_ENDPOINT)?;
        let client: surf::Client = surf::Config::new()
            .set_timeout(timeout)
            .try_into()
            .map_err(|e| CatalogError::RequestFailed(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            products_url,
        })
    }

    pub fn products_url(&self) -> &Url {
        &self.products_url
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        tracing::debug!(url = %self.products_url, "Fetching catalog");

        let mut response = self
            .client
            .get(self.products_url.as_str())
            .await
            .map_err(|e| CatalogError::RequestFailed(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::UnexpectedStatus(response.status().into()));
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| CatalogError::RequestFailed(format!("Failed to read body: {}", e)))?;

        let products = parse_products(&body)?;
        tracing::debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }
}

/// Parse and validate a catalog response body.
pub fn parse_products(body: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> =
        serde_json::from_str(body).map_err(|e| CatalogError::MalformedPayload(e.to_string()))?;
    validate_catalog(&products).map_err(|e| CatalogError::MalformedPayload(e.to_string()))?;
    Ok(products)
}

/// Join `endpoint` onto `base_url`, treating the last path segment of the base as a
/// directory so that `http://host/api` + `product` becomes `http://host/api/product`.
pub fn build_endpoint_url(base_url: &str, endpoint: &str) -> Result<Url, CatalogError> {
    let mut base =
        Url::parse(base_url.trim()).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    if base.cannot_be_a_base() {
        return Err(CatalogError::InvalidUrl(base_url.to_string()));
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(endpoint)
        .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", endpoint, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_std::{
        io::{ReadExt, WriteExt},
        net::TcpListener,
        task,
    };
    use core_types::ProductId;

    /// Serve a single HTTP response on a local port and return its base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        task::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_build_endpoint_url() {
        assert_eq!(
            build_endpoint_url("http://localhost:3000", "product").unwrap().as_str(),
            "http://localhost:3000/product"
        );
        assert_eq!(
            build_endpoint_url("https://example.com/api", "product").unwrap().as_str(),
            "https://example.com/api/product"
        );
        assert_eq!(
            build_endpoint_url("https://example.com/api/", "product").unwrap().as_str(),
            "https://example.com/api/product"
        );
        assert!(matches!(
            build_endpoint_url("not a url", "product"),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            build_endpoint_url("mailto:someone@example.com", "product"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_products() {
        let body = r#"[
            {"id": 1, "perfumeName": "Aqua", "company": "Dior", "price": 80,
             "feedbacks": [{"rating": 4}, {"rating": 5}]},
            {"id": 2, "perfumeName": "Sauvage", "company": "Dior", "price": "120", "feedbacks": []}
        ]"#;

        let products = parse_products(body).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::Number(1));
        assert_eq!(products[1].price, 120.0);
    }

    #[test]
    fn test_parse_products_rejects_malformed_payloads() {
        let not_a_list = r#"{"id": 1}"#;
        let missing_name = r#"[{"id": 1, "company": "Dior", "price": 80}]"#;
        let bad_rating = r#"[{"id": 1, "perfumeName": "Aqua", "company": "Dior", "price": 80,
                              "feedbacks": [{"rating": 9}]}]"#;
        let duplicate_ids = r#"[
            {"id": 1, "perfumeName": "Aqua", "company": "Dior", "price": 80},
            {"id": 1, "perfumeName": "Sauvage", "company": "Dior", "price": 120}
        ]"#;

        for body in [not_a_list, missing_name, bad_rating, duplicate_ids, "<html>"] {
            assert!(
                matches!(parse_products(body), Err(CatalogError::MalformedPayload(_))),
                "expected malformed payload for {}",
                body
            );
        }
    }

    #[test]
    fn test_parse_empty_catalog() {
        assert!(parse_products("[]").unwrap().is_empty());
    }

    #[test]
    fn test_client_uses_products_endpoint() {
        let client = HttpCatalogClient::new("http://localhost:3000/", None).unwrap();
        assert_eq!(client.products_url().as_str(), "http://localhost:3000/product");
    }

    #[async_std::test]
    async fn test_fetch_products_over_http() {
        let base_url = serve_once(
            "200 OK",
            r#"[{"id": 1, "perfumeName": "Aqua", "company": "Dior", "price": 80}]"#,
        )
        .await;
        let client = HttpCatalogClient::new(&base_url, Some(Duration::from_secs(5))).unwrap();

        let products = client.fetch_products().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Aqua");
    }

    #[async_std::test]
    async fn test_fetch_products_rejects_error_status() {
        let base_url = serve_once("500 Internal Server Error", "oops").await;
        let client = HttpCatalogClient::new(&base_url, Some(Duration::from_secs(5))).unwrap();

        assert_eq!(
            client.fetch_products().await,
            Err(CatalogError::UnexpectedStatus(500))
        );
    }

    #[async_std::test]
    async fn test_fetch_products_rejects_malformed_body() {
        let base_url = serve_once("200 OK", "<html>").await;
        let client = HttpCatalogClient::new(&base_url, Some(Duration::from_secs(5))).unwrap();

        assert!(matches!(
            client.fetch_products().await,
            Err(CatalogError::MalformedPayload(_))
        ));
    }
}
