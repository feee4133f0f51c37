//! HTTP client for the Open Library search and cover services

use std::future::Future;

use reqwest::Client;

use super::query::Query;
use super::types::{ResultSet, SearchResponse, PAGE_SIZE};
use crate::config::Config;
use crate::error::{Result, SearchError};

/// Anything that can answer a catalog search
pub trait Catalog: Send + Sync + 'static {
    fn search(&self, query: &Query) -> impl Future<Output = Result<ResultSet>> + Send;
}

/// Client for the public Open Library API
pub struct OpenLibraryClient {
    client: Client,
    search_url: String,
}

impl OpenLibraryClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            search_url: config.search_url.clone(),
        })
    }

    /// Download cover image bytes
    pub async fn fetch_cover(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl Catalog for OpenLibraryClient {
    async fn search(&self, query: &Query) -> Result<ResultSet> {
        tracing::debug!("Searching catalog for {:?}", query.as_str());

        let limit = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", query.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .inspect_err(|e| tracing::error!("Search request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Search service returned {}", status);
            return Err(SearchError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)
            .inspect_err(|e| tracing::error!("Could not decode search response: {}", e))?;

        let results = ResultSet::from_response(parsed);
        tracing::info!(
            "Search {:?}: {} total, {} returned",
            query.as_str(),
            results.total,
            results.len()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::time::Duration;

    fn client_for(search_url: String) -> OpenLibraryClient {
        let config = Config {
            search_url,
            timeout: Duration::from_secs(5),
            ..Config::default()
        };
        OpenLibraryClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_encoded_query_and_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "the hobbit & co".into()),
                Matcher::UrlEncoded("limit".into(), "20".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"numFound": 150, "docs": [
                    {"title": "Dune", "author_name": ["Frank Herbert"], "first_publish_year": 1965, "cover_i": 123, "key": "/works/OL893415W"},
                    {"title": "Dune Messiah"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client_for(format!("{}/search.json", server.url()));
        let query = Query::parse("the hobbit & co").unwrap();
        let results = client.search(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.total, 150);
        assert_eq!(results.len(), 2);
        assert_eq!(results.books[0].title.as_deref(), Some("Dune"));
        assert_eq!(results.books[0].cover_i, Some(123));
        assert_eq!(results.books[1].title.as_deref(), Some("Dune Messiah"));
    }

    #[tokio::test]
    async fn test_search_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Error")
            .create_async()
            .await;

        let client = client_for(format!("{}/search.json", server.url()));
        let err = client.search(&Query::parse("dune").unwrap()).await.unwrap_err();
        assert!(matches!(err, SearchError::HttpStatus(s) if s.as_u16() == 503));
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = client_for(format!("{}/search.json", server.url()));
        let err = client.search(&Query::parse("dune").unwrap()).await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_connection_refused() {
        // Nothing listens on port 1
        let client = client_for("http://127.0.0.1:1/search.json".to_string());
        let err = client.search(&Query::parse("dune").unwrap()).await.unwrap_err();
        assert!(matches!(err, SearchError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_cover() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/id/123-M.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body(vec![0xFFu8, 0xD8, 0xFF, 0xE0])
            .create_async()
            .await;
        server
            .mock("GET", "/b/id/404-M.jpg")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(format!("{}/search.json", server.url()));
        let bytes = client
            .fetch_cover(&format!("{}/b/id/123-M.jpg", server.url()))
            .await
            .unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);

        let err = client
            .fetch_cover(&format!("{}/b/id/404-M.jpg", server.url()))
            .await
            .unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    }
}
