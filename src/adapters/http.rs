use crate::domain::ports::{ConfigProvider, FeedSource};
use crate::utils::error::{QuakeMapError, Result};
use async_trait::async_trait;
use geojson::{FeatureCollection, GeoJson};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Fetches both feeds with a plain GET. No caching and no retries.
pub struct HttpFeedClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpFeedClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn fetch_collection(&self, url: &str) -> Result<FeatureCollection> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| QuakeMapError::network(url, e))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(QuakeMapError::network(url, format!("HTTP status {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuakeMapError::network(url, e))?;

        let geojson: GeoJson = body
            .parse()
            .map_err(|e: geojson::Error| QuakeMapError::decode(url, e))?;
        let collection =
            FeatureCollection::try_from(geojson).map_err(|e| QuakeMapError::decode(url, e))?;

        tracing::debug!("Decoded {} features from {}", collection.features.len(), url);
        Ok(collection)
    }
}

#[async_trait]
impl<C: ConfigProvider> FeedSource for HttpFeedClient<C> {
    async fn fetch_earthquakes(&self) -> Result<FeatureCollection> {
        self.fetch_collection(self.config.earthquakes_url()).await
    }

    async fn fetch_plate_boundaries(&self) -> Result<FeatureCollection> {
        self.fetch_collection(self.config.plates_url()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use httpmock::prelude::*;

    fn config_for(server: &MockServer) -> DashboardConfig {
        DashboardConfig::with_urls(server.url("/quakes.geojson"), server.url("/plates.json"))
    }

    #[tokio::test]
    async fn test_fetch_earthquakes_sends_json_content_type() {
        let server = MockServer::start();
        let mock_data = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "mag": 4.2, "title": "M 4.2" },
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] }
            }]
        });

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/quakes.geojson")
                .header("content-type", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_data);
        });

        let client = HttpFeedClient::new(config_for(&server));
        let result = client.fetch_earthquakes().await.unwrap();

        api_mock.assert();
        assert_eq!(result.features.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_plate_boundaries_hits_plates_url() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/plates.json");
            then.status(200).json_body(serde_json::json!({
                "type": "FeatureCollection",
                "features": []
            }));
        });

        let client = HttpFeedClient::new(config_for(&server));
        let result = client.fetch_plate_boundaries().await.unwrap();

        api_mock.assert();
        assert!(result.features.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/quakes.geojson");
            then.status(500);
        });

        let client = HttpFeedClient::new(config_for(&server));
        let err = client.fetch_earthquakes().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, QuakeMapError::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_invalid_body_is_decode_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/quakes.geojson");
            then.status(200).body("<html>not json</html>");
        });

        let client = HttpFeedClient::new(config_for(&server));
        let err = client.fetch_earthquakes().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, QuakeMapError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn test_single_feature_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quakes.geojson");
            then.status(200).json_body(serde_json::json!({
                "type": "Feature",
                "properties": { "mag": 1.0 },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }));
        });

        let client = HttpFeedClient::new(config_for(&server));
        let err = client.fetch_earthquakes().await.unwrap_err();
        assert!(matches!(err, QuakeMapError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) is closed on test machines.
        let config = DashboardConfig::with_urls(
            "http://127.0.0.1:9/quakes".to_string(),
            "http://127.0.0.1:9/plates".to_string(),
        );
        let client = HttpFeedClient::new(config);
        let err = client.fetch_plate_boundaries().await.unwrap_err();
        assert!(matches!(err, QuakeMapError::NetworkError { .. }));
    }
}
