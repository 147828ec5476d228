//! HTTP client for the nearest-stations service

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::finder::errors::FinderError;
use crate::models::{SearchQuery, SearchResultSet};

/// Anything that can answer a station search.
///
/// The terminal UI and the controller only talk to this trait, so tests can
/// swap the HTTP client for an in-memory source.
#[async_trait]
pub trait StationSource: Send + Sync {
    async fn find_stations(&self, query: &SearchQuery) -> Result<SearchResultSet, FinderError>;
}

/// reqwest-backed station search client
#[derive(Debug, Clone)]
pub struct StationFinderClient {
    client: Client,
    endpoint: String,
}

impl StationFinderClient {
    /// Build a client for the endpoint and HTTP settings in `config`
    pub fn from_config(config: &Config) -> Result<Self, FinderError> {
        let mut builder = Client::builder().user_agent(&config.http.user_agent);
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StationSource for StationFinderClient {
    async fn find_stations(&self, query: &SearchQuery) -> Result<SearchResultSet, FinderError> {
        info!(
            "Searching stations near ({}, {}) type={}",
            query.latitude,
            query.longitude,
            query.charging_type.as_str()
        );
        debug!("POST {}", self.endpoint);

        // `.json()` sets Content-Type: application/json
        let response = self.client.post(&self.endpoint).json(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Station service answered with status {}", status);
            return Err(FinderError::Status {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let stations: SearchResultSet = serde_json::from_slice(&body)?;

        info!("Station service returned {} stations", stations.len());
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChargingType;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    async fn spawn_service(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api/nearest-stations", addr)
    }

    fn sample_query() -> SearchQuery {
        SearchQuery {
            latitude: 37.7749,
            longitude: -122.4194,
            charging_type: ChargingType::DcFast,
        }
    }

    #[tokio::test]
    async fn test_posts_query_and_parses_stations() {
        let received: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
        let seen = received.clone();

        let app = Router::new().route(
            "/api/nearest-stations",
            post(move |Json(body): Json<serde_json::Value>| {
                let seen = seen.clone();
                async move {
                    *seen.lock().unwrap() = Some(body);
                    Json(serde_json::json!([
                        {
                            "station": {
                                "name": "Civic Center Garage",
                                "streetAddress": "355 McAllister St",
                                "city": "San Francisco",
                                "state": "CA",
                                "evDcFast": 2,
                                "evLevel2": 10,
                                "evLevel1": null
                            },
                            "distanceMeters": 1500.0
                        }
                    ]))
                }
            }),
        );

        let endpoint = spawn_service(app).await;
        let client = StationFinderClient::with_client(Client::new(), endpoint);

        let stations = client.find_stations(&sample_query()).await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station.name, "Civic Center Garage");

        let body = received.lock().unwrap().clone().unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "latitude": 37.7749,
                "longitude": -122.4194,
                "chargingType": "DCFast"
            })
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_error() {
        let app = Router::new().route(
            "/api/nearest-stations",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );

        let endpoint = spawn_service(app).await;
        let client = StationFinderClient::with_client(Client::new(), endpoint);

        let err = client.find_stations(&sample_query()).await.unwrap_err();
        assert!(matches!(err, FinderError::Status { status_code: 500 }));
        assert_eq!(err.to_string(), "Failed to fetch stations");
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_malformed_body_is_request_error() {
        let app = Router::new().route(
            "/api/nearest-stations",
            post(|| async { "not json" }),
        );

        let endpoint = spawn_service(app).await;
        let client = StationFinderClient::with_client(Client::new(), endpoint);

        let err = client.find_stations(&sample_query()).await.unwrap_err();
        assert!(matches!(err, FinderError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_request_error() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = StationFinderClient::with_client(
            Client::new(),
            format!("http://{}/api/nearest-stations", addr),
        );

        let err = client.find_stations(&sample_query()).await.unwrap_err();
        assert!(matches!(err, FinderError::Http(_)));
        assert!(!err.to_string().is_empty());
    }
}
