//! HTTP client for the graph-geometry and routing endpoints.

use std::fmt::Display;

use crate::protocol::{ErrorResponse, GraphRequest, GraphResponse, RouteRequest, RouteResponse};
use crate::types::{Coordinate, GraphSnapshot, RouteResult};

/// Anything that can produce a city's graph geometry. The production
/// implementation is [`ApiClient`]; tests substitute counting fakes.
pub trait GraphSource {
    fn fetch_graph(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<GraphSnapshot, ClientError>> + Send;
}

/// Anything that can compute a route between two coordinates.
pub trait RouteSource {
    fn fetch_route(
        &self,
        city: &str,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Result<RouteResult, ClientError>> + Send;
}

#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure, including failure to read the body.
    Network(reqwest::Error),
    /// The backend answered with a non-success status and an error detail.
    Server { status: u16, detail: String },
    /// The body of a success response did not have the expected shape.
    MalformedResponse(serde_json::Error),
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Server { .. } => None,
            Self::MalformedResponse(err) => Some(err),
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Server { status, detail } => write!(f, "server error ({status}): {detail}"),
            Self::MalformedResponse(err) => write!(f, "malformed response: {err}"),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err)
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B: serde::Serialize, R: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let response = self
            .http
            .post(format!("{}{endpoint}", self.base_url))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // The backend reports errors as `{"detail": ...}`. Anything
            // else (a proxy error page, say) falls back to the status line.
            let detail = serde_json::from_slice::<ErrorResponse>(&bytes)
                .map(|e| e.detail)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl GraphSource for ApiClient {
    async fn fetch_graph(&self, city: &str) -> Result<GraphSnapshot, ClientError> {
        log::debug!("Requesting graph geometry for '{city}'");
        let response: GraphResponse = self
            .post_json(
                "/api/graph-data",
                &GraphRequest {
                    city: city.to_string(),
                },
            )
            .await?;

        log::info!(
            "Received graph for '{city}': {} edges, {} nodes",
            response.edges.len(),
            response.nodes.len()
        );

        Ok(GraphSnapshot {
            city: city.to_string(),
            edges: response.edges,
            nodes: response.nodes,
        })
    }
}

impl RouteSource for ApiClient {
    async fn fetch_route(
        &self,
        city: &str,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteResult, ClientError> {
        log::debug!("Requesting route in '{city}' from {start} to {end}");
        let response: RouteResponse = self
            .post_json(
                "/api/route",
                &RouteRequest {
                    city: city.to_string(),
                    start_lat: start.lat,
                    start_lon: start.lon,
                    end_lat: end.lat,
                    end_lon: end.lon,
                },
            )
            .await?;

        Ok(RouteResult {
            path: response.path,
            distance_meters: response.distance,
            node_count: response.node_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn server_error_displays_detail() {
        let err = ClientError::Server {
            status: 404,
            detail: "No path found.".into(),
        };
        assert_eq!(err.to_string(), "server error (404): No path found.");
    }
}
