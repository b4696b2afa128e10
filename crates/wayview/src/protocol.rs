//! Request and response bodies for the two backend endpoints.

use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphRequest {
    pub city: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphResponse {
    pub edges: Vec<Vec<Coordinate>>,
    pub nodes: Vec<Coordinate>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteRequest {
    pub city: String,
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub path: Vec<Coordinate>,
    pub distance: f64,
    pub node_count: u64,
}

/// Body of a non-success response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_response_shape() {
        let raw = r#"{"edges": [[{"lat": 1.0, "lon": 1.0}, {"lat": 2.0, "lon": 2.0}]],
                      "nodes": [{"lat": 1.0, "lon": 1.0}]}"#;
        let response: GraphResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(response.edges.len(), 1);
        assert_eq!(response.edges[0].len(), 2);
        assert_eq!(response.nodes, vec![Coordinate::new(1.0, 1.0)]);
    }

    #[test]
    fn route_request_field_names() {
        let request = RouteRequest {
            city: "Hoboken".into(),
            start_lat: 40.745,
            start_lon: -74.03,
            end_lat: 40.75,
            end_lon: -74.02,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["city"], "Hoboken");
        assert_eq!(value["start_lat"], 40.745);
        assert_eq!(value["end_lon"], -74.02);
    }

    #[test]
    fn error_response_detail() {
        let response: ErrorResponse =
            serde_json::from_str(r#"{"detail": "No path found."}"#).unwrap();
        assert_eq!(response.detail, "No path found.");
    }
}
