use std::fmt::{Debug, Display};

use tokio::sync::mpsc::error::TryRecvError;
use wayview::client::ClientError;
use wayview::route::RequestId;
use wayview::types::{DisplayMode, GraphSnapshot, RouteResult};

use crate::app::app_data::AppData;
use crate::types::Dirty;

/// Completions of the spawned network fetches, applied to the app state
/// on the UI thread. Every variant clears the loading indicator, so the
/// indicator is guaranteed to go away on success and on every failure
/// path alike.
pub enum Event {
    GraphLoaded(GraphSnapshot),
    GraphFailed(ClientError),
    RouteResolved {
        id: RequestId,
        outcome: Result<RouteResult, ClientError>,
    },
}

impl Event {
    pub fn handle(self, data: &mut AppData) {
        data.busy = None;

        match self {
            Self::GraphLoaded(snapshot) => {
                data.graph_inflight = false;
                let city = snapshot.city.clone();
                data.cache.insert(snapshot);
                data.wireframe_for = Some(Dirty::new(city));
                log::debug!("Processed event GraphLoaded");
            }
            Self::GraphFailed(err) => {
                data.graph_inflight = false;
                data.alert = Some(format!("Error loading graph: {err}"));
                // Do not leave the user staring at a blank viewport: fall
                // back to the raster tiles. The cache stays unloaded, so
                // toggling again retries the fetch.
                if data.mode == DisplayMode::Graph {
                    data.mode = DisplayMode::Tile;
                    data.mode_changed = true;
                }
            }
            Self::RouteResolved { id, outcome } => {
                if !data.routes.is_current(id) {
                    log::debug!("Discarding stale route completion {id:?}");
                    return;
                }

                match outcome {
                    Ok(result) => {
                        log::info!(
                            "Route resolved: {} nodes, {:.2} m",
                            result.node_count,
                            result.distance_meters
                        );
                        data.route = Some(Dirty::new(result));
                    }
                    Err(ClientError::Server { detail, .. }) => {
                        data.alert = Some(detail);
                    }
                    Err(err) => {
                        log::error!("Route request failed: {err}");
                        data.alert = Some("Server error".to_string());
                    }
                }
            }
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::GraphLoaded(_) => "GraphLoaded",
                Self::GraphFailed(_) => "GraphFailed",
                Self::RouteResolved { .. } => "RouteResolved",
            }
        )
    }
}

impl Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event::{self}")
    }
}

pub struct EventHandler {
    recv: tokio::sync::mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(recv: tokio::sync::mpsc::Receiver<Event>) -> Self {
        Self { recv }
    }

    /// Drains the channel once per frame. Fetch tasks only ever send and
    /// finish, so a disconnect here means the app is shutting down.
    pub fn handle_events(&mut self, data: &mut AppData) {
        loop {
            match self.recv.try_recv() {
                Ok(event) => {
                    log::trace!("[event] Handling {event}");
                    event.handle(data);
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Event channel closed");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wayview::types::Coordinate;

    use super::*;

    fn data() -> AppData {
        AppData::new("Hoboken".to_string())
    }

    fn snapshot() -> GraphSnapshot {
        GraphSnapshot {
            city: "Hoboken".into(),
            edges: vec![vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]],
            nodes: vec![Coordinate::new(1.0, 1.0)],
        }
    }

    fn route() -> RouteResult {
        RouteResult {
            path: vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)],
            distance_meters: 1234.5,
            node_count: 17,
        }
    }

    #[test]
    fn graph_loaded_fills_cache_and_clears_indicator() {
        let mut data = data();
        data.busy = Some("loading".into());
        data.graph_inflight = true;

        Event::GraphLoaded(snapshot()).handle(&mut data);

        assert!(data.cache.is_loaded("Hoboken"));
        assert!(data.busy.is_none());
        assert!(!data.graph_inflight);
        assert!(data.wireframe_for.as_ref().is_some_and(|c| c.is_dirty()));
    }

    #[test]
    fn graph_failure_restores_tile_mode() {
        let mut data = data();
        data.mode = DisplayMode::Graph;
        data.busy = Some("loading".into());
        data.graph_inflight = true;

        Event::GraphFailed(ClientError::Server {
            status: 500,
            detail: "osm down".into(),
        })
        .handle(&mut data);

        assert_eq!(data.mode, DisplayMode::Tile);
        assert!(data.mode_changed);
        assert!(data.busy.is_none());
        assert!(!data.cache.is_loaded("Hoboken"));
        assert!(data.alert.as_deref().unwrap().contains("osm down"));
    }

    #[test]
    fn server_detail_is_surfaced_verbatim() {
        let mut data = data();
        let id = data.routes.issue();

        Event::RouteResolved {
            id,
            outcome: Err(ClientError::Server {
                status: 404,
                detail: "No path found".into(),
            }),
        }
        .handle(&mut data);

        assert_eq!(data.alert.as_deref(), Some("No path found"));
        assert!(data.route.is_none());
    }

    #[test]
    fn stale_route_completion_is_discarded() {
        let mut data = data();
        let stale = data.routes.issue();
        let _current = data.routes.issue();

        Event::RouteResolved {
            id: stale,
            outcome: Ok(route()),
        }
        .handle(&mut data);

        assert!(data.route.is_none());
    }

    #[test]
    fn current_route_completion_is_rendered() {
        let mut data = data();
        let _stale = data.routes.issue();
        let current = data.routes.issue();

        Event::RouteResolved {
            id: current,
            outcome: Ok(route()),
        }
        .handle(&mut data);

        let drawn = data.route.expect("route should be queued for drawing");
        assert!(drawn.is_dirty());
        assert_eq!(drawn.node_count, 17);
    }

    #[test]
    fn transport_failure_gets_generic_alert() {
        let mut data = data();
        let id = data.routes.issue();
        data.busy = Some("Calculating path...".into());

        Event::RouteResolved {
            id,
            outcome: Err(ClientError::MalformedResponse(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            )),
        }
        .handle(&mut data);

        assert_eq!(data.alert.as_deref(), Some("Server error"));
        assert!(data.busy.is_none());
    }
}
