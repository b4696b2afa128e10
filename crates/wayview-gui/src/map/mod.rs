use std::sync::Arc;

use galileo::control::{
    EventProcessor, EventPropagation, MapController, MouseButton, MouseEvent, RawUserEvent,
    UserEvent,
};
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::{Map as GalileoMap, MapView};
use galileo_types::cartesian::{CartesianPoint2d, Point2, Size};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, GeoPoint, Projection};
use galileo_types::latlon;
use parking_lot::RwLock;
use wayview::selection::Endpoint;
use wayview::types::{Coordinate, DisplayMode, GraphSnapshot};

pub mod egui_state;
pub mod layers;
pub mod symbols;

use layers::{EdgeLayer, MarkerLayer, NodeLayer, RouteLayer};

/// Extra padding around a fitted bounding box so the route does not touch
/// the viewport border.
const FIT_PADDING: f64 = 1.2;

/// The galileo map plus the fixed set of drawable layers this app uses:
/// raster tiles at the bottom, the two wireframe layers, the route, and
/// the endpoint markers on top. Also captures left clicks, already
/// converted to geographic coordinates, for the selection machine.
pub struct MapSurface {
    map: GalileoMap,
    event_processor: EventProcessor,
    last_click: Arc<RwLock<Option<GeoPoint2d>>>,
    layers: LayerSet,
    view_size: Size<f64>,
}

/// Indices into the galileo layer collection plus shared handles to the
/// feature layers, so they can be filled while the collection owns them.
struct LayerSet {
    tiles: usize,
    edges: Arc<RwLock<EdgeLayer>>,
    edges_index: usize,
    nodes: Arc<RwLock<NodeLayer>>,
    nodes_index: usize,
    route: Arc<RwLock<RouteLayer>>,
    markers: Arc<RwLock<MarkerLayer>>,
}

impl MapSurface {
    pub fn new(view_center: Coordinate) -> Self {
        let tile_layer = RasterTileLayerBuilder::new_rest(|index| {
            format!(
                "https://tile.openstreetmap.org/{}/{}/{}.png",
                index.z, index.x, index.y
            )
        })
        .with_file_cache("./.tile_cache")
        .build()
        .expect("failed to build tile layer");

        let mut map = galileo::MapBuilder::default()
            .with_latlon(view_center.lat, view_center.lon)
            .with_z_level(15)
            .with_layer(tile_layer)
            .build();

        let edges = Arc::new(RwLock::new(EdgeLayer::new()));
        let nodes = Arc::new(RwLock::new(NodeLayer::new()));
        let route = Arc::new(RwLock::new(RouteLayer::new()));
        let markers = Arc::new(RwLock::new(MarkerLayer::new()));

        let layer_col = map.layers_mut();
        let edges_index = {
            layer_col.push(edges.clone());
            layer_col.len() - 1
        };
        let nodes_index = {
            layer_col.push(nodes.clone());
            layer_col.len() - 1
        };
        layer_col.push(route.clone());
        layer_col.push(markers.clone());

        // Wireframe stays hidden until graph mode is entered.
        layer_col.hide(edges_index);
        layer_col.hide(nodes_index);

        let last_click = Arc::new(RwLock::new(None));
        let click_ref = last_click.clone();

        let mut event_processor = EventProcessor::default();
        event_processor.add_handler(move |ev: &UserEvent, map: &mut GalileoMap| {
            if let UserEvent::Click(
                MouseButton::Left,
                MouseEvent {
                    screen_pointer_position,
                    ..
                },
            ) = ev
                && let Some(position) = map.view().screen_to_map_geo(*screen_pointer_position)
            {
                *click_ref.write() = Some(position);
            }

            EventPropagation::Propagate
        });
        event_processor.add_handler(MapController::default());

        Self {
            map,
            event_processor,
            last_click,
            layers: LayerSet {
                tiles: 0,
                edges,
                edges_index,
                nodes,
                nodes_index,
                route,
                markers,
            },
            view_size: Size::new(1.0, 1.0),
        }
    }

    /// The most recent unconsumed left click, as lat/lon.
    pub fn take_click(&mut self) -> Option<Coordinate> {
        self.last_click
            .write()
            .take()
            .map(|p| Coordinate::new(p.lat(), p.lon()))
    }

    /// Switches between the raster background and the wireframe. The
    /// wireframe layers may still be empty at this point; they only get
    /// geometry once a snapshot arrives.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        let layers = self.map.layers_mut();
        match mode {
            DisplayMode::Tile => {
                layers.show(self.layers.tiles);
                layers.hide(self.layers.edges_index);
                layers.hide(self.layers.nodes_index);
            }
            DisplayMode::Graph => {
                layers.hide(self.layers.tiles);
                layers.show(self.layers.edges_index);
                layers.show(self.layers.nodes_index);
            }
        }
        self.map.redraw();
    }

    /// Replaces the wireframe geometry with the given snapshot, one
    /// feature per edge and per node.
    pub fn set_wireframe(&mut self, snapshot: &GraphSnapshot) {
        {
            let mut edges = self.layers.edges.write();
            edges.clear();
            for edge in &snapshot.edges {
                edges.insert_edge(edge);
            }
        }
        {
            let mut nodes = self.layers.nodes.write();
            nodes.clear();
            for node in &snapshot.nodes {
                nodes.insert_node(*node);
            }
        }

        log::info!(
            "Wireframe for '{}': {} edges, {} nodes",
            snapshot.city,
            snapshot.edges.len(),
            snapshot.nodes.len()
        );
        self.map.redraw();
    }

    pub fn set_route(&mut self, path: &[Coordinate]) {
        self.layers.route.write().set_path(path);
        self.map.redraw();
    }

    pub fn clear_route(&mut self) {
        self.layers.route.write().clear();
        self.map.redraw();
    }

    pub fn place_marker(&mut self, endpoint: Endpoint, position: Coordinate) {
        self.layers.markers.write().place(endpoint, position);
        self.map.redraw();
    }

    /// Moves the view so the given lat/lon box fills the viewport.
    pub fn fit_to_bounds(&mut self, min: Coordinate, max: Coordinate) {
        let Some(projection) = Crs::EPSG3857.get_projection::<GeoPoint2d, Point2>() else {
            return;
        };
        let (Some(low), Some(high)) = (
            projection.project(&latlon!(min.lat, min.lon)),
            projection.project(&latlon!(max.lat, max.lon)),
        ) else {
            log::warn!("Cannot project route bounds, leaving view unchanged");
            return;
        };

        let resolution_x = (high.x() - low.x()).abs() / self.view_size.width();
        let resolution_y = (high.y() - low.y()).abs() / self.view_size.height();
        // A degenerate box (single point route) keeps a sane zoom level.
        let resolution = (resolution_x.max(resolution_y) * FIT_PADDING).max(0.5);

        let center = latlon!((min.lat + max.lat) / 2.0, (min.lon + max.lon) / 2.0);
        self.map.set_view(MapView::new(&center, resolution));
        self.map.redraw();
    }

    pub fn set_size(&mut self, size: Size<f64>) {
        self.view_size = size;
        self.map.set_size(size);
    }

    pub fn handle_event(&mut self, event: RawUserEvent) {
        self.event_processor.handle(event, &mut self.map);
    }

    pub fn map(&self) -> &GalileoMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut GalileoMap {
        &mut self.map
    }

    pub fn redraw(&self) {
        self.map.redraw()
    }
}
