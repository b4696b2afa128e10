pub mod edge_layer;
pub mod marker_layer;
pub mod node_layer;
pub mod route_layer;

pub use edge_layer::EdgeLayer;
pub use marker_layer::MarkerLayer;
pub use node_layer::NodeLayer;
pub use route_layer::RouteLayer;
