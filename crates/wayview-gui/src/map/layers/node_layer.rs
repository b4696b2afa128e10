use galileo::layer::feature_layer::Feature;
use galileo::layer::{FeatureId, FeatureLayer, Layer as GalileoLayer};
use galileo::symbol::CirclePointSymbol;
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, NewGeoPoint};
use galileo_types::geometry_type::GeoSpace2d;
use wayview::types::Coordinate;

use crate::map::symbols;

/// One intersection of the wireframe, a small non-interactive dot.
pub struct NodeDot {
    position: GeoPoint2d,
}

impl NodeDot {
    pub fn new(position: Coordinate) -> Self {
        Self {
            position: GeoPoint2d::latlon(position.lat, position.lon),
        }
    }
}

impl Feature for NodeDot {
    type Geom = GeoPoint2d;

    fn geometry(&self) -> &Self::Geom {
        &self.position
    }
}

/// All graph nodes of the loaded city.
pub struct NodeLayer {
    layer: FeatureLayer<GeoPoint2d, NodeDot, CirclePointSymbol, GeoSpace2d>,
    features: Vec<FeatureId>,
}

impl NodeLayer {
    pub fn new() -> Self {
        Self {
            layer: FeatureLayer::new(vec![], symbols::node_symbol(), Crs::WGS84),
            features: Vec::new(),
        }
    }

    pub fn insert_node(&mut self, position: Coordinate) {
        let id = self.layer.features_mut().add(NodeDot::new(position));
        self.features.push(id);
    }

    pub fn clear(&mut self) {
        for id in self.features.drain(..) {
            self.layer.features_mut().remove(id);
        }
    }

    pub fn node_count(&self) -> usize {
        self.features.len()
    }
}

impl Default for NodeLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl GalileoLayer for NodeLayer {
    fn render(&self, view: &galileo::MapView, canvas: &mut dyn galileo::render::Canvas) {
        self.layer.render(view, canvas)
    }

    fn prepare(&self, view: &galileo::MapView) {
        self.layer.prepare(view)
    }

    fn set_messenger(&mut self, messenger: Box<dyn galileo::Messenger>) {
        self.layer.set_messenger(messenger)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn attribution(&self) -> Option<galileo::layer::attribution::Attribution> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_node_is_one_feature() {
        let mut layer = NodeLayer::new();

        layer.insert_node(Coordinate::new(1.0, 1.0));
        layer.insert_node(Coordinate::new(2.0, 2.0));

        assert_eq!(layer.node_count(), 2);
    }
}
