use galileo::layer::{FeatureId, FeatureLayer, Layer as GalileoLayer};
use galileo::symbol::SimpleContourSymbol;
use galileo_types::geo::Crs;
use galileo_types::geometry::Geometry;
use galileo_types::geometry_type::GeoSpace2d;
use galileo_types::{Disambig, Disambiguate};
use geo_types::{Coord, LineString};
use wayview::types::Coordinate;

use crate::map::symbols;

type RouteFeature = Disambig<LineString<f64>, GeoSpace2d>;

/// Holds the most recently computed route and nothing else. Setting a new
/// path removes the previous one first, so two routes can never be on
/// screen at once.
pub struct RouteLayer {
    layer: FeatureLayer<<RouteFeature as Geometry>::Point, RouteFeature, SimpleContourSymbol, GeoSpace2d>,
    current: Option<FeatureId>,
}

impl RouteLayer {
    pub fn new() -> Self {
        Self {
            layer: FeatureLayer::new(vec![], symbols::route_symbol(), Crs::WGS84),
            current: None,
        }
    }

    pub fn set_path(&mut self, path: &[Coordinate]) {
        self.clear();

        let line = LineString::new(
            path.iter().map(|c| Coord { x: c.lon, y: c.lat }).collect(),
        );
        self.current = Some(self.layer.features_mut().add(line.to_geo2d()));
    }

    pub fn clear(&mut self) {
        if let Some(id) = self.current.take() {
            self.layer.features_mut().remove(id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl Default for RouteLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl GalileoLayer for RouteLayer {
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

    fn path(offset: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(40.0 + offset, -74.0),
            Coordinate::new(40.1 + offset, -74.1),
        ]
    }

    #[test]
    fn starts_empty() {
        assert!(RouteLayer::new().is_empty());
    }

    #[test]
    fn new_path_replaces_old_path() {
        let mut layer = RouteLayer::new();

        layer.set_path(&path(0.0));
        let first = layer.current;
        layer.set_path(&path(1.0));

        assert_ne!(layer.current, first);
        assert!(!layer.is_empty());
    }

    #[test]
    fn clear_empties_the_layer() {
        let mut layer = RouteLayer::new();
        layer.set_path(&path(0.0));

        layer.clear();

        assert!(layer.is_empty());
    }
}
