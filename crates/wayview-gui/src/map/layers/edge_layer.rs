use galileo::layer::{FeatureId, FeatureLayer, Layer as GalileoLayer};
use galileo::symbol::SimpleContourSymbol;
use galileo_types::geo::Crs;
use galileo_types::geometry::Geometry;
use galileo_types::geometry_type::GeoSpace2d;
use galileo_types::{Disambig, Disambiguate};
use geo_types::{Coord, LineString};
use wayview::types::Coordinate;

use crate::map::symbols;

type EdgeFeature = Disambig<LineString<f64>, GeoSpace2d>;

/// All road segments of the loaded city, one non-interactive contour
/// feature per segment. Edges are drawn independently; merging them into
/// one geometry is not worth it since none of them react to input.
pub struct EdgeLayer {
    layer: FeatureLayer<<EdgeFeature as Geometry>::Point, EdgeFeature, SimpleContourSymbol, GeoSpace2d>,
    features: Vec<FeatureId>,
}

impl EdgeLayer {
    pub fn new() -> Self {
        Self {
            layer: FeatureLayer::new(vec![], symbols::edge_symbol(), Crs::WGS84),
            features: Vec::new(),
        }
    }

    pub fn insert_edge(&mut self, geometry: &[Coordinate]) {
        let line = LineString::new(
            geometry
                .iter()
                .map(|c| Coord { x: c.lon, y: c.lat })
                .collect(),
        );
        let id = self.layer.features_mut().add(line.to_geo2d());
        self.features.push(id);
    }

    pub fn clear(&mut self) {
        for id in self.features.drain(..) {
            self.layer.features_mut().remove(id);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.features.len()
    }
}

impl Default for EdgeLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl GalileoLayer for EdgeLayer {
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
    fn each_edge_is_one_feature() {
        let mut layer = EdgeLayer::new();

        layer.insert_edge(&[Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]);
        assert_eq!(layer.edge_count(), 1);

        layer.insert_edge(&[
            Coordinate::new(2.0, 2.0),
            Coordinate::new(2.5, 2.1),
            Coordinate::new(3.0, 2.0),
        ]);
        assert_eq!(layer.edge_count(), 2);
    }

    #[test]
    fn clear_removes_everything() {
        let mut layer = EdgeLayer::new();
        layer.insert_edge(&[Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]);

        layer.clear();

        assert_eq!(layer.edge_count(), 0);
    }
}
