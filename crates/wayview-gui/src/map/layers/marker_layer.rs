use galileo::layer::feature_layer::Feature;
use galileo::layer::{FeatureId, FeatureLayer, Layer as GalileoLayer};
use galileo::render::render_bundle::RenderBundle;
use galileo::symbol::{CirclePointSymbol, Symbol};
use galileo_types::cartesian::Point3;
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, NewGeoPoint};
use galileo_types::geometry::Geom;
use galileo_types::geometry_type::GeoSpace2d;
use wayview::selection::Endpoint;
use wayview::types::Coordinate;

use crate::map::symbols;

pub struct EndpointMarker {
    position: GeoPoint2d,
    endpoint: Endpoint,
}

impl EndpointMarker {
    pub fn new(endpoint: Endpoint, position: Coordinate) -> Self {
        Self {
            position: GeoPoint2d::latlon(position.lat, position.lon),
            endpoint,
        }
    }
}

impl Feature for EndpointMarker {
    type Geom = GeoPoint2d;

    fn geometry(&self) -> &Self::Geom {
        &self.position
    }
}

/// Green for the start point, red for the end point.
struct EndpointSymbol {
    start: CirclePointSymbol,
    end: CirclePointSymbol,
}

impl EndpointSymbol {
    fn new() -> Self {
        Self {
            start: symbols::start_marker_symbol(),
            end: symbols::end_marker_symbol(),
        }
    }
}

impl Symbol<EndpointMarker> for EndpointSymbol {
    fn render(
        &self,
        feature: &EndpointMarker,
        geometry: &Geom<Point3>,
        min_resolution: f64,
        bundle: &mut RenderBundle,
    ) {
        match feature.endpoint {
            Endpoint::Start => self.start.render(feature, geometry, min_resolution, bundle),
            Endpoint::End => self.end.render(feature, geometry, min_resolution, bundle),
        }
    }
}

/// The two selection markers. Placing an endpoint that is already on the
/// map removes its old marker first, so there is never more than one
/// marker per role.
pub struct MarkerLayer {
    layer: FeatureLayer<GeoPoint2d, EndpointMarker, EndpointSymbol, GeoSpace2d>,
    start: Option<FeatureId>,
    end: Option<FeatureId>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self {
            layer: FeatureLayer::new(vec![], EndpointSymbol::new(), Crs::WGS84),
            start: None,
            end: None,
        }
    }

    pub fn place(&mut self, endpoint: Endpoint, position: Coordinate) {
        let slot = match endpoint {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        };

        if let Some(old) = slot.take() {
            self.layer.features_mut().remove(old);
        }
        *slot = Some(
            self.layer
                .features_mut()
                .add(EndpointMarker::new(endpoint, position)),
        );
    }

    pub fn marker_count(&self) -> usize {
        self.start.iter().count() + self.end.iter().count()
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl GalileoLayer for MarkerLayer {
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
    fn at_most_one_marker_per_role() {
        let mut layer = MarkerLayer::new();

        layer.place(Endpoint::Start, Coordinate::new(40.745, -74.03));
        layer.place(Endpoint::End, Coordinate::new(40.750, -74.02));
        layer.place(Endpoint::Start, Coordinate::new(40.746, -74.01));
        layer.place(Endpoint::Start, Coordinate::new(40.747, -74.00));

        assert_eq!(layer.marker_count(), 2);
    }

    #[test]
    fn replacing_start_keeps_end() {
        let mut layer = MarkerLayer::new();

        layer.place(Endpoint::Start, Coordinate::new(1.0, 1.0));
        layer.place(Endpoint::End, Coordinate::new(2.0, 2.0));
        let end_id = layer.end;

        layer.place(Endpoint::Start, Coordinate::new(3.0, 3.0));

        assert_eq!(layer.end, end_id);
    }
}
