//! Styling for the drawable layers.
//!
//! The palette matches the app's dark "wireframe" look: faint grey road
//! segments and dots so the graph reads as a blueprint, a loud cyan route
//! that stays visible on both the wireframe and the raster tiles, and
//! green/red endpoint markers.

use galileo::Color;
use galileo::symbol::{CirclePointSymbol, SimpleContourSymbol};

pub fn edge_symbol() -> SimpleContourSymbol {
    SimpleContourSymbol::new(Color::rgba(0x55, 0x55, 0x55, 0x80), 1.0)
}

pub fn node_symbol() -> CirclePointSymbol {
    CirclePointSymbol::new(Color::rgba(0x88, 0x88, 0x88, 0xcc), 2.0)
}

pub fn route_symbol() -> SimpleContourSymbol {
    SimpleContourSymbol::new(Color::rgba(0x00, 0xff, 0xff, 0xe6), 5.0)
}

pub fn start_marker_symbol() -> CirclePointSymbol {
    CirclePointSymbol::new(Color::rgba(0x2e, 0xcc, 0x40, 0xff), 8.0)
}

pub fn end_marker_symbol() -> CirclePointSymbol {
    CirclePointSymbol::new(Color::rgba(0xff, 0x41, 0x36, 0xff), 8.0)
}
