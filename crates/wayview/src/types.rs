use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A WGS84 position. No bounds checking is done anywhere in the client;
/// out-of-range values end up as backend errors or empty renders.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The format used for the start/end input fields, `"{lat}, {lon}"`
    /// with five decimal places per axis.
    pub fn to_field_text(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lon)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parses `"<lat>, <lon>"`. Rejects anything that is not two finite
    /// numbers, so malformed field text never reaches the backend.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let lat = parts.next().ok_or(ParseCoordinateError::MissingAxis)?;
        let lon = parts.next().ok_or(ParseCoordinateError::MissingAxis)?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| ParseCoordinateError::NotANumber)?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| ParseCoordinateError::NotANumber)?;

        if !lat.is_finite() || !lon.is_finite() {
            return Err(ParseCoordinateError::NotFinite);
        }

        Ok(Self { lat, lon })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseCoordinateError {
    MissingAxis,
    NotANumber,
    NotFinite,
}

impl std::error::Error for ParseCoordinateError {}

impl Display for ParseCoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAxis => write!(f, "expected \"<lat>, <lon>\""),
            Self::NotANumber => write!(f, "coordinate axis is not a number"),
            Self::NotFinite => write!(f, "coordinate axis is not finite"),
        }
    }
}

/// One road segment's geometry, at least two positions.
pub type GraphEdge = Vec<Coordinate>;

/// The full geometry of one city's road network. Immutable once fetched;
/// owned by [`crate::cache::GraphCache`].
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSnapshot {
    pub city: String,
    pub edges: Vec<GraphEdge>,
    pub nodes: Vec<Coordinate>,
}

/// A computed route as returned by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteResult {
    pub path: Vec<Coordinate>,
    pub distance_meters: f64,
    pub node_count: u64,
}

/// The lat/lon bounding box of `path`, as `(min, max)` corners. `None`
/// for an empty path.
pub fn path_bounds(path: &[Coordinate]) -> Option<(Coordinate, Coordinate)> {
    let first = path.first()?;
    let mut min = *first;
    let mut max = *first;

    for c in &path[1..] {
        min.lat = min.lat.min(c.lat);
        min.lon = min.lon.min(c.lon);
        max.lat = max.lat.max(c.lat);
        max.lon = max.lon.max(c.lon);
    }

    Some((min, max))
}

/// Which presentation the viewport currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Tile,
    Graph,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_text_has_five_decimals() {
        let c = Coordinate::new(40.745, -74.03);
        assert_eq!(c.to_field_text(), "40.74500, -74.03000");
    }

    #[test]
    fn parse_roundtrips_field_text() {
        let c: Coordinate = "40.75000, -74.02000".parse().unwrap();
        assert_eq!(c, Coordinate::new(40.75, -74.02));
    }

    #[test]
    fn parse_accepts_uneven_whitespace() {
        let c: Coordinate = "40.745,-74.03".parse().unwrap();
        assert_eq!(c, Coordinate::new(40.745, -74.03));
    }

    #[test]
    fn parse_rejects_single_axis() {
        assert_eq!(
            "40.745".parse::<Coordinate>(),
            Err(ParseCoordinateError::MissingAxis)
        );
    }

    #[test]
    fn parse_rejects_text() {
        assert_eq!(
            "here, there".parse::<Coordinate>(),
            Err(ParseCoordinateError::NotANumber)
        );
    }

    #[test]
    fn path_bounds_spans_all_points() {
        let path = vec![
            Coordinate::new(40.75, -74.02),
            Coordinate::new(40.74, -74.04),
            Coordinate::new(40.76, -74.03),
        ];

        let (min, max) = path_bounds(&path).unwrap();
        assert_eq!(min, Coordinate::new(40.74, -74.04));
        assert_eq!(max, Coordinate::new(40.76, -74.02));
    }

    #[test]
    fn path_bounds_of_empty_path_is_none() {
        assert_eq!(path_bounds(&[]), None);
    }

    #[test]
    fn parse_rejects_nan() {
        assert_eq!(
            "NaN, 4.5".parse::<Coordinate>(),
            Err(ParseCoordinateError::NotFinite)
        );
    }
}
