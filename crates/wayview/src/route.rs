//! Route request validation and ordering.
//!
//! Validation happens synchronously before any network traffic. Requests
//! are tagged with a monotonically increasing sequence number; when two
//! are in flight at once, only the completion of the latest issued one
//! may be rendered, so a slow early response can never overwrite a later
//! route.

use std::fmt::Display;

use crate::client::{ClientError, RouteSource};
use crate::types::{Coordinate, ParseCoordinateError, RouteResult};

/// A fully validated route request, ready to send.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteQuery {
    pub city: String,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl RouteQuery {
    /// Builds a query from the raw text of the three input fields.
    /// Empty fields and unparseable coordinates are rejected here, never
    /// forwarded to the backend.
    pub fn parse(city: &str, start: &str, end: &str) -> Result<Self, ValidationError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ValidationError::MissingCity);
        }
        if start.trim().is_empty() {
            return Err(ValidationError::MissingStart);
        }
        if end.trim().is_empty() {
            return Err(ValidationError::MissingEnd);
        }

        let start = start.parse().map_err(ValidationError::BadStart)?;
        let end = end.parse().map_err(ValidationError::BadEnd)?;

        Ok(Self {
            city: city.to_string(),
            start,
            end,
        })
    }

    pub async fn fetch<S: RouteSource>(&self, source: &S) -> Result<RouteResult, ClientError> {
        source.fetch_route(&self.city, self.start, self.end).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingCity,
    MissingStart,
    MissingEnd,
    BadStart(ParseCoordinateError),
    BadEnd(ParseCoordinateError),
}

impl std::error::Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCity => write!(f, "Please enter a city"),
            Self::MissingStart | Self::MissingEnd => {
                write!(f, "Please select start/end points")
            }
            Self::BadStart(err) => write!(f, "Start point: {err}"),
            Self::BadEnd(err) => write!(f, "End point: {err}"),
        }
    }
}

/// Identifies one issued route request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(u64);

/// Hands out sequence numbers and remembers the latest issued one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }

    /// Whether `id` is the latest issued request. Completions for which
    /// this is false are stale and must be discarded.
    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_end_field_is_rejected() {
        assert_eq!(
            RouteQuery::parse("Hoboken", "40.745, -74.03", ""),
            Err(ValidationError::MissingEnd)
        );
    }

    #[test]
    fn empty_city_is_rejected() {
        assert_eq!(
            RouteQuery::parse("  ", "40.745, -74.03", "40.75, -74.02"),
            Err(ValidationError::MissingCity)
        );
    }

    #[test]
    fn malformed_start_is_rejected_before_io() {
        let result = RouteQuery::parse("Hoboken", "not a point", "40.75, -74.02");
        assert!(matches!(result, Err(ValidationError::BadStart(_))));
    }

    #[test]
    fn valid_fields_parse() {
        let query = RouteQuery::parse("Hoboken", "40.74500, -74.03000", "40.75000, -74.02000")
            .unwrap();
        assert_eq!(query.city, "Hoboken");
        assert_eq!(query.start, Coordinate::new(40.745, -74.03));
        assert_eq!(query.end, Coordinate::new(40.75, -74.02));
    }

    #[test]
    fn only_latest_request_is_current() {
        let mut tracker = RequestTracker::new();

        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn stale_completion_order_does_not_matter() {
        let mut tracker = RequestTracker::new();

        let first = tracker.issue();
        let second = tracker.issue();

        // Whichever order the responses arrive in, only the second one
        // may render.
        assert!(tracker.is_current(second));
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }
}
