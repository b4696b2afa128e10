//! Session-lifetime cache for fetched graph geometry.

use std::collections::HashMap;

use crate::client::{ClientError, GraphSource};
use crate::types::GraphSnapshot;

/// Memoizes one [`GraphSnapshot`] per city for the lifetime of the
/// session. Keyed by the city string as typed by the user; two spellings
/// of the same city are two entries, which costs a redundant fetch and
/// nothing else.
#[derive(Debug, Default)]
pub struct GraphCache {
    snapshots: HashMap<String, GraphSnapshot>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, city: &str) -> bool {
        self.snapshots.contains_key(city)
    }

    pub fn get(&self, city: &str) -> Option<&GraphSnapshot> {
        self.snapshots.get(city)
    }

    /// Stores a fetched snapshot under its city. Used by callers that run
    /// the fetch themselves (the GUI spawns it on its runtime and inserts
    /// the result when the completion event arrives).
    pub fn insert(&mut self, snapshot: GraphSnapshot) {
        self.snapshots.insert(snapshot.city.clone(), snapshot);
    }

    /// Returns the snapshot for `city`, fetching it through `source` at
    /// most once. A failed fetch leaves the city unloaded, so the next
    /// call retries.
    pub async fn ensure_loaded<S: GraphSource>(
        &mut self,
        source: &S,
        city: &str,
    ) -> Result<&GraphSnapshot, ClientError> {
        if !self.snapshots.contains_key(city) {
            let snapshot = source.fetch_graph(city).await?;
            self.snapshots.insert(city.to_string(), snapshot);
        }

        Ok(self
            .snapshots
            .get(city)
            .expect("snapshot was just inserted"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::types::Coordinate;

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GraphSource for CountingSource {
        async fn fetch_graph(&self, city: &str) -> Result<GraphSnapshot, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail {
                return Err(ClientError::Server {
                    status: 500,
                    detail: "boom".into(),
                });
            }

            Ok(GraphSnapshot {
                city: city.to_string(),
                edges: vec![vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]],
                nodes: vec![Coordinate::new(1.0, 1.0)],
            })
        }
    }

    #[tokio::test]
    async fn ensure_loaded_fetches_once() {
        let source = CountingSource::new(false);
        let mut cache = GraphCache::new();

        cache.ensure_loaded(&source, "Hoboken").await.unwrap();
        cache.ensure_loaded(&source, "Hoboken").await.unwrap();

        assert_eq!(source.calls(), 1);
        assert!(cache.is_loaded("Hoboken"));
    }

    #[tokio::test]
    async fn cities_are_cached_independently() {
        let source = CountingSource::new(false);
        let mut cache = GraphCache::new();

        cache.ensure_loaded(&source, "Hoboken").await.unwrap();
        cache.ensure_loaded(&source, "Weehawken").await.unwrap();
        cache.ensure_loaded(&source, "Hoboken").await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_city_unloaded() {
        let source = CountingSource::new(true);
        let mut cache = GraphCache::new();

        assert!(cache.ensure_loaded(&source, "Hoboken").await.is_err());
        assert!(!cache.is_loaded("Hoboken"));

        // A retry issues a second request instead of caching the failure.
        assert!(cache.ensure_loaded(&source, "Hoboken").await.is_err());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn insert_makes_ensure_loaded_a_no_op() {
        let source = CountingSource::new(false);
        let mut cache = GraphCache::new();

        cache.insert(GraphSnapshot {
            city: "Hoboken".into(),
            edges: vec![],
            nodes: vec![],
        });
        cache.ensure_loaded(&source, "Hoboken").await.unwrap();

        assert_eq!(source.calls(), 0);
    }
}
