//! Lookup Engine Module
//!
//! Cache-aside orchestration over the store, the entity registry, and
//! the upstream catalog. Every read goes cache first; misses fetch
//! upstream and write back, and ids the catalog does not know are
//! remembered with negative markers so repeat lookups stay local.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheManager, CacheStore, EntityRegistry, NegativeMarker};
use crate::engine::recency::RecencyQueue;
use crate::engine::stats::{LookupStats, StatsSnapshot};
use crate::error::{LookupError, Result};
use crate::movies::{MovieDetail, SearchQuery, SearchResultPage};
use crate::upstream::UpstreamClient;

// == Lookup Engine ==
/// The crate's central read path.
#[derive(Clone)]
pub struct LookupEngine {
    manager: CacheManager,
    upstream: Arc<dyn UpstreamClient>,
    recency: RecencyQueue,
    stats: Arc<LookupStats>,
}

impl LookupEngine {
    pub fn new(
        store: Arc<RwLock<CacheStore>>,
        registry: Arc<EntityRegistry>,
        upstream: Arc<dyn UpstreamClient>,
    ) -> Self {
        LookupEngine {
            manager: CacheManager::new(store.clone(), registry),
            upstream,
            recency: RecencyQueue::new(store),
            stats: Arc::new(LookupStats::new()),
        }
    }

    // == Search ==
    /// Resolves `query` to a result page, from cache when possible.
    ///
    /// Pages are cached whole, zero-match pages included: a search the
    /// catalog answered is a resolved search whatever its row count.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage> {
        let full_key = SearchResultPage::cache_key_for(query);

        if let Some(entity) = self.manager.get(&full_key).await? {
            if let Some(page) = entity.as_any().downcast_ref::<SearchResultPage>() {
                self.stats.record_hit();
                debug!(key = %full_key, "Search served from cache");
                return Ok(page.clone());
            }
        }

        self.stats.record_miss();
        self.stats.record_upstream_call();
        debug!(key = %full_key, "Search cache miss, querying catalog");

        let page = self.upstream.search(query).await?;
        self.manager.store(&page).await?;
        Ok(page)
    }

    // == Get By Id ==
    /// Resolves `imdb_id` to its full record, or `None` if the catalog
    /// does not know the id.
    ///
    /// A cached negative marker answers "absent" without going
    /// upstream. A fresh catalog "unknown id" reply plants that marker
    /// under the id's own detail key. Transport failures propagate and
    /// are never remembered as absence.
    ///
    /// Every lookup that yields a movie also pushes `imdb_id` onto the
    /// recently-viewed list.
    pub async fn get_by_id(&self, imdb_id: &str) -> Result<Option<MovieDetail>> {
        let full_key = MovieDetail::cache_key_for(imdb_id);

        if let Some(entity) = self.manager.get(&full_key).await? {
            if entity.as_any().downcast_ref::<NegativeMarker>().is_some() {
                self.stats.record_negative_hit();
                debug!(imdb_id, "Serving cached absence");
                return Ok(None);
            }
            if let Some(movie) = entity.as_any().downcast_ref::<MovieDetail>() {
                self.stats.record_hit();
                debug!(imdb_id, "Movie served from cache");
                self.recency.add(imdb_id).await;
                return Ok(Some(movie.clone()));
            }
        }

        self.stats.record_miss();
        self.stats.record_upstream_call();
        debug!(imdb_id, "Movie cache miss, fetching from catalog");

        match self.upstream.fetch_by_id(imdb_id).await? {
            Some(movie) => {
                self.manager.store(&movie).await?;
                self.recency.add(imdb_id).await;
                Ok(Some(movie))
            }
            None => {
                debug!(imdb_id, "Catalog reports unknown id, caching absence");
                let marker = NegativeMarker::shadowing(full_key);
                self.manager.store(&marker).await?;
                Ok(None)
            }
        }
    }

    // == Recently Viewed ==
    /// Resolves the recently-viewed id list back to full records,
    /// most recent first.
    ///
    /// Each id goes through `get_by_id` again, so expired entries are
    /// refetched on the way. Ids that no longer resolve are dropped
    /// from the answer: known-absent ids silently, upstream failures
    /// with a warning. Cache corruption still propagates.
    pub async fn recently_viewed(&self) -> Result<Vec<MovieDetail>> {
        let ids = self.recency.recent_ids().await;
        let mut movies = Vec::with_capacity(ids.len());

        for id in ids {
            match self.get_by_id(&id).await {
                Ok(Some(movie)) => movies.push(movie),
                Ok(None) => {}
                Err(LookupError::Upstream(reason)) => {
                    warn!(imdb_id = %id, %reason, "Skipping unresolvable id in recently viewed");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(movies)
    }

    // == Stats ==
    /// Copies the lookup counters out.
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::movies::SearchItem;

    struct MockUpstream {
        movies: Mutex<HashMap<String, MovieDetail>>,
        search_calls: AtomicUsize,
        fetch_calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl MockUpstream {
        fn new() -> Self {
            MockUpstream {
                movies: Mutex::new(HashMap::new()),
                search_calls: AtomicUsize::new(0),
                fetch_calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }

        fn insert(&self, movie: MovieDetail) {
            self.movies
                .lock()
                .unwrap()
                .insert(movie.imdb_id.clone(), movie);
        }

        fn remove(&self, imdb_id: &str) {
            self.movies.lock().unwrap().remove(imdb_id);
        }

        fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        fn fetch_calls(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UpstreamClient for MockUpstream {
        async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(LookupError::Upstream("mock outage".to_string()));
            }

            let movies = self.movies.lock().unwrap();
            let mut items: Vec<SearchItem> = movies
                .values()
                .map(|movie| SearchItem {
                    imdb_id: movie.imdb_id.clone(),
                    title: movie.title.clone(),
                    year: movie.year.clone(),
                    media_type: movie.media_type.clone(),
                    poster: movie.poster.clone(),
                })
                .collect();
            items.sort_by(|a, b| a.imdb_id.cmp(&b.imdb_id));
            let total = items.len() as u64;

            Ok(SearchResultPage::new(query.clone(), items, total))
        }

        async fn fetch_by_id(&self, imdb_id: &str) -> Result<Option<MovieDetail>> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(LookupError::Upstream("mock outage".to_string()));
            }

            Ok(self.movies.lock().unwrap().get(imdb_id).cloned())
        }
    }

    fn sample_movie(imdb_id: &str, title: &str) -> MovieDetail {
        MovieDetail {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: Some("2005".to_string()),
            ..MovieDetail::default()
        }
    }

    fn build_engine(
        upstream: Arc<MockUpstream>,
    ) -> (LookupEngine, Arc<RwLock<CacheStore>>) {
        let store = Arc::new(RwLock::new(CacheStore::new(100)));
        let registry = Arc::new(EntityRegistry::with_defaults());
        let engine = LookupEngine::new(store.clone(), registry, upstream);
        (engine, store)
    }

    #[tokio::test]
    async fn test_search_hits_upstream_once() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.insert(sample_movie("tt0372784", "Batman Begins"));
        let (engine, _store) = build_engine(upstream.clone());

        let query = SearchQuery::new("Batman")
            .with_media_type(crate::movies::MediaType::Movie)
            .with_year(2008)
            .with_page(1);
        let first = engine.search(&query).await.unwrap();
        let second = engine.search(&query).await.unwrap();

        assert_eq!(upstream.search_calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items[0].title, "Batman Begins");
    }

    #[tokio::test]
    async fn test_distinct_queries_cached_separately() {
        let upstream = Arc::new(MockUpstream::new());
        let (engine, _store) = build_engine(upstream.clone());

        engine.search(&SearchQuery::new("batman")).await.unwrap();
        engine
            .search(&SearchQuery::new("batman").with_page(2))
            .await
            .unwrap();

        assert_eq!(upstream.search_calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_match_search_is_cached() {
        let upstream = Arc::new(MockUpstream::new());
        let (engine, _store) = build_engine(upstream.clone());

        let query = SearchQuery::new("NoSuchMovie123");
        let first = engine.search(&query).await.unwrap();
        let second = engine.search(&query).await.unwrap();

        assert!(first.items.is_empty());
        assert_eq!(first.meta.total, 0);
        assert_eq!(second, first);
        assert_eq!(upstream.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_fetches_once() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.insert(sample_movie("tt0372784", "Batman Begins"));
        let (engine, _store) = build_engine(upstream.clone());

        let first = engine.get_by_id("tt0372784").await.unwrap().unwrap();
        let second = engine.get_by_id("tt0372784").await.unwrap().unwrap();

        assert_eq!(upstream.fetch_calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.title, "Batman Begins");
    }

    #[tokio::test]
    async fn test_unknown_id_absence_is_cached() {
        let upstream = Arc::new(MockUpstream::new());
        let (engine, store) = build_engine(upstream.clone());

        assert!(engine.get_by_id("tt0000000").await.unwrap().is_none());
        assert!(engine.get_by_id("tt0000000").await.unwrap().is_none());

        // Second answer came from the marker, not the catalog.
        assert_eq!(upstream.fetch_calls(), 1);

        let snapshot = engine.stats_snapshot();
        assert_eq!(snapshot.negative_hits, 1);
        assert_eq!(snapshot.misses, 1);

        // Unknown ids never count as viewed.
        let queue = RecencyQueue::new(store);
        assert!(queue.recent_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.set_fail(true);
        let (engine, _store) = build_engine(upstream.clone());

        let err = engine.get_by_id("tt0372784").await.unwrap_err();
        assert!(matches!(err, LookupError::Upstream(_)));

        // Once the catalog recovers the id resolves, so the outage was
        // not remembered as absence.
        upstream.set_fail(false);
        upstream.insert(sample_movie("tt0372784", "Batman Begins"));
        let movie = engine.get_by_id("tt0372784").await.unwrap();
        assert!(movie.is_some());
        assert_eq!(upstream.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_viewing_updates_recency_order() {
        let upstream = Arc::new(MockUpstream::new());
        let (engine, store) = build_engine(upstream.clone());

        for (i, id) in ["a", "b", "c", "d", "e", "f"].iter().enumerate() {
            upstream.insert(sample_movie(id, &format!("Movie {}", i)));
            engine.get_by_id(id).await.unwrap();
        }

        let queue = RecencyQueue::new(store);
        assert_eq!(queue.recent_ids().await, vec!["f", "e", "d", "c", "b"]);
    }

    #[tokio::test]
    async fn test_recently_viewed_resolves_full_records() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.insert(sample_movie("tt0000001", "First"));
        upstream.insert(sample_movie("tt0000002", "Second"));
        let (engine, _store) = build_engine(upstream.clone());

        engine.get_by_id("tt0000001").await.unwrap();
        engine.get_by_id("tt0000002").await.unwrap();

        let movies = engine.recently_viewed().await.unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_recently_viewed_skips_upstream_failures() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.insert(sample_movie("tt0000001", "Kept"));
        upstream.insert(sample_movie("tt0000002", "Dropped"));
        let (engine, store) = build_engine(upstream.clone());

        engine.get_by_id("tt0000001").await.unwrap();
        engine.get_by_id("tt0000002").await.unwrap();

        // Evict one entry, then take the catalog down: its id can no
        // longer resolve, the still-cached one can.
        {
            let mut store = store.write().await;
            store.remove(&MovieDetail::cache_key_for("tt0000002"));
        }
        upstream.set_fail(true);

        let movies = engine.recently_viewed().await.unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Kept"]);
    }

    #[tokio::test]
    async fn test_recently_viewed_skips_now_absent_ids() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.insert(sample_movie("tt0000001", "Gone"));
        let (engine, store) = build_engine(upstream.clone());

        engine.get_by_id("tt0000001").await.unwrap();

        // Entry expires and the catalog forgets the id.
        {
            let mut store = store.write().await;
            store.remove(&MovieDetail::cache_key_for("tt0000001"));
        }
        upstream.remove("tt0000001");

        assert!(engine.recently_viewed().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recently_viewed_drops_marker_backed_id_keeps_order() {
        let upstream = Arc::new(MockUpstream::new());
        for (id, title) in [
            ("tt0000001", "First"),
            ("tt0000002", "Middle"),
            ("tt0000003", "Last"),
        ] {
            upstream.insert(sample_movie(id, title));
        }
        let (engine, store) = build_engine(upstream.clone());

        for id in ["tt0000001", "tt0000002", "tt0000003"] {
            engine.get_by_id(id).await.unwrap();
        }

        // The middle id's entry expires and the catalog forgets it, so
        // re-resolution plants a marker in its place.
        {
            let mut store = store.write().await;
            store.remove(&MovieDetail::cache_key_for("tt0000002"));
        }
        upstream.remove("tt0000002");

        let movies = engine.recently_viewed().await.unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Last", "First"]);

        // The next listing answers the absent id from its marker.
        let fetches_before = upstream.fetch_calls();
        engine.recently_viewed().await.unwrap();
        assert_eq!(upstream.fetch_calls(), fetches_before);
    }

    #[tokio::test]
    async fn test_corrupt_entry_fails_lookup() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.insert(sample_movie("tt0372784", "Batman Begins"));
        let (engine, store) = build_engine(upstream.clone());

        {
            let mut store = store.write().await;
            store
                .set(
                    MovieDetail::cache_key_for("tt0372784"),
                    "not an envelope".to_string(),
                    60,
                )
                .unwrap();
        }

        let err = engine.get_by_id("tt0372784").await.unwrap_err();
        assert!(matches!(err, LookupError::Corruption(_)));
        assert_eq!(upstream.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_stats_count_each_outcome_once() {
        let upstream = Arc::new(MockUpstream::new());
        upstream.insert(sample_movie("tt0372784", "Batman Begins"));
        let (engine, _store) = build_engine(upstream.clone());

        engine.get_by_id("tt0372784").await.unwrap(); // miss
        engine.get_by_id("tt0372784").await.unwrap(); // hit
        engine.get_by_id("tt9999999").await.unwrap(); // miss, plants marker
        engine.get_by_id("tt9999999").await.unwrap(); // negative hit

        let snapshot = engine.stats_snapshot();
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.misses, 2);
        assert_eq!(snapshot.negative_hits, 1);
        assert_eq!(snapshot.upstream_calls, 2);
        assert_eq!(snapshot.hit_rate, 1.0 / 3.0);
    }
}
