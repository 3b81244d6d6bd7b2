//! Deduplicating per-layer fetch cache
//!
//! Each layer index gets its own [`OnceCell`]. Concurrent callers asking for
//! the same index await the same initialization, so a layer is fetched at
//! most once until it is cleared. A failed fetch leaves the cell empty and
//! the next call retries.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use tokio::sync::OnceCell;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::format::ViewerBrick;

/// Where layer data comes from
pub trait LayerSource: Send + Sync {
    /// Fetch the viewer records for one layer
    fn fetch(&self, index: u32) -> impl Future<Output = Result<Vec<ViewerBrick>>> + Send;
}

/// Reads `<base_dir>/layer-<index>.json`
#[derive(Clone, Debug)]
pub struct FileLayerSource {
    base_dir: PathBuf,
}

impl FileLayerSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn layer_path(&self, index: u32) -> PathBuf {
        self.base_dir.join(format!("layer-{}.json", index))
    }
}

impl LayerSource for FileLayerSource {
    async fn fetch(&self, index: u32) -> Result<Vec<ViewerBrick>> {
        let path = self.layer_path(index);
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::fetch(index, format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&json).map_err(|e| Error::fetch(index, format!("{}: {}", path.display(), e)))
    }
}

type LayerCell = Arc<OnceCell<Arc<[ViewerBrick]>>>;

/// Owned layer cache in front of a [`LayerSource`]
pub struct LayerLoader<S> {
    source: S,
    cells: Mutex<HashMap<u32, LayerCell>>,
    loading: Mutex<HashSet<u32>>,
    last_error: Mutex<Option<String>>,
}

impl<S: LayerSource> LayerLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cells: Mutex::new(HashMap::new()),
            loading: Mutex::new(HashSet::new()),
            last_error: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached bricks for `index`, fetching them on first use.
    ///
    /// Callers racing on the same index share a single fetch. Errors are
    /// returned to every waiter of that attempt and recorded in
    /// [`Self::last_error`].
    pub async fn load_layer(&self, index: u32) -> Result<Arc<[ViewerBrick]>> {
        let cell = self.cell(index);
        if let Some(bricks) = cell.get() {
            return Ok(bricks.clone());
        }

        let bricks = cell
            .get_or_try_init(|| async {
                let _loading = LoadingGuard::start(&self.loading, index);
                *lock(&self.last_error) = None;
                log::info!("Loading layer {}", index);

                match self.source.fetch(index).await {
                    Ok(bricks) => {
                        log::info!("Loaded layer {} ({} bricks)", index, bricks.len());
                        Ok(Arc::<[ViewerBrick]>::from(bricks))
                    }
                    Err(e) => {
                        log::error!("Failed to load layer {}: {}", index, e);
                        *lock(&self.last_error) = Some(e.to_string());
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(bricks.clone())
    }

    /// Warm the cache for several layers at once. Failures are only logged.
    pub async fn prefetch(&self, indices: &[u32]) -> usize {
        let results = join_all(indices.iter().map(|&i| self.load_layer(i))).await;
        results.iter().filter(|r| r.is_ok()).count()
    }

    /// A fetch for `index` is in flight
    pub fn is_layer_loading(&self, index: u32) -> bool {
        lock(&self.loading).contains(&index)
    }

    /// Any fetch is in flight
    pub fn is_loading(&self) -> bool {
        !lock(&self.loading).is_empty()
    }

    /// Message of the most recent failed fetch, cleared when a new fetch starts
    pub fn last_error(&self) -> Option<String> {
        lock(&self.last_error).clone()
    }

    pub fn cached_layer(&self, index: u32) -> Option<Arc<[ViewerBrick]>> {
        lock(&self.cells).get(&index).and_then(|cell| cell.get().cloned())
    }

    pub fn cached_count(&self) -> usize {
        lock(&self.cells).values().filter(|cell| cell.initialized()).count()
    }

    pub fn clear_cache(&self) {
        lock(&self.cells).clear();
    }

    /// Forget one layer. An in-flight fetch for it completes into a detached cell.
    pub fn clear_layer_cache(&self, index: u32) {
        lock(&self.cells).remove(&index);
    }

    fn cell(&self, index: u32) -> LayerCell {
        lock(&self.cells).entry(index).or_default().clone()
    }
}

/// Marks an index as loading for as long as it lives, including when the
/// owning future is dropped mid-fetch.
struct LoadingGuard<'a> {
    loading: &'a Mutex<HashSet<u32>>,
    index: u32,
}

impl<'a> LoadingGuard<'a> {
    fn start(loading: &'a Mutex<HashSet<u32>>, index: u32) -> Self {
        lock(loading).insert(index);
        Self { loading, index }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.loading).remove(&self.index);
    }
}

/// The guarded data stays consistent even if a holder panicked
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DVec3, Footprint};
    use crate::format::standard_brick;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail_next: AtomicBool,
    }

    impl LayerSource for CountingSource {
        async fn fetch(&self, index: u32) -> Result<Vec<ViewerBrick>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(Error::fetch(index, "connection reset"));
            }
            let y = index as f64 * 0.02;
            Ok(vec![standard_brick(DVec3::new(0.0, y, 0.0), Footprint::UNIT, "#ff0000", false)])
        }
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_fetch() {
        let loader = LayerLoader::new(CountingSource::default());

        let (a, b) = tokio::join!(loader.load_layer(3), loader.load_layer(3));
        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);

        // Served from cache afterwards
        loader.load_layer(3).await.unwrap();
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);
        assert!(loader.cached_layer(3).is_some());
    }

    #[tokio::test]
    async fn test_loading_flag_visible_while_suspended() {
        let loader = LayerLoader::new(CountingSource::default());

        let (result, seen) = tokio::join!(loader.load_layer(1), async {
            tokio::task::yield_now().await;
            (loader.is_layer_loading(1), loader.is_loading())
        });
        result.unwrap();
        assert_eq!(seen, (true, true));
        assert!(!loader.is_layer_loading(1));
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let source = CountingSource::default();
        source.fail_next.store(true, Ordering::SeqCst);
        let loader = LayerLoader::new(source);

        let err = loader.load_layer(2).await.unwrap_err();
        assert!(matches!(err, Error::Fetch { index: 2, .. }));
        assert!(loader.last_error().unwrap().contains("connection reset"));
        assert!(loader.cached_layer(2).is_none());
        assert!(!loader.is_layer_loading(2));

        let bricks = loader.load_layer(2).await.unwrap();
        assert_eq!(bricks.len(), 1);
        assert!(loader.last_error().is_none());
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let loader = LayerLoader::new(CountingSource::default());
        assert_eq!(loader.prefetch(&[0, 1, 2]).await, 3);
        assert_eq!(loader.cached_count(), 3);

        loader.clear_layer_cache(1);
        assert!(loader.cached_layer(1).is_none());
        assert!(loader.cached_layer(0).is_some());
        loader.load_layer(1).await.unwrap();
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 4);

        loader.clear_cache();
        assert_eq!(loader.cached_count(), 0);
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let bricks = vec![standard_brick(DVec3::ZERO, Footprint::new(2, 2), "#00ff00", true)];
        std::fs::write(dir.path().join("layer-0.json"), serde_json::to_string(&bricks).unwrap()).unwrap();

        let loader = LayerLoader::new(FileLayerSource::new(dir.path()));
        let loaded = loader.load_layer(0).await.unwrap();
        assert_eq!(&loaded[..], &bricks[..]);

        let missing = loader.load_layer(5).await.unwrap_err();
        assert!(matches!(missing, Error::Fetch { index: 5, .. }));
        assert!(loader.last_error().unwrap().contains("layer-5.json"));
    }
}
