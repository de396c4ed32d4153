use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{trace, warn};

use crate::error::CacheError;
use crate::image::Image;
use crate::loader::ImageLoader;
use crate::worker::WorkerHandle;

/// State guarded by the cache's single mutex: the decoded-image map, the
/// LRU order (front = least recently used), and the file-path list the
/// worker and `get_image` both resolve frame indices against.
pub(crate) struct Inner {
    pub(crate) images: HashMap<usize, Image>,
    pub(crate) lru_order: Vec<usize>,
    pub(crate) image_files: Vec<PathBuf>,
    max_size: usize,
}

impl Inner {
    /// Inserts (or overwrites) `frame`, then evicts from the front of
    /// `lru_order` until the map is back at or under `max_size`.
    pub(crate) fn insert(&mut self, frame: usize, image: Image) {
        if self.images.insert(frame, image).is_none() {
            self.lru_order.push(frame);
        } else {
            self.touch(frame);
        }
        while self.images.len() > self.max_size {
            let evicted = self.lru_order.remove(0);
            self.images.remove(&evicted);
            trace!(target: "frame_cache::cache", evicted, "lru eviction");
        }
    }

    /// Moves `frame` to the back of `lru_order` (most recently used).
    pub(crate) fn touch(&mut self, frame: usize) {
        if let Some(pos) = self.lru_order.iter().position(|&f| f == frame) {
            let f = self.lru_order.remove(pos);
            self.lru_order.push(f);
        }
    }
}

/// Thread-safe LRU cache of decoded image frames, keyed by `frame_index`.
///
/// A single mutex (`Inner`) protects the map, LRU order, and file-path
/// list; it is held across every insert/evict/touch and across
/// `set_image_sequence`, but released during the on-disk decode on a
/// `get_image` miss so a slow decode doesn't stall other threads' cache
/// hits (spec §4.4's "minimum contract is that LRU/map updates are atomic
/// w.r.t. other threads", not that the whole call is one critical
/// section). At most one background preloader thread is alive at a time.
pub struct Cache {
    inner: Arc<Mutex<Inner>>,
    loader: Arc<dyn ImageLoader>,
    worker: Mutex<Option<WorkerHandle>>,
}

impl Cache {
    pub fn new(max_size: usize, loader: Arc<dyn ImageLoader>) -> Result<Self, CacheError> {
        if max_size == 0 {
            return Err(CacheError::InvalidConfig { max_cache_size: max_size });
        }
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                images: HashMap::new(),
                lru_order: Vec::new(),
                image_files: Vec::new(),
                max_size,
            })),
            loader,
            worker: Mutex::new(None),
        })
    }

    /// Stops any running preloader, then clears the cache and replaces the
    /// file list. Leaves the cache empty.
    pub fn set_image_sequence(&self, files: Vec<PathBuf>) {
        self.stop_preload();
        let mut inner = self.inner.lock().expect("frame-cache mutex poisoned");
        inner.images.clear();
        inner.lru_order.clear();
        inner.image_files = files;
    }

    /// Out-of-range frames return `None`. On hit, `frame` moves to the back
    /// of the LRU order and the stored image is returned. On miss, the
    /// image is decoded synchronously, inserted, and the LRU front is
    /// evicted until the cache is back at or under `max_size`; a decode
    /// failure is logged and returns `None` without caching anything.
    pub fn get_image(&self, frame: usize) -> Option<Image> {
        let path = {
            let mut inner = self.inner.lock().expect("frame-cache mutex poisoned");
            if frame >= inner.image_files.len() {
                return None;
            }
            if let Some(image) = inner.images.get(&frame).cloned() {
                inner.touch(frame);
                return Some(image);
            }
            inner.image_files[frame].clone()
        };

        match self.loader.load(&path) {
            Some(image) => {
                let mut inner = self.inner.lock().expect("frame-cache mutex poisoned");
                // The sequence may have changed while we were decoding.
                if frame < inner.image_files.len() {
                    inner.insert(frame, image.clone());
                }
                Some(image)
            }
            None => {
                warn!(target: "frame_cache::cache", frame, path = %path.display(), "image load failed");
                None
            }
        }
    }

    /// Drops all cached entries. Does not touch `image_files` or the
    /// worker (spec §4.4).
    pub fn clear_cache(&self) {
        let mut inner = self.inner.lock().expect("frame-cache mutex poisoned");
        inner.images.clear();
        inner.lru_order.clear();
    }

    /// Clamps `[start, end]` to `[0, len-1]`, drops already-cached indices,
    /// and — if anything remains — stops any running worker and starts a
    /// new one over the filtered list.
    pub fn preload_range(&self, start: i64, end: i64) {
        let indices = {
            let inner = self.inner.lock().expect("frame-cache mutex poisoned");
            if inner.image_files.is_empty() {
                return;
            }
            let last = (inner.image_files.len() - 1) as i64;
            let lo = start.max(0).min(last);
            let hi = end.max(0).min(last);
            if lo > hi {
                return;
            }
            (lo..=hi)
                .map(|f| f as usize)
                .filter(|f| !inner.images.contains_key(f))
                .collect::<Vec<_>>()
        };

        if indices.is_empty() {
            return;
        }

        self.stop_preload();
        let handle = WorkerHandle::spawn(self.inner.clone(), self.loader.clone(), indices);
        *self.worker.lock().expect("frame-cache mutex poisoned") = Some(handle);
    }

    /// Equivalent to `preload_range(center - window, center + window)`.
    pub fn preload_around(&self, center: i64, window: i64) {
        self.preload_range(center - window, center + window);
    }

    /// Requests the running worker (if any) to stop and waits up to one
    /// second for acknowledgement before detaching.
    pub fn stop_preload(&self) {
        let handle = self.worker.lock().expect("frame-cache mutex poisoned").take();
        if let Some(handle) = handle {
            handle.stop_and_wait();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("frame-cache mutex poisoned").images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        self.stop_preload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLoader {
        loads: AtomicUsize,
    }

    impl ImageLoader for CountingLoader {
        fn load(&self, path: &std::path::Path) -> Option<Image> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let name = path.to_string_lossy();
            if name.contains("missing") {
                return None;
            }
            Some(Image::new(1, 1, vec![0, 0, 0]))
        }
    }

    fn sequence(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("frame{i}.png"))).collect()
    }

    #[test]
    fn invalid_max_size_is_rejected() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let err = Cache::new(0, loader).unwrap_err();
        assert_eq!(err, CacheError::InvalidConfig { max_cache_size: 0 });
    }

    #[test]
    fn out_of_range_frame_is_none() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(2, loader).unwrap();
        cache.set_image_sequence(sequence(3));
        assert_eq!(cache.get_image(99), None);
    }

    #[test]
    fn cache_never_exceeds_max_size() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(3, loader).unwrap();
        cache.set_image_sequence(sequence(10));
        for frame in 0..10 {
            cache.get_image(frame);
            assert!(cache.len() <= 3);
        }
    }

    #[test]
    fn scenario_6_lru_eviction_under_scrubbing() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(3, loader).unwrap();
        cache.set_image_sequence(sequence(4));

        cache.get_image(0);
        cache.get_image(1);
        cache.get_image(2);
        cache.get_image(0);
        cache.get_image(3);

        let inner = cache.inner.lock().unwrap();
        assert_eq!(inner.lru_order, vec![2, 0, 3]);
        assert!(!inner.images.contains_key(&1));
    }

    #[test]
    fn set_image_sequence_leaves_cache_empty() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(3, loader).unwrap();
        cache.set_image_sequence(sequence(3));
        cache.get_image(0);
        cache.get_image(1);
        assert!(!cache.is_empty());

        cache.set_image_sequence(sequence(3));
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_decode_is_not_cached() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(3, loader).unwrap();
        cache.set_image_sequence(vec![PathBuf::from("missing.png")]);
        assert_eq!(cache.get_image(0), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn consecutive_hits_are_observationally_equivalent() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(3, loader).unwrap();
        cache.set_image_sequence(sequence(2));
        let first = cache.get_image(0);
        let second = cache.get_image(0);
        assert_eq!(first, second);
    }

    #[test]
    fn preload_range_fills_cache_in_background() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(10, loader).unwrap();
        cache.set_image_sequence(sequence(5));

        cache.preload_range(0, 4);
        cache.stop_preload();

        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn preload_around_clamps_and_skips_cached_frames() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(10, loader).unwrap();
        cache.set_image_sequence(sequence(5));

        cache.get_image(2);
        cache.preload_around(2, 10);
        cache.stop_preload();

        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn preload_on_empty_sequence_is_a_no_op() {
        let loader: Arc<dyn ImageLoader> = Arc::new(CountingLoader::default());
        let cache = Cache::new(3, loader).unwrap();
        cache.preload_range(0, 10);
        cache.stop_preload();
        assert!(cache.is_empty());
    }
}
