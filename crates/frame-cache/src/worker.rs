use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::cache::Inner;
use crate::loader::ImageLoader;

/// A handle to the single background preloader thread the cache may have
/// running at any given time. Mirrors `nannou_laser`'s detector-thread
/// handle: a stop signal plus a join handle, with the acknowledgement of
/// "the thread actually stopped" carried over its own small channel rather
/// than folded into the stop signal itself.
pub(crate) struct WorkerHandle {
    stop: Arc<AtomicBool>,
    done_rx: crossbeam_channel::Receiver<()>,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    pub(crate) fn spawn(
        inner: Arc<Mutex<Inner>>,
        loader: Arc<dyn ImageLoader>,
        frames: Vec<usize>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let worker_stop = stop.clone();

        let join = std::thread::Builder::new()
            .name("frame-cache-preload".to_string())
            .spawn(move || run(inner, loader, frames, worker_stop, done_tx))
            .expect("failed to spawn frame-cache preload thread");

        Self { stop, done_rx, join }
    }

    /// Requests a cooperative stop and waits up to one second for the
    /// worker to acknowledge. If it doesn't, the handle is dropped without
    /// joining: the thread is left to finish (or notice `stop` and exit) on
    /// its own, i.e. detached (spec §4.4 stop protocol).
    pub(crate) fn stop_and_wait(self) {
        self.stop.store(true, Ordering::Relaxed);
        match self.done_rx.recv_timeout(Duration::from_secs(1)) {
            Ok(()) => {
                let _ = self.join.join();
            }
            Err(_) => {
                warn!(
                    target: "frame_cache::worker",
                    "preload worker did not acknowledge stop within 1s; detaching"
                );
            }
        }
    }
}

fn run(
    inner: Arc<Mutex<Inner>>,
    loader: Arc<dyn ImageLoader>,
    frames: Vec<usize>,
    stop: Arc<AtomicBool>,
    done_tx: crossbeam_channel::Sender<()>,
) {
    for frame in frames {
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let path: Option<PathBuf> = {
            let guard = inner.lock().expect("frame-cache mutex poisoned");
            guard.image_files.get(frame).cloned()
        };
        // The sequence may have been replaced underneath us; a frame no
        // longer within bounds is dropped silently (spec §4.4).
        let Some(path) = path else { continue };

        if stop.load(Ordering::Relaxed) {
            break;
        }

        let Some(image) = loader.load(&path) else {
            continue;
        };

        let mut guard = inner.lock().expect("frame-cache mutex poisoned");
        // Don't overwrite a fresher on-demand load that landed while we
        // were decoding (mirrors `_on_image_preloaded`'s `if frame not in
        // self._cache` guard).
        if frame < guard.image_files.len() && !guard.images.contains_key(&frame) {
            guard.insert(frame, image);
        }
    }

    let _ = done_tx.send(());
}
