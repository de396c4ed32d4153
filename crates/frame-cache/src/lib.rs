//! Thread-safe, LRU-evicting cache of decoded image frames (component D).
//!
//! [`Cache`] is independent of the curve/segmentation crates: it is keyed
//! purely by `frame_index`. A single mutex guards the map, the
//! LRU order, and the file-path list; `get_image` is synchronous and may
//! block briefly on disk I/O on a miss, while [`Cache::preload_range`] /
//! [`Cache::preload_around`] hand bulk loading off to a single background
//! worker thread that delivers results back under the same lock.

mod cache;
mod error;
mod image;
mod loader;
mod worker;

pub use cache::Cache;
pub use error::CacheError;
pub use image::{ColorSpace, Image};
pub use loader::{ExrLoader, ImageLoader, LoaderRegistry, StandardLoader};
