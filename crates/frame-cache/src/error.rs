use thiserror::Error;

/// Closed error taxonomy for frame-cache construction failures. Everything
/// past construction recovers locally (logged and skipped) rather than
/// propagating — see [`crate::Cache::get_image`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("max_cache_size must be positive, got {max_cache_size}")]
    InvalidConfig { max_cache_size: usize },
}
