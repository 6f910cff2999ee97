//! On-disk caching for API responses and browser-session tokens

mod storage;

pub use storage::CacheStorage;
