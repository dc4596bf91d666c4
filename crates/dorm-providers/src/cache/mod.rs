//! Cache provider implementations
//!
//! | Driver | Provider | Feature |
//! |--------|----------|---------|
//! | `null` | [`NullCacheProvider`] | always |
//! | `file` | [`FileCacheProvider`] | always |
//! | `array`, `apcu` | `MokaCacheProvider` | `cache-moka` |
//! | `redis` | `RedisCacheProvider` | `cache-redis` |
//! | `memcached` | `MemcachedCacheProvider` | `cache-memcached` |

pub mod file;
#[cfg(feature = "cache-memcached")]
pub mod memcached;
#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

pub use file::FileCacheProvider;
#[cfg(feature = "cache-memcached")]
pub use memcached::MemcachedCacheProvider;
#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
pub use null::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheProvider;
