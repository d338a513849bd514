//! Response caching with TTL expiry over a persistent key-value store.

pub mod store;
pub mod ttl;

pub use store::{FileStore, KvStore, MemStore};
pub use ttl::TtlCache;
