//! # push-cache
//!
//! Session store adapters.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Redis Store**: Sessions keyed by id with a secondary token index
//! - **Memory Store**: Process-local store for development and tests
//!
//! ## Example
//!
//! ```ignore
//! use push_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let store = RedisSessionStore::new(pool, "push-sessions");
//!
//! store.put(&session).await?;
//! let found = store.get_by_token(&session.token).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session stores
pub use session::{MemorySessionStore, RedisSessionStore};
