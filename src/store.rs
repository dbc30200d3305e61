//! Bucket-namespaced key-value storage contract and built-in backends.
//!
//! The token cache only needs two short transactions: a read-only lookup and an unconditional
//! overwrite. Applications that already run an embedded database implement [`KvStore`] over it;
//! [`MemoryStore`] and [`FileStore`] cover tests and small bots.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::_prelude::*;

/// Boxed future returned by [`KvStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract.
pub trait KvStore
where
	Self: Send + Sync,
{
	/// Read-only lookup of `key` inside `bucket`. Missing buckets read as missing keys.
	fn view<'a>(&'a self, bucket: &'a str, key: &'a [u8]) -> StoreFuture<'a, Option<Vec<u8>>>;

	/// Stores `value` under `key` inside `bucket`, replacing any previous value.
	fn update<'a>(&'a self, bucket: &'a str, key: &'a [u8], value: Vec<u8>) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`KvStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend or by decoding stored bytes.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Unique key identifying a stored value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreKey {
	/// Bucket (namespace) component.
	pub bucket: String,
	/// Raw key bytes within the bucket.
	pub key: Vec<u8>,
}
impl StoreKey {
	/// Builds a key for the provided bucket and raw key.
	pub fn new(bucket: &str, key: &[u8]) -> Self {
		Self { bucket: bucket.to_owned(), key: key.to_owned() }
	}
}
