//! Thread-safe in-memory [`KvStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{KvStore, StoreError, StoreFuture, StoreKey},
};

type StoreMap = Arc<RwLock<HashMap<StoreKey, Vec<u8>>>>;

/// Thread-safe storage backend that keeps values in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of stored values across all buckets.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if nothing has been stored yet.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn view_now(map: StoreMap, key: StoreKey) -> Option<Vec<u8>> {
		map.read().get(&key).cloned()
	}

	fn update_now(map: StoreMap, key: StoreKey, value: Vec<u8>) -> Result<(), StoreError> {
		map.write().insert(key, value);

		Ok(())
	}
}
impl KvStore for MemoryStore {
	fn view<'a>(&'a self, bucket: &'a str, key: &'a [u8]) -> StoreFuture<'a, Option<Vec<u8>>> {
		let map = self.0.clone();
		let key = StoreKey::new(bucket, key);

		Box::pin(async move { Ok(Self::view_now(map, key)) })
	}

	fn update<'a>(&'a self, bucket: &'a str, key: &'a [u8], value: Vec<u8>) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = StoreKey::new(bucket, key);

		Box::pin(async move { Self::update_now(map, key, value) })
	}
}
