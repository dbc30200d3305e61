//! Single-slot access-token cache over a [`KvStore`].
//!
//! The cache is the only code that touches the token key. It holds at most one value: absent
//! until the first refresh, then overwritten by every later refresh. A zero-length value is
//! indistinguishable from absence.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{KvStore, StoreError},
};

/// Bucket that holds the cached token unless overridden.
pub const DEFAULT_BUCKET: &str = "ConfigBucket";
/// Key that holds the cached token unless overridden.
pub const DEFAULT_KEY: &str = "twitchAccessToken";

/// Handle to the persisted access token.
#[derive(Clone)]
pub struct TokenCache {
	store: Arc<dyn KvStore>,
	bucket: String,
	key: String,
}
impl TokenCache {
	/// Creates a cache at the default `ConfigBucket/twitchAccessToken` location.
	pub fn new(store: Arc<dyn KvStore>) -> Self {
		Self { store, bucket: DEFAULT_BUCKET.into(), key: DEFAULT_KEY.into() }
	}

	/// Moves the cache to another bucket/key pair.
	pub fn with_location(mut self, bucket: impl Into<String>, key: impl Into<String>) -> Self {
		self.bucket = bucket.into();
		self.key = key.into();

		self
	}

	/// Bucket holding the token.
	pub fn bucket(&self) -> &str {
		&self.bucket
	}

	/// Key holding the token.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Reads the cached token, failing with [`Error::NotFound`] when it is absent or empty.
	pub async fn read(&self) -> Result<TokenSecret> {
		match self.store.view(&self.bucket, self.key.as_bytes()).await? {
			Some(bytes) if !bytes.is_empty() => String::from_utf8(bytes)
				.map(TokenSecret::new)
				.map_err(|e| {
					StoreError::Serialization {
						message: format!("Cached access token is not UTF-8: {e}"),
					}
					.into()
				}),
			_ => Err(Error::NotFound { bucket: self.bucket.clone(), key: self.key.clone() }),
		}
	}

	/// Overwrites the cached token. Empty tokens are rejected before the store is touched.
	pub async fn persist(&self, token: &str) -> Result<()> {
		if token.is_empty() {
			return Err(Error::InvalidArgument {
				reason: "refusing to cache an empty access token".into(),
			});
		}

		self.store.update(&self.bucket, self.key.as_bytes(), token.as_bytes().to_vec()).await?;

		Ok(())
	}
}
impl Debug for TokenCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCache").field("bucket", &self.bucket).field("key", &self.key).finish()
	}
}
