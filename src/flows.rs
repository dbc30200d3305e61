//! App-access-token lifecycle for a single Twitch application.
//!
//! [`TokenManager`] owns the pieces every flow needs: the shared transport, the
//! [`TokenCache`] handle, the application credentials, and the three Twitch endpoints. Flow
//! implementations live in submodules:
//!
//! - [`TokenManager::validate_token`] introspects a token at the validation endpoint.
//! - [`TokenManager::refresh_token`] runs the client-credentials grant and persists the result.
//! - [`TokenManager::valid_access_token`] stitches cache, validation, and refresh together and
//!   is the entry point most callers want.
//!
//! Refreshes are single-flight per manager: concurrent callers that find a stale token wait
//! for one grant instead of each issuing their own.

mod access_token;
mod refresh;
mod validate;

pub use refresh::{RefreshCounts, RefreshMetrics};

// self
use crate::{
	_prelude::*,
	auth::{TokenCache, TokenSecret},
	config::{ColdStartPolicy, Credentials, Endpoints, TwitchConfig},
	http::HttpTransport,
	store::KvStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Token manager specialized for the crate's default reqwest transport.
pub type ReqwestTokenManager = TokenManager<ReqwestHttpClient>;

/// Keeps one Twitch app access token valid.
pub struct TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport used for validation and grant requests.
	pub http_client: Arc<T>,
	/// Location of the persisted token.
	pub cache: TokenCache,
	/// Application credentials.
	pub credentials: Credentials,
	/// Validation, token, and streams endpoints.
	pub endpoints: Endpoints,
	/// Behavior when no token has been cached yet.
	pub cold_start: ColdStartPolicy,
	/// Shared counters for grant outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	flow_guard: Arc<AsyncMutex<()>>,
}
impl<T> TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a manager over the caller-provided transport.
	///
	/// The token is cached at the default `ConfigBucket/twitchAccessToken` location; use
	/// [`TokenManager::with_cache`] to move it.
	pub fn with_http_client(
		store: Arc<dyn KvStore>,
		config: TwitchConfig,
		http_client: impl Into<Arc<T>>,
	) -> Self {
		let TwitchConfig { credentials, endpoints, cold_start } = config;

		Self {
			http_client: http_client.into(),
			cache: TokenCache::new(store),
			credentials,
			endpoints,
			cold_start,
			refresh_metrics: Default::default(),
			flow_guard: Default::default(),
		}
	}

	/// Replaces the cache handle.
	pub fn with_cache(mut self, cache: TokenCache) -> Self {
		self.cache = cache;

		self
	}

	/// Overrides the cold-start policy.
	pub fn with_cold_start(mut self, policy: ColdStartPolicy) -> Self {
		self.cold_start = policy;

		self
	}

	/// Reads the cached token. Fails with [`Error::NotFound`] when nothing usable is cached.
	pub async fn read_cached_token(&self) -> Result<TokenSecret> {
		self.cache.read().await
	}

	/// Overwrites the cached token.
	pub async fn persist_token(&self, token: &str) -> Result<()> {
		self.cache.persist(token).await
	}
}
#[cfg(feature = "reqwest")]
impl TokenManager<ReqwestHttpClient> {
	/// Creates a manager with its own reqwest transport.
	pub fn new(store: Arc<dyn KvStore>, config: TwitchConfig) -> Self {
		Self::with_http_client(store, config, ReqwestHttpClient::default())
	}

	/// Like [`TokenManager::new`], but rejects unusable endpoint URLs up front.
	///
	/// Credentials are not checked here so a manager can be built before real credentials are
	/// configured; every network operation checks them instead.
	pub fn from_config(store: Arc<dyn KvStore>, config: TwitchConfig) -> Result<Self> {
		config.endpoints.validate()?;

		Ok(Self::new(store, config))
	}
}
impl<T> Debug for TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("cache", &self.cache)
			.field("credentials", &self.credentials)
			.field("endpoints", &self.endpoints)
			.field("cold_start", &self.cold_start)
			.finish()
	}
}
