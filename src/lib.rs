//! Twitch Helix live-stream lookups backed by a cached, self-validating app access token.
//!
//! [`flows::TokenManager`] keeps one client-credentials token in a [`store::KvStore`],
//! introspects it before use, and re-issues it when Twitch rejects it.
//! [`helix::StreamService`] combines that token with a [`registry::PublisherRegistry`] to ask
//! Helix which publishers are live right now.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod helix;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod registry;
pub mod store;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{Credentials, Endpoints, TwitchConfig},
		flows::TokenManager,
		http::ReqwestHttpClient,
		store::{KvStore, MemoryStore},
	};

	/// Token manager type alias used by reqwest-backed integration tests.
	pub type ReqwestTestManager = TokenManager<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client with a short timeout so a missing mock fails fast.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.timeout(std::time::Duration::from_secs(10))
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Points all three endpoints at a mock server, mirroring Twitch's paths.
	///
	/// `base` is the server origin without a trailing slash, e.g. `http://127.0.0.1:4000`.
	pub fn test_endpoints(base: &str) -> Endpoints {
		let parse = |path: &str| {
			Url::parse(&format!("{base}{path}")).expect("Mock endpoint URL should parse.")
		};

		Endpoints::default()
			.with_validation(parse("/oauth2/validate"))
			.with_token(parse("/oauth2/token"))
			.with_streams(parse("/helix/streams/"))
	}

	/// Constructs a [`TokenManager`] backed by an in-memory store and the reqwest transport
	/// used across integration tests.
	pub fn build_reqwest_test_manager(
		endpoints: Endpoints,
		client_id: &str,
		client_secret: &str,
	) -> (Arc<ReqwestTestManager>, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn KvStore> = store_backend.clone();
		let config =
			TwitchConfig::new(Credentials::new(client_id, client_secret)).with_endpoints(endpoints);
		let manager: ReqwestTestManager =
			TokenManager::with_http_client(store, config, test_reqwest_http_client());

		(Arc::new(manager), store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
