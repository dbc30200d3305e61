//! Twitch application credentials, endpoint overrides, and the serde-friendly config bundle.
//!
//! [`TwitchConfig`] is meant to be embedded in an application's own configuration file. The
//! credential fields accept the legacy `TwitchClientID`/`TwitchClientSecret` keys, and every
//! other field falls back to Twitch's production defaults.

// self
use crate::{_prelude::*, error::ConfigError};

/// Client ID shipped in sample configs; treated as "not configured".
pub const PLACEHOLDER_CLIENT_ID: &str = "abcd1234";
/// Client secret shipped in sample configs; treated as "not configured".
pub const PLACEHOLDER_CLIENT_SECRET: &str = "abcd1234";

const TWITCH_VALIDATE_URL: &str = "https://id.twitch.tv/oauth2/validate";
const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const HELIX_STREAMS_URL: &str = "https://api.twitch.tv/helix/streams/";

/// Twitch application credentials used by the client-credentials grant and the Helix
/// `client-id` header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Application client identifier.
	#[serde(alias = "TwitchClientID")]
	pub client_id: String,
	/// Application client secret.
	#[serde(alias = "TwitchClientSecret")]
	pub client_secret: String,
}
impl Credentials {
	/// Creates credentials from the provided identifier and secret.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: client_secret.into() }
	}

	/// Rejects empty or placeholder values. The client ID is checked first.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_id == PLACEHOLDER_CLIENT_ID {
			return Err(ConfigError::PlaceholderClientId);
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}
		if self.client_secret == PLACEHOLDER_CLIENT_SECRET {
			return Err(ConfigError::PlaceholderClientSecret);
		}

		Ok(())
	}
}
impl Default for Credentials {
	fn default() -> Self {
		Self::new(PLACEHOLDER_CLIENT_ID, PLACEHOLDER_CLIENT_SECRET)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish()
	}
}

/// Identity-provider and Helix endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
	/// Token introspection endpoint (`GET`, `Authorization: OAuth <token>`).
	pub validation: Url,
	/// Token endpoint used by the client-credentials grant.
	pub token: Url,
	/// Helix streams endpoint; the `user_login` query is appended per call.
	pub streams: Url,
}
impl Endpoints {
	/// Overrides the introspection endpoint.
	pub fn with_validation(mut self, url: Url) -> Self {
		self.validation = url;

		self
	}

	/// Overrides the token endpoint.
	pub fn with_token(mut self, url: Url) -> Self {
		self.token = url;

		self
	}

	/// Overrides the Helix streams endpoint.
	pub fn with_streams(mut self, url: Url) -> Self {
		self.streams = url;

		self
	}

	/// Ensures every endpoint speaks HTTP(S).
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_scheme("validation", &self.validation)?;
		validate_scheme("token", &self.token)?;
		validate_scheme("streams", &self.streams)?;

		Ok(())
	}
}
impl Default for Endpoints {
	fn default() -> Self {
		Self {
			validation: twitch_url(TWITCH_VALIDATE_URL),
			token: twitch_url(TWITCH_TOKEN_URL),
			streams: twitch_url(HELIX_STREAMS_URL),
		}
	}
}

/// What [`TokenManager::valid_access_token`](crate::flows::TokenManager::valid_access_token)
/// does when nothing has been cached yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColdStartPolicy {
	/// Surface the cache miss as [`Error::NotFound`].
	#[default]
	Fail,
	/// Treat the miss like a rejected token and run the client-credentials grant.
	Refresh,
}

/// Everything a [`TokenManager`](crate::flows::TokenManager) needs besides its store and
/// transport.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitchConfig {
	/// Application credentials.
	#[serde(flatten)]
	pub credentials: Credentials,
	/// Endpoint overrides.
	#[serde(default)]
	pub endpoints: Endpoints,
	/// Cache-miss behaviour.
	#[serde(default)]
	pub cold_start: ColdStartPolicy,
}
impl TwitchConfig {
	/// Creates a config that targets Twitch production endpoints.
	pub fn new(credentials: Credentials) -> Self {
		Self { credentials, endpoints: Endpoints::default(), cold_start: ColdStartPolicy::default() }
	}

	/// Replaces the endpoint set.
	pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Overrides the cache-miss behaviour.
	pub fn with_cold_start(mut self, policy: ColdStartPolicy) -> Self {
		self.cold_start = policy;

		self
	}

	/// Validates endpoints and credentials.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.endpoints.validate()?;
		self.credentials.validate()
	}
}

fn twitch_url(raw: &'static str) -> Url {
	Url::parse(raw).expect("Built-in Twitch endpoint constants must parse.")
}

fn validate_scheme(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}
