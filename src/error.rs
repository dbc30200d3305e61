//! Crate-level error types shared across the token flows, the Helix client, and the stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token introspection failed or rejected the token.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Publisher registry could not list channels.
	#[error(transparent)]
	Registry(#[from] crate::registry::RegistryError),

	/// No access token is cached.
	#[error("Cached access token not found under `{bucket}/{key}`.")]
	NotFound {
		/// Bucket that was searched.
		bucket: String,
		/// Key that was searched.
		key: String,
	},
	/// Caller supplied an unusable argument.
	#[error("Invalid argument: {reason}.")]
	InvalidArgument {
		/// Human-readable reason string.
		reason: String,
	},
	/// Token endpoint rejected the client-credentials grant.
	#[error("Token endpoint rejected the grant: {reason}.")]
	Grant {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Helix answered with a non-success status.
	#[error("Helix returned HTTP {status}: {message}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Helix error message, or the status reason when the body carried none.
		message: String,
	},
}

/// Configuration failures; raised before any network call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client ID still holds the placeholder value.
	#[error("Default twitch client id value detected. Skipping twitch call.")]
	PlaceholderClientId,
	/// Client secret still holds the placeholder value.
	#[error("Default twitch client secret value detected. Skipping twitch call.")]
	PlaceholderClientSecret,
	/// Client ID is empty.
	#[error("Twitch client id is empty.")]
	MissingClientId,
	/// Client secret is empty.
	#[error("Twitch client secret is empty.")]
	MissingClientSecret,
	/// Endpoint uses a scheme other than http/https.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoint URL could not be handed to the OAuth client.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed parsing.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
/// Reasons a cached token failed introspection. Every variant triggers a refresh.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// The validate endpoint answered with something other than 200.
	#[error("Token validation response status code is {status}, expected 200.")]
	Rejected {
		/// HTTP status code returned by the validate endpoint.
		status: u16,
	},
	/// The validate endpoint could not be reached.
	#[error("Token validation request failed.")]
	Transport {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint label (`validate`, `token`, `streams`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during an HTTP call.")]
	Io(#[from] std::io::Error),
	/// HTTP client reported a failure without a typed cause.
	#[error("HTTP client error: {0}.")]
	Other(String),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

/// Response bodies that could not be decoded.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Helix returned malformed JSON.
	#[error("Helix returned malformed JSON at `{}`.", .source.path())]
	Json {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token endpoint responded with a body the OAuth client could not parse.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
