//! Live-stream lookups against `GET /helix/streams`.
//!
//! [`StreamService::live_streams`] asks a [`PublisherRegistry`] for the channels to watch,
//! obtains an app token from its [`TokenManager`], and returns whatever Helix reports as live.
//! Helix caps a single request at 100 `user_login` parameters and paginates; neither limit is
//! applied here, so callers with large registries see the first page only.

pub mod model;
pub mod query;

pub use model::*;
pub use query::user_login_query;

// crates.io
use oauth2::http::{
	Method, Request,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, DecodeError},
	flows::TokenManager,
	http::{HttpRequest, HttpResponse, HttpTransport},
	obs::{self, FlowKind},
	registry::PublisherRegistry,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Stream service specialized for the crate's default reqwest transport.
pub type ReqwestStreamService = StreamService<ReqwestHttpClient>;

/// Queries Helix for the registry's currently live channels.
pub struct StreamService<T>
where
	T: ?Sized + HttpTransport,
{
	/// Token source; its transport and endpoints are reused for Helix calls.
	pub tokens: Arc<TokenManager<T>>,
	/// Channels to look up.
	pub registry: Arc<dyn PublisherRegistry>,
}
impl<T> StreamService<T>
where
	T: ?Sized + HttpTransport,
{
	/// Binds a token manager to a publisher registry.
	pub fn new(tokens: Arc<TokenManager<T>>, registry: Arc<dyn PublisherRegistry>) -> Self {
		Self { tokens, registry }
	}

	/// Lists live streams for every publisher with a Twitch channel.
	///
	/// Placeholder credentials fail before any request is made. Publishers are looked up by
	/// `name`, not by their channel identifier. A registry without eligible publishers still
	/// issues the request with an empty query.
	pub async fn live_streams(&self) -> Result<Vec<StreamRecord>> {
		obs::observe(FlowKind::LiveStreams, "live_streams", async move {
			self.tokens.credentials.validate()?;

			let token = self.tokens.valid_access_token().await?;
			let publishers = self.registry.publishers().await?;
			let request = self.streams_request(&user_login_query(&publishers), &token)?;
			let response = self.tokens.http_client.execute(request).await?;
			let streams = decode_streams(response)?;

			obs::streams_found(&streams);

			Ok(streams)
		})
		.await
	}

	fn streams_request(&self, query: &str, token: &TokenSecret) -> Result<HttpRequest> {
		let mut url = self.tokens.endpoints.streams.clone();

		url.set_query(Some(query));

		let request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(CONTENT_TYPE, "application/json")
			.header("client-id", self.tokens.credentials.client_id.as_str())
			.header(AUTHORIZATION, format!("Bearer {}", token.expose()))
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
impl<T> Clone for StreamService<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { tokens: self.tokens.clone(), registry: self.registry.clone() }
	}
}
impl<T> Debug for StreamService<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StreamService").field("tokens", &self.tokens).finish()
	}
}

fn decode_streams(response: HttpResponse) -> Result<Vec<StreamRecord>> {
	let status = response.status();

	if !status.is_success() {
		let message = serde_json::from_slice::<ErrorBody>(response.body())
			.map(|body| body.describe())
			.unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown status").to_owned());

		return Err(Error::Api { status: status.as_u16(), message });
	}

	let de = &mut serde_json::Deserializer::from_slice(response.body());
	let page: StreamsResponse = serde_path_to_error::deserialize(de)
		.map_err(|source| DecodeError::Json { source, status: status.as_u16() })?;

	Ok(page.data)
}
