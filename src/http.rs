//! Transport primitives shared by token introspection, the client-credentials grant, and Helix.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. Plain calls (validate,
//! streams) go through [`HttpTransport::execute`] directly; the `oauth2` grant reaches the same
//! transport through [`GrantHttpClient`], an [`AsyncHttpClient`] adapter, so a single fake is
//! enough to observe every outbound request in tests.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
pub use oauth2::{HttpRequest, HttpResponse};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Executes fully-built HTTP requests.
///
/// Implementations must be `Send + Sync + 'static` so managers can share them behind `Arc`
/// across tasks. A non-2xx status is a successful transport outcome; only failures to reach the
/// server or read the body map to [`TransportError`].
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the buffered response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Adapter handing an [`HttpTransport`] to the `oauth2` crate.
pub struct GrantHttpClient<T>(Arc<T>)
where
	T: ?Sized + HttpTransport;
impl<T> GrantHttpClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Wraps a shared transport.
	pub fn new(transport: Arc<T>) -> Self {
		Self(transport)
	}
}
impl<'c, T> AsyncHttpClient<'c> for GrantHttpClient<T>
where
	T: ?Sized + HttpTransport,
{
	type Error = HttpClientError<TransportError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let response = self.0.execute(request);

		Box::pin(async move { response.await.map_err(|e| HttpClientError::Reqwest(Box::new(e))) })
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Redirects are followed with reqwest's default policy; neither Twitch endpoint redirects in
/// practice.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn send(
		client: ReqwestClient,
		request: HttpRequest,
	) -> Result<HttpResponse, ReqwestError> {
		let response = client.execute(request.try_into()?).await?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

		*response_new.status_mut() = status;
		*response_new.headers_mut() = headers;

		Ok(response_new)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();
		let endpoint = endpoint_label(&request);

		Box::pin(async move {
			Self::send(client, request).await.map_err(|e| TransportError::network(endpoint, e))
		})
	}
}

/// Short label for the endpoint a request targets, used in transport errors.
#[cfg(feature = "reqwest")]
fn endpoint_label(request: &HttpRequest) -> &'static str {
	let path = request.uri().path();

	if path.ends_with("/validate") {
		"validate"
	} else if path.ends_with("/token") {
		"token"
	} else if path.contains("/streams") {
		"streams"
	} else {
		"http"
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	fn get(uri: &str) -> HttpRequest {
		oauth2::http::Request::builder()
			.uri(uri)
			.body(Vec::new())
			.expect("Fixture request should build.")
	}

	#[test]
	fn endpoint_labels_follow_twitch_paths() {
		assert_eq!(endpoint_label(&get("https://id.twitch.tv/oauth2/validate")), "validate");
		assert_eq!(endpoint_label(&get("https://id.twitch.tv/oauth2/token")), "token");
		assert_eq!(
			endpoint_label(&get("https://api.twitch.tv/helix/streams/?user_login=a")),
			"streams"
		);
		assert_eq!(endpoint_label(&get("https://example.com/other")), "http");
	}

	#[tokio::test]
	async fn unreachable_host_maps_to_network_error() {
		let client = ReqwestHttpClient::default();
		let err = client
			.execute(get("http://127.0.0.1:1/oauth2/validate"))
			.await
			.expect_err("Nothing should listen on port 1.");

		assert!(matches!(err, TransportError::Network { endpoint: "validate", .. }));
	}
}
