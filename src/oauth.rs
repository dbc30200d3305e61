//! Client-credentials grant against the Twitch identity provider.
//!
//! Twitch answers a rejected grant with its own `{"status":..,"message":..}` body instead of an
//! RFC 6749 error object, so unparsable error bodies are inspected for that shape before they are
//! reported as malformed JSON.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::Credentials,
	error::{ConfigError, DecodeError, TransportError},
	helix::ErrorBody,
	http::{GrantHttpClient, HttpTransport},
};

type GrantClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// One-shot client-credentials exchange bound to a transport.
pub(crate) struct ClientCredentialsGrant<T>
where
	T: ?Sized + HttpTransport,
{
	oauth_client: GrantClient,
	http_client: GrantHttpClient<T>,
}
impl<T> ClientCredentialsGrant<T>
where
	T: ?Sized + HttpTransport,
{
	/// Configures the grant with credentials sent in the request body, as Twitch requires.
	pub(crate) fn new(
		credentials: &Credentials,
		token_endpoint: &Url,
		transport: Arc<T>,
	) -> Result<Self> {
		let token_url = TokenUrl::new(token_endpoint.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
			.set_client_secret(ClientSecret::new(credentials.client_secret.clone()))
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client: GrantHttpClient::new(transport) })
	}

	/// Runs the grant and returns the issued access token.
	pub(crate) async fn exchange(&self) -> Result<TokenSecret> {
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.request_async(&self.http_client)
			.await
			.map_err(map_request_error)?;

		Ok(TokenSecret::new(response.access_token().secret().to_owned()))
	}
}

fn map_request_error(err: BasicRequestTokenError<HttpClientError<TransportError>>) -> Error {
	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response),
		RequestTokenError::Request(error) => map_transport_error(error),
		RequestTokenError::Parse(source, body) => match serde_json::from_slice::<ErrorBody>(&body) {
			Ok(rejection) => Error::Grant { reason: rejection.describe() },
			Err(_) => DecodeError::TokenResponse { source }.into(),
		},
		RequestTokenError::Other(message) => Error::Grant { reason: message },
	}
}

fn map_server_response_error(response: BasicErrorResponse) -> Error {
	let reason = match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_string(),
	};

	Error::Grant { reason }
}

fn map_transport_error(err: HttpClientError<TransportError>) -> Error {
	match err {
		HttpClientError::Reqwest(inner) => (*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other(message).into(),
		_ => TransportError::Other("unrecognized HTTP client failure".into()).into(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn twitch_rejection_body_becomes_grant_error() {
		let de = &mut serde_json::Deserializer::from_str("{\"status\":403}");
		let source = serde_path_to_error::deserialize::<_, oauth2::basic::BasicTokenResponse>(de)
			.expect_err("A rejection body is not a token response.");
		let err = map_request_error(RequestTokenError::Parse(
			source,
			b"{\"status\":403,\"message\":\"invalid client secret\"}".to_vec(),
		));

		match err {
			Error::Grant { reason } => assert!(reason.contains("invalid client secret")),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn unknown_body_stays_a_decode_error() {
		let de = &mut serde_json::Deserializer::from_str("[]");
		let source = serde_path_to_error::deserialize::<_, oauth2::basic::BasicTokenResponse>(de)
			.expect_err("An array is not a token response.");
		let err = map_request_error(RequestTokenError::Parse(source, b"[]".to_vec()));

		assert!(matches!(err, Error::Decode(DecodeError::TokenResponse { .. })));
	}

	#[test]
	fn transport_failures_keep_their_type() {
		let err = map_transport_error(HttpClientError::Reqwest(Box::new(TransportError::Other(
			"connection refused".into(),
		))));

		assert!(matches!(err, Error::Transport(TransportError::Other(_))));
	}
}
