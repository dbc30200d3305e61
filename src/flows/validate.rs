//! Token introspection against `GET /oauth2/validate`.

// crates.io
use oauth2::http::{
	Method, Request,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, ValidationError},
	flows::TokenManager,
	http::HttpTransport,
	obs::{self, FlowKind},
};

impl<T> TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Asks Twitch whether `token` is still usable.
	///
	/// Only HTTP 200 counts as valid. The response body is not inspected, so a token that is
	/// about to expire still validates.
	pub async fn validate_token(&self, token: &TokenSecret) -> Result<()> {
		obs::observe(FlowKind::Validate, "validate_token", async move {
			self.credentials.validate()?;

			let request = Request::builder()
				.method(Method::GET)
				.uri(self.endpoints.validation.as_str())
				.header(CONTENT_TYPE, "application/json")
				.header(AUTHORIZATION, format!("OAuth {}", token.expose()))
				.body(Vec::new())
				.map_err(ConfigError::from)?;
			let response = self
				.http_client
				.execute(request)
				.await
				.map_err(|source| ValidationError::Transport { source })?;
			let status = response.status().as_u16();

			if status != 200 {
				return Err(ValidationError::Rejected { status }.into());
			}

			Ok(())
		})
		.await
	}
}
