//! Client-credentials refresh.
//!
//! Twitch app tokens carry no refresh token; "refreshing" means running a new
//! `grant_type=client_credentials` exchange and overwriting the cached value. The grant sends
//! both credentials in the form body.

mod metrics;

pub use metrics::{RefreshCounts, RefreshMetrics};

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	flows::TokenManager,
	http::HttpTransport,
	oauth::ClientCredentialsGrant,
	obs::{self, FlowKind},
};

impl<T> TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Obtains a new app access token and persists it to the cache.
	///
	/// Nothing is persisted unless the grant returned a non-empty token.
	pub async fn refresh_token(&self) -> Result<TokenSecret> {
		obs::observe(FlowKind::Refresh, "refresh_token", async move {
			let result = self.exchange_and_persist().await;

			self.refresh_metrics.record(result.is_ok());

			if result.is_ok() {
				obs::token_refreshed();
			}

			result
		})
		.await
	}

	async fn exchange_and_persist(&self) -> Result<TokenSecret> {
		self.credentials.validate()?;

		let grant = ClientCredentialsGrant::new(
			&self.credentials,
			&self.endpoints.token,
			self.http_client.clone(),
		)?;
		let token = grant.exchange().await?;

		self.persist_token(token.expose()).await?;

		Ok(token)
	}
}
