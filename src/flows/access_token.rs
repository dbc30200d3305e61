//! Cache, validate, refresh, re-read.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::ColdStartPolicy,
	flows::TokenManager,
	http::HttpTransport,
	obs::{self, FlowKind},
};

impl<T> TokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Returns an access token that passed validation or was just issued.
	///
	/// The cached token is validated once. If validation fails for any reason a single refresh
	/// runs, and the token is then read back from the cache rather than taken from the grant
	/// response. An empty cache fails with [`Error::NotFound`] unless the manager's
	/// [`ColdStartPolicy`] is `Refresh`.
	pub async fn valid_access_token(&self) -> Result<TokenSecret> {
		obs::observe(FlowKind::AccessToken, "valid_access_token", async move {
			self.credentials.validate()?;

			let _singleflight = self.flow_guard.lock().await;
			let needs_refresh = match self.read_cached_token().await {
				Ok(token) => match self.validate_token(&token).await {
					Ok(()) => false,
					Err(e) => {
						obs::token_rejected(&e);

						true
					},
				},
				Err(Error::NotFound { .. }) if self.cold_start == ColdStartPolicy::Refresh => true,
				Err(e) => return Err(e),
			};

			if needs_refresh {
				self.refresh_token().await?;
			}

			self.read_cached_token().await
		})
		.await
	}
}
