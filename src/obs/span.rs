// self
use crate::{_prelude::*, helix::StreamRecord, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by token and stream flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("twitch_live.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Notes a freshly issued access token. The secret itself is never logged.
pub(crate) fn token_refreshed() {
	#[cfg(feature = "tracing")]
	tracing::debug!("refreshed twitch access token");
}

/// Notes a cached token that failed introspection.
pub(crate) fn token_rejected(error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::debug!(%error, "cached twitch access token failed validation");
	#[cfg(not(feature = "tracing"))]
	let _ = error;
}

/// Reports the outcome of a live-stream lookup.
pub(crate) fn streams_found(streams: &[StreamRecord]) {
	#[cfg(feature = "tracing")]
	{
		if streams.is_empty() {
			tracing::debug!("no twitch streams currently live");
		}

		for stream in streams {
			tracing::debug!(channel = %stream.user_name, "live now");
		}
	}
	#[cfg(not(feature = "tracing"))]
	let _ = streams;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Refresh, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn event_helpers_accept_empty_input() {
		token_refreshed();
		streams_found(&[]);
	}
}
