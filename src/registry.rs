//! Publisher registry contract: the application's list of channels to watch.

// self
use crate::_prelude::*;

/// Boxed future returned by [`PublisherRegistry::publishers`].
pub type RegistryFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Vec<Publisher>, RegistryError>> + 'a + Send>>;

/// Source of the channels a [`StreamService`](crate::helix::StreamService) queries.
pub trait PublisherRegistry
where
	Self: Send + Sync,
{
	/// Lists every known publisher, in registry order.
	fn publishers(&self) -> RegistryFuture<'_>;
}

/// Failure raised by a [`PublisherRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RegistryError {
	/// The backing registry could not be read.
	#[error("Publisher registry is unavailable: {message}.")]
	Unavailable {
		/// Human-readable error payload.
		message: String,
	},
}

/// A publisher known to the application.
///
/// Only publishers with a non-empty `twitch_stream` take part in live lookups, but the lookup
/// key is `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
	/// Display name; used as the Helix `user_login`.
	#[serde(alias = "Name")]
	pub name: String,
	/// Twitch channel identifier; an absent or empty value opts the publisher out.
	#[serde(default, alias = "TwitchStream")]
	pub twitch_stream: Option<String>,
}
impl Publisher {
	/// Creates a publisher without a Twitch channel.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), twitch_stream: None }
	}

	/// Attaches a Twitch channel identifier.
	pub fn with_twitch_stream(mut self, channel: impl Into<String>) -> Self {
		self.twitch_stream = Some(channel.into());

		self
	}

	/// Returns the Twitch channel identifier when it is set and non-empty.
	pub fn twitch_stream(&self) -> Option<&str> {
		self.twitch_stream.as_deref().filter(|channel| !channel.is_empty())
	}
}

/// Registry serving a list that can be swapped at runtime.
#[derive(Clone, Debug, Default)]
pub struct StaticRegistry(Arc<RwLock<Vec<Publisher>>>);
impl StaticRegistry {
	/// Creates a registry over the provided publishers.
	pub fn new(publishers: impl IntoIterator<Item = Publisher>) -> Self {
		Self(Arc::new(RwLock::new(publishers.into_iter().collect())))
	}

	/// Replaces the served list.
	pub fn replace(&self, publishers: impl IntoIterator<Item = Publisher>) {
		*self.0.write() = publishers.into_iter().collect();
	}
}
impl PublisherRegistry for StaticRegistry {
	fn publishers(&self) -> RegistryFuture<'_> {
		let publishers = self.0.read().clone();

		Box::pin(async move { Ok(publishers) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_channel_reads_as_absent() {
		assert_eq!(Publisher::new("a").twitch_stream(), None);
		assert_eq!(Publisher::new("a").with_twitch_stream("").twitch_stream(), None);
		assert_eq!(Publisher::new("a").with_twitch_stream("chan").twitch_stream(), Some("chan"));
	}

	#[test]
	fn legacy_field_names_deserialize() {
		let publisher: Publisher =
			serde_json::from_str("{\"Name\":\"Shroud\",\"TwitchStream\":\"shroud\"}")
				.expect("Legacy publisher keys should deserialize.");

		assert_eq!(publisher, Publisher::new("Shroud").with_twitch_stream("shroud"));
	}

	#[tokio::test]
	async fn static_registry_serves_replacements() {
		let registry = StaticRegistry::new([Publisher::new("first")]);

		registry.replace([Publisher::new("second"), Publisher::new("third")]);

		let names: Vec<String> = registry
			.publishers()
			.await
			.expect("Static registry never fails.")
			.into_iter()
			.map(|publisher| publisher.name)
			.collect();

		assert_eq!(names, ["second", "third"]);
	}
}
