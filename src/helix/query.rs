//! Helix `user_login` query construction.

// self
use crate::registry::Publisher;

/// Builds the `user_login=<name>&user_login=<name>...` query for publishers that carry a Twitch
/// channel. Names are neither deduplicated nor capped.
pub fn user_login_query(publishers: &[Publisher]) -> String {
	publishers
		.iter()
		.filter(|publisher| publisher.twitch_stream().is_some())
		.map(|publisher| format!("user_login={}", publisher.name))
		.collect::<Vec<_>>()
		.join("&")
}
