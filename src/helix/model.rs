//! Helix `streams` wire types.

// crates.io
use serde::Deserializer;
use time::format_description::well_known::Rfc3339;
// self
use crate::_prelude::*;

/// One live stream as reported by `GET /helix/streams`.
///
/// Missing fields decode to their zero value; unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamRecord {
	/// Stream identifier.
	pub id: String,
	/// Broadcaster user identifier.
	pub user_id: String,
	/// Broadcaster display name.
	pub user_name: String,
	/// Category identifier.
	pub game_id: String,
	/// Stream type; `live` for live streams.
	#[serde(rename = "type")]
	pub kind: String,
	/// Stream title.
	pub title: String,
	/// Current viewer count.
	pub viewer_count: i64,
	/// Start instant as sent by Helix (RFC 3339).
	pub started_at: String,
}
impl StreamRecord {
	/// Parses [`started_at`](Self::started_at).
	pub fn started_at_time(&self) -> Result<OffsetDateTime, time::error::Parse> {
		OffsetDateTime::parse(&self.started_at, &Rfc3339)
	}

	/// Time the stream has been live at `now`, clamped at zero. `None` if `started_at` does not
	/// parse.
	pub fn uptime_at(&self, now: OffsetDateTime) -> Option<Duration> {
		let started = self.started_at_time().ok()?;
		let uptime = now - started;

		Some(if uptime.is_negative() { Duration::ZERO } else { uptime })
	}
}

/// Response envelope of `GET /helix/streams`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamsResponse {
	/// Live streams, in Helix order. A missing or `null` list decodes as empty.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub data: Vec<StreamRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<StreamRecord>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<StreamRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error body used by Helix and by the Twitch identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
	/// Short error name (`Unauthorized`, `Bad Request`), when present.
	#[serde(default)]
	pub error: Option<String>,
	/// HTTP status echoed in the body, when present.
	#[serde(default)]
	pub status: Option<u16>,
	/// Human-readable message.
	pub message: String,
}
impl ErrorBody {
	/// Joins the error name and message into one line.
	pub fn describe(&self) -> String {
		match self.error.as_deref() {
			Some(error) if !error.is_empty() => format!("{error}: {}", self.message),
			_ => self.message.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	fn record(started_at: &str) -> StreamRecord {
		StreamRecord { started_at: started_at.into(), ..Default::default() }
	}

	#[test]
	fn started_at_parses_helix_timestamps() {
		let parsed = record("2021-03-10T15:04:21Z")
			.started_at_time()
			.expect("Helix timestamps should parse as RFC 3339.");

		assert_eq!(parsed, datetime!(2021-03-10 15:04:21 UTC));
		assert!(record("yesterday").started_at_time().is_err());
	}

	#[test]
	fn uptime_is_clamped_and_optional() {
		let live = record("2021-03-10T15:00:00Z");

		assert_eq!(
			live.uptime_at(datetime!(2021-03-10 16:30:00 UTC)),
			Some(Duration::minutes(90))
		);
		assert_eq!(live.uptime_at(datetime!(2021-03-10 14:00:00 UTC)), Some(Duration::ZERO));
		assert_eq!(record("").uptime_at(datetime!(2021-03-10 14:00:00 UTC)), None);
	}

	#[test]
	fn missing_fields_default_and_type_is_renamed() {
		let parsed: StreamRecord =
			serde_json::from_str("{\"user_name\":\"someone\",\"type\":\"live\",\"language\":\"en\"}")
				.expect("Partial records should decode.");

		assert_eq!(parsed.user_name, "someone");
		assert_eq!(parsed.kind, "live");
		assert_eq!(parsed.viewer_count, 0);
	}

	#[test]
	fn null_or_missing_data_is_an_empty_page() {
		for body in ["{\"data\":null}", "{}", "{\"data\":[]}"] {
			let page: StreamsResponse =
				serde_json::from_str(body).expect("Empty pages should decode.");

			assert!(page.data.is_empty(), "{body} should decode to no streams.");
		}
	}

	#[test]
	fn error_body_description() {
		let body: ErrorBody = serde_json::from_str(
			"{\"error\":\"Unauthorized\",\"status\":401,\"message\":\"Invalid OAuth token\"}",
		)
		.expect("Helix error bodies should decode.");

		assert_eq!(body.describe(), "Unauthorized: Invalid OAuth token");

		let body: ErrorBody =
			serde_json::from_str("{\"status\":403,\"message\":\"invalid client secret\"}")
				.expect("Identity error bodies should decode.");

		assert_eq!(body.describe(), "invalid client secret");
	}
}
