//! Prints which of the channels given on the command line are live.
//!
//! ```sh
//! TWITCH_CLIENT_ID=... TWITCH_CLIENT_SECRET=... cargo run --example live_now -- shroud xqc
//! ```

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use time::OffsetDateTime;
// self
use twitch_live::{
	config::{ColdStartPolicy, Credentials, TwitchConfig},
	flows::TokenManager,
	helix::StreamService,
	registry::{Publisher, StaticRegistry},
	store::FileStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials =
		Credentials::new(env::var("TWITCH_CLIENT_ID")?, env::var("TWITCH_CLIENT_SECRET")?);
	let config = TwitchConfig::new(credentials).with_cold_start(ColdStartPolicy::Refresh);
	let store = Arc::new(FileStore::open(env::temp_dir().join("twitch-live-demo.json"))?);
	let tokens = Arc::new(TokenManager::from_config(store, config)?);
	let registry = Arc::new(StaticRegistry::new(
		env::args()
			.skip(1)
			.map(|channel| Publisher::new(channel.clone()).with_twitch_stream(channel)),
	));
	let streams = StreamService::new(tokens, registry).live_streams().await?;
	let now = OffsetDateTime::now_utc();

	if streams.is_empty() {
		println!("Nobody is live.");
	}

	for stream in streams {
		let uptime = stream.uptime_at(now).map(|d| d.whole_minutes()).unwrap_or_default();

		println!(
			"{} is live for {uptime}m with {} viewers: {}",
			stream.user_name, stream.viewer_count, stream.title
		);
	}

	Ok(())
}
