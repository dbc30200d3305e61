// crates.io
use httpmock::prelude::*;
// self
use twitch_live::{
	_preludet::*,
	auth::{DEFAULT_BUCKET, DEFAULT_KEY, TokenSecret},
	config::{ColdStartPolicy, Credentials, TwitchConfig},
	error::{ConfigError, ValidationError},
	flows::{RefreshCounts, TokenManager},
	store::{KvStore, MemoryStore},
};

const CLIENT_ID: &str = "twitch-client";
const CLIENT_SECRET: &str = "twitch-secret";
const TOKEN_BODY: &str =
	"{\"access_token\":\"fresh-token\",\"expires_in\":5011271,\"token_type\":\"bearer\"}";

async fn seed(store: &MemoryStore, token: &str) {
	store
		.update(DEFAULT_BUCKET, DEFAULT_KEY.as_bytes(), token.as_bytes().to_vec())
		.await
		.expect("Seeding the token cache should succeed.");
}

async fn cached(store: &MemoryStore) -> Option<Vec<u8>> {
	store
		.view(DEFAULT_BUCKET, DEFAULT_KEY.as_bytes())
		.await
		.expect("Reading the token cache should succeed.")
}

#[tokio::test]
async fn valid_cached_token_skips_grant() {
	let server = MockServer::start_async().await;
	let (manager, store) =
		build_reqwest_test_manager(test_endpoints(&server.url("")), CLIENT_ID, CLIENT_SECRET);

	seed(&store, "cached-token").await;

	let validate = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/oauth2/validate")
				.header("authorization", "OAuth cached-token")
				.header("content-type", "application/json");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let token = manager.valid_access_token().await.expect("A valid cached token should be reused.");

	assert_eq!(token.expose(), "cached-token");

	validate.assert_async().await;
	grant.assert_calls_async(0).await;

	assert_eq!(manager.refresh_metrics.snapshot(), RefreshCounts::default());
}

#[tokio::test]
async fn rejected_token_is_refreshed_and_read_back() {
	let server = MockServer::start_async().await;
	let (manager, store) =
		build_reqwest_test_manager(test_endpoints(&server.url("")), CLIENT_ID, CLIENT_SECRET);

	seed(&store, "stale-token").await;

	let validate = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/validate");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"status\":401,\"message\":\"invalid access token\"}");
		})
		.await;
	let grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let token = manager.valid_access_token().await.expect("A rejected token should be replaced.");

	assert_eq!(token.expose(), "fresh-token");
	assert_eq!(cached(&store).await, Some(b"fresh-token".to_vec()));

	validate.assert_calls_async(1).await;
	grant.assert_calls_async(1).await;

	assert_eq!(
		manager.refresh_metrics.snapshot(),
		RefreshCounts { attempts: 1, successes: 1, failures: 0 }
	);
}

#[tokio::test]
async fn grant_rejection_leaves_cache_untouched() {
	let server = MockServer::start_async().await;
	let (manager, store) =
		build_reqwest_test_manager(test_endpoints(&server.url("")), CLIENT_ID, CLIENT_SECRET);

	seed(&store, "stale-token").await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/validate");
			then.status(401);
		})
		.await;

	let grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"status\":403,\"message\":\"invalid client secret\"}");
		})
		.await;
	let err = manager.valid_access_token().await.expect_err("A rejected grant must surface.");

	match err {
		Error::Grant { reason } => assert!(reason.contains("invalid client secret")),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	grant.assert_calls_async(1).await;

	assert_eq!(cached(&store).await, Some(b"stale-token".to_vec()));
	assert_eq!(manager.refresh_metrics.failures(), 1);
}

#[tokio::test]
async fn empty_cache_fails_without_network_by_default() {
	let server = MockServer::start_async().await;
	let (manager, store) =
		build_reqwest_test_manager(test_endpoints(&server.url("")), CLIENT_ID, CLIENT_SECRET);
	let validate = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/validate");
			then.status(200);
		})
		.await;
	let grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let err = manager.valid_access_token().await.expect_err("A cold cache must fail by default.");

	assert!(matches!(err, Error::NotFound { .. }));

	validate.assert_calls_async(0).await;
	grant.assert_calls_async(0).await;

	assert!(store.is_empty());
}

#[tokio::test]
async fn empty_cache_refreshes_when_configured() {
	let server = MockServer::start_async().await;
	let store = Arc::new(MemoryStore::default());
	let config = TwitchConfig::new(Credentials::new(CLIENT_ID, CLIENT_SECRET))
		.with_endpoints(test_endpoints(&server.url("")))
		.with_cold_start(ColdStartPolicy::Refresh);
	let manager: ReqwestTestManager =
		TokenManager::with_http_client(store.clone(), config, test_reqwest_http_client());
	let validate = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/validate");
			then.status(200);
		})
		.await;
	let grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let token = manager.valid_access_token().await.expect("Cold start should run the grant.");

	assert_eq!(token.expose(), "fresh-token");

	validate.assert_calls_async(0).await;
	grant.assert_calls_async(1).await;
}

#[tokio::test]
async fn concurrent_callers_share_one_refresh() {
	let server = MockServer::start_async().await;
	let (manager, store) =
		build_reqwest_test_manager(test_endpoints(&server.url("")), CLIENT_ID, CLIENT_SECRET);

	seed(&store, "stale-token").await;

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/validate").header("authorization", "OAuth stale-token");
			then.status(401);
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/validate").header("authorization", "OAuth fresh-token");
			then.status(200);
		})
		.await;
	let grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.delay(std::time::Duration::from_millis(50))
				.body(TOKEN_BODY);
		})
		.await;
	let (first, second, third) = tokio::join!(
		manager.valid_access_token(),
		manager.valid_access_token(),
		manager.valid_access_token()
	);

	for token in [first, second, third] {
		let token = token.expect("Every concurrent caller should receive a token.");

		assert_eq!(token.expose(), "fresh-token");
	}

	stale.assert_calls_async(1).await;
	fresh.assert_calls_async(2).await;
	grant.assert_calls_async(1).await;
}

#[tokio::test]
async fn placeholder_credentials_short_circuit() {
	let server = MockServer::start_async().await;
	let (manager, store) =
		build_reqwest_test_manager(test_endpoints(&server.url("")), "abcd1234", "abcd1234");

	seed(&store, "cached-token").await;

	let validate = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/validate");
			then.status(200);
		})
		.await;
	let grant = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;

	assert!(matches!(
		manager.valid_access_token().await,
		Err(Error::Config(ConfigError::PlaceholderClientId))
	));
	assert!(matches!(
		manager.refresh_token().await,
		Err(Error::Config(ConfigError::PlaceholderClientId))
	));

	validate.assert_calls_async(0).await;
	grant.assert_calls_async(0).await;

	assert_eq!(manager.refresh_metrics.failures(), 1);
	assert_eq!(cached(&store).await, Some(b"cached-token".to_vec()));
}

#[tokio::test]
async fn unreachable_validation_endpoint_is_a_validation_failure() {
	let endpoints = test_endpoints("http://127.0.0.1:1");
	let (manager, _store) = build_reqwest_test_manager(endpoints, CLIENT_ID, CLIENT_SECRET);
	let err = manager
		.validate_token(&TokenSecret::new("any"))
		.await
		.expect_err("Nothing should listen on port 1.");

	assert!(matches!(err, Error::Validation(ValidationError::Transport { .. })));
}
