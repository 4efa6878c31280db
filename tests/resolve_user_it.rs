mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use newapi_identity::{
	auth::UserId,
	store::{KeyValueStore, MemoryStore},
};

#[tokio::test]
async fn cached_id_skips_the_network() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self");
			then.status(200).json_body(json!({"success": true, "data": {"id": 99, "username": "x"}}));
		})
		.await;
	let client = reqwest_client(&server.base_url(), store_with_user(42));
	let resolved = client.resolve_user_id().await;

	assert_eq!(resolved.map(UserId::get), Some(42));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn cache_miss_fetches_and_writes_through() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self").header("cookie", SESSION_COOKIE);
			then.status(200).json_body(json!({
				"success": true,
				"message": "",
				"data": {
					"id": 42,
					"username": "kun",
					"display_name": "Kun",
					"role": 1,
					"status": 1,
					"group": "default",
					"quota": 1000
				}
			}));
		})
		.await;
	let store = Arc::new(MemoryStore::default());
	let client = reqwest_client(&server.base_url(), store.clone());

	assert_eq!(client.resolve_user_id().await.map(UserId::get), Some(42));

	mock.assert_async().await;

	let cached = store
		.get("user")
		.await
		.expect("Memory store reads should succeed.")
		.expect("Fetched user should be written to the store.");
	let cached: serde_json::Value =
		serde_json::from_str(&cached).expect("Cached user should be valid JSON.");

	assert_eq!(cached["id"], 42);
	assert_eq!(cached["username"], "kun");
	assert_eq!(cached["quota"], 1000);

	let user = client.cached_user().await.expect("Cached user should parse back.");

	assert_eq!(user.display_name.as_deref(), Some("Kun"));
}

#[tokio::test]
async fn repeated_resolution_fetches_once() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self");
			then.status(200).json_body(json!({"success": true, "data": {"id": 8, "username": "a"}}));
		})
		.await;
	let client = reqwest_client(&server.base_url(), Arc::new(MemoryStore::default()));
	let first = client.resolve_user_id().await;
	let second = client.resolve_user_id().await;

	assert_eq!(first, second);
	assert_eq!(first.map(UserId::get), Some(8));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn rejected_identity_yields_none_and_keeps_cache_empty() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self");
			then.status(200).json_body(json!({"success": false, "message": "not logged in"}));
		})
		.await;
	let store = Arc::new(MemoryStore::default());
	let client = reqwest_client(&server.base_url(), store.clone());
	let resolved = client.resolve_user_id().await;

	assert_eq!(resolved, None);
	assert_eq!(UserId::raw_or_sentinel(resolved), -1);
	assert!(store.is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_yield_none() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self");
			then.status(401).json_body(json!({"success": false, "message": "unauthorized"}));
		})
		.await;
	let client = reqwest_client(&server.base_url(), Arc::new(MemoryStore::default()));

	assert_eq!(client.resolve_user_id().await, None);

	mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_service_yields_none() {
	let client = reqwest_client("http://127.0.0.1:1", Arc::new(MemoryStore::default()));

	assert_eq!(client.resolve_user_id().await, None);
}

#[tokio::test]
async fn unusable_cache_entries_fall_back_to_the_network() {
	for entry in ["not json", r#"{"id":-1,"username":"ghost"}"#, r#"{"username":"no-id"}"#] {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(GET).path("/api/user/self");
				then.status(200)
					.json_body(json!({"success": true, "data": {"id": 5, "username": "fresh"}}));
			})
			.await;
		let store = Arc::new(MemoryStore::with_entries([("user", entry)]));
		let client = reqwest_client(&server.base_url(), store.clone());

		assert_eq!(client.resolve_user_id().await.map(UserId::get), Some(5), "entry: {entry}");

		mock.assert_async().await;

		let cached =
			store.get("user").await.expect("Memory store reads should succeed.").unwrap_or_default();

		assert!(cached.contains("\"fresh\""), "Cache should be overwritten, got {cached}.");
	}
}

#[tokio::test]
async fn refresh_cached_user_overwrites_stale_snapshot() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self").header("new-api-user", "42");
			then.status(200).json_body(json!({
				"success": true,
				"data": {"id": 42, "username": "renamed", "group": "vip"}
			}));
		})
		.await;
	let store = store_with_user(42);
	let client = reqwest_client(&server.base_url(), store.clone());
	let refreshed = client
		.refresh_cached_user()
		.await
		.expect("Refreshing the cached user should succeed.")
		.expect("Service should return the current user.");

	assert_eq!(refreshed.username, "renamed");
	assert_eq!(
		client.cached_user().await.and_then(|user| user.group),
		Some("vip".to_owned())
	);

	mock.assert_async().await;
}
