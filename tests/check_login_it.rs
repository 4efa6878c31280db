mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use newapi_identity::store::MemoryStore;

#[tokio::test]
async fn live_session_reports_logged_in() {
	let server = MockServer::start_async().await;
	let probe = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/user/self")
				.header("new-api-user", "42")
				.header("cookie", SESSION_COOKIE)
				.header("cache-control", "no-store");
			then.status(200).json_body(json!({"success": true, "data": {"id": 42, "username": "u"}}));
		})
		.await;
	let client = reqwest_client(&server.base_url(), store_with_user(42));

	assert!(client.check_login_status().await);

	probe.assert_async().await;
}

#[tokio::test]
async fn unresolved_identity_reports_logged_out_without_probe() {
	let server = MockServer::start_async().await;
	let lookup = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self");
			then.status(401).json_body(json!({"success": false, "message": "login required"}));
		})
		.await;
	let client = reqwest_client(&server.base_url(), Arc::new(MemoryStore::default()));

	assert!(!client.check_login_status().await);

	// Only the resolution lookup; no act-as-user probe follows.
	lookup.assert_calls_async(1).await;
}

#[tokio::test]
async fn failing_probe_reports_logged_out() {
	let server = MockServer::start_async().await;
	let probe = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self").header("new-api-user", "42");
			then.status(500).body("upstream exploded");
		})
		.await;
	let client = reqwest_client(&server.base_url(), store_with_user(42));

	assert!(!client.check_login_status().await);

	probe.assert_async().await;
}

#[tokio::test]
async fn expired_session_reports_logged_out() {
	let server = MockServer::start_async().await;
	let probe = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self").header("new-api-user", "42");
			then.status(200).json_body(json!({"success": false, "message": "session expired"}));
		})
		.await;
	let store = store_with_user(42);
	let client = reqwest_client(&server.base_url(), store.clone());

	assert!(!client.check_login_status().await);
	// The stale snapshot stays; only the probe result changes.
	assert_eq!(client.cached_user().await.map(|user| user.id), Some(42));

	probe.assert_async().await;
}

#[tokio::test]
async fn unreachable_service_reports_logged_out() {
	let client = reqwest_client("http://127.0.0.1:1", store_with_user(42));

	assert!(!client.check_login_status().await);
}
