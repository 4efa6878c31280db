//! Demonstrates resolving the session's user against a mock account service and provisioning a
//! token for it with the default reqwest transport and an in-memory user cache.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use newapi_identity::{
	auth::{TokenConfig, UserId},
	client::IdentityClient,
	service::ServiceDescriptor,
	store::{KeyValueStore, MemoryStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let identity_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/user/self").header("cookie", "session=demo");
			then.status(200).json_body(json!({
				"success": true,
				"data": {"id": 42, "username": "demo", "group": "default"}
			}));
		})
		.await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token/").header("new-api-user", "42");
			then.status(200).json_body(json!({
				"success": true,
				"message": "",
				"data": {"key": "sk-demo", "id": 1, "name": "demo-key", "group": "default"}
			}));
		})
		.await;
	let descriptor = ServiceDescriptor::builder(Url::parse(&server.base_url())?)
		.allow_insecure_http(true)
		.build()?;
	let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
	let client = IdentityClient::with_session_cookie(store, descriptor, "session=demo")?;
	let user_id = client.resolve_user_id().await;

	println!("Resolved user id: {}.", UserId::raw_or_sentinel(user_id));

	let response = client.create_token(&TokenConfig::new("demo-key", "default")?).await?;
	let token = response
		.token()
		.ok_or_else(|| eyre!("Service rejected the token: {}.", response.message))?;

	println!(
		"Provisioned token `{}` in group `{}`: {}.",
		token.name,
		token.group,
		token.key.expose()
	);

	identity_mock.assert_async().await;
	token_mock.assert_async().await;

	Ok(())
}
