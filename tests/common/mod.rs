//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, error::Error as StdError, fmt, sync::Arc};
// crates.io
use parking_lot::Mutex;
// self
use newapi_identity::{
	client::{IdentityClient, ReqwestIdentityClient},
	http::{ApiRequest, ApiResponse, ApiTransport, ReqwestHttpClient, TransportFuture},
	reqwest::cookie::Jar,
	service::ServiceDescriptor,
	store::{KeyValueStore, MemoryStore},
	url::Url,
};

pub const SESSION_COOKIE: &str = "session=mock-session";

pub fn descriptor(base_url: &str) -> ServiceDescriptor {
	let base = Url::parse(base_url).expect("Failed to parse mock service base URL.");

	ServiceDescriptor::builder(base)
		.allow_insecure_http(true)
		.build()
		.expect("Mock service descriptor should build.")
}

pub fn cached_user_json(id: i64) -> String {
	format!(r#"{{"id":{id},"username":"user-{id}","group":"default"}}"#)
}

pub fn store_with_user(id: i64) -> Arc<MemoryStore> {
	Arc::new(MemoryStore::with_entries([("user", cached_user_json(id))]))
}

/// Builds a reqwest-backed client whose cookie jar already holds [`SESSION_COOKIE`].
pub fn reqwest_client(base_url: &str, store: Arc<MemoryStore>) -> ReqwestIdentityClient {
	let descriptor = descriptor(base_url);
	let jar = Arc::new(Jar::default());

	jar.add_cookie_str(SESSION_COOKIE, &descriptor.base_url);

	let http = ReqwestHttpClient::builder()
		.cookie_provider(jar)
		.build()
		.expect("Failed to build cookie-enabled Reqwest client for tests.");
	let store: Arc<dyn KeyValueStore> = store;

	IdentityClient::with_transport(store, descriptor, ReqwestHttpClient::with_client(http))
}

#[derive(Debug)]
pub enum FakeTransportError {
	ConnectionReset,
}
impl fmt::Display for FakeTransportError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset by peer."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Scripted transport that records every request it receives.
#[derive(Default)]
pub struct FakeTransport {
	replies: Mutex<VecDeque<Result<ApiResponse, FakeTransportError>>>,
	requests: Mutex<Vec<ApiRequest>>,
}
impl FakeTransport {
	pub fn scripted<I>(replies: I) -> Self
	where
		I: IntoIterator<Item = Result<ApiResponse, FakeTransportError>>,
	{
		Self { replies: Mutex::new(replies.into_iter().collect()), requests: Default::default() }
	}

	pub fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().clone()
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}
}
impl ApiTransport for FakeTransport {
	type TransportError = FakeTransportError;

	fn send(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		self.requests.lock().push(request);

		let reply = self
			.replies
			.lock()
			.pop_front()
			.expect("FakeTransport received more requests than it was scripted for.");

		Box::pin(async move { reply })
	}
}

pub fn json_reply(status: u16, body: serde_json::Value) -> Result<ApiResponse, FakeTransportError> {
	Ok(ApiResponse::new(status, body.to_string()))
}

pub fn fake_client(
	store: Arc<MemoryStore>,
	transport: Arc<FakeTransport>,
) -> IdentityClient<FakeTransport> {
	let store: Arc<dyn KeyValueStore> = store;

	IdentityClient::with_transport(store, descriptor("https://api.example.com"), transport)
}
