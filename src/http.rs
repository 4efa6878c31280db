//! Transport primitives for calls against the account service.
//!
//! The module exposes [`ApiTransport`] alongside [`ApiRequest`] and [`ApiResponse`] so
//! downstream crates can plug in custom HTTP stacks (or test doubles) without touching the
//! client. The transport owns the session: whatever cookie jar or credential store it uses must
//! attach the session cookie to every outgoing request on its own, because the client only ever
//! adds the act-as-user header.

// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`ApiTransport::send`].
pub type TransportFuture<'a, E> = Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of reaching the account service.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared behind
/// an [`Arc`] by every client clone. A returned error means no HTTP response was obtained; any
/// response, including non-2xx ones, must be reported through [`ApiResponse`].
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Dispatches `request` and collects the full response body.
	fn send(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// HTTP methods used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
}
impl ApiMethod {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiMethod::Get => "GET",
			ApiMethod::Post => "POST",
		}
	}
}
impl Display for ApiMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-agnostic request description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// Request method.
	pub method: ApiMethod,
	/// Absolute endpoint URL.
	pub url: Url,
	/// Extra headers beyond the transport defaults.
	pub headers: Vec<(String, String)>,
	/// JSON body, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: ApiMethod::Get, url, headers: Vec::new(), body: None }
	}

	/// Creates a `POST` request carrying a JSON body.
	pub fn post_json(url: Url, body: Vec<u8>) -> Self {
		Self { method: ApiMethod::Post, url, headers: Vec::new(), body: Some(body) }
	}

	/// Appends a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Looks up a header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Builds a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Clients built through [`ReqwestHttpClient::builder`] keep a cookie store (the session lives
/// there) and send `Cache-Control: no-store` on every request. A custom [`ReqwestClient`] passed
/// to [`ReqwestHttpClient::with_client`] must enable a cookie store itself, otherwise session
/// cookies set by the service are dropped.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with a fresh, empty cookie store.
	pub fn new() -> Result<Self, ConfigError> {
		Ok(Self(Self::builder().build()?))
	}

	/// Builds a client whose cookie jar is seeded with an existing session cookie.
	///
	/// `cookie` uses `Set-Cookie` syntax (e.g. `session=abc; Path=/`) and is scoped to `url`.
	pub fn with_session_cookie(cookie: &str, url: &Url) -> Result<Self, ConfigError> {
		let jar = Arc::new(reqwest::cookie::Jar::default());

		jar.add_cookie_str(cookie, url);

		Ok(Self(Self::builder().cookie_provider(jar).build()?))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Returns a builder preconfigured with the cookie store and default headers.
	pub fn builder() -> reqwest::ClientBuilder {
		use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue};

		let mut headers = HeaderMap::new();

		headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

		ReqwestClient::builder().cookie_store(true).default_headers(headers)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn send(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		use reqwest::{Method, header::CONTENT_TYPE};

		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				ApiMethod::Get => Method::GET,
				ApiMethod::Post => Method::POST,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.header(CONTENT_TYPE, "application/json").body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
