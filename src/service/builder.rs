// self
use crate::{
	_prelude::*,
	service::{
		DEFAULT_IDENTITY_HEADER, DEFAULT_IDENTITY_PATH, DEFAULT_TOKEN_PATH,
		DEFAULT_USER_CACHE_KEY, ServiceDescriptor, ServiceEndpoints,
	},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ServiceDescriptorError {
	/// Base URL must use HTTPS unless insecure HTTP was explicitly allowed.
	#[error("The service base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry relative paths (e.g. `mailto:` or `data:` URLs).
	#[error("The service base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// An endpoint path could not be joined onto the base URL.
	#[error("The {endpoint} path `{path}` is invalid.")]
	InvalidPath {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Offending path.
		path: String,
	},
	/// Identity header name is not a valid HTTP header token.
	#[error("Identity header name `{name}` is not a valid HTTP header name.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
	},
	/// Cache key must not be empty.
	#[error("User cache key cannot be empty.")]
	EmptyCacheKey,
}

/// Builder for [`ServiceDescriptor`] values.
#[derive(Debug)]
pub struct ServiceDescriptorBuilder {
	/// Base URL of the account service.
	pub base_url: Url,
	/// Path of the "current user" endpoint.
	pub identity_path: String,
	/// Path of the token-creation endpoint.
	pub token_path: String,
	/// Name of the act-as-user header.
	pub identity_header: String,
	/// Store key holding the cached user payload.
	pub cache_key: String,
	/// Accepts `http://` base URLs (local development and tests).
	pub allow_insecure_http: bool,
}
impl ServiceDescriptorBuilder {
	/// Creates a new builder seeded with the default new-api layout.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			identity_path: DEFAULT_IDENTITY_PATH.into(),
			token_path: DEFAULT_TOKEN_PATH.into(),
			identity_header: DEFAULT_IDENTITY_HEADER.into(),
			cache_key: DEFAULT_USER_CACHE_KEY.into(),
			allow_insecure_http: false,
		}
	}

	/// Overrides the identity endpoint path.
	pub fn identity_path(mut self, path: impl Into<String>) -> Self {
		self.identity_path = path.into();

		self
	}

	/// Overrides the token-creation endpoint path.
	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = path.into();

		self
	}

	/// Overrides the act-as-user header name.
	pub fn identity_header(mut self, name: impl Into<String>) -> Self {
		self.identity_header = name.into();

		self
	}

	/// Overrides the store key used for the cached user.
	pub fn cache_key(mut self, key: impl Into<String>) -> Self {
		self.cache_key = key.into();

		self
	}

	/// Allows or forbids plain `http://` base URLs.
	pub fn allow_insecure_http(mut self, allow: bool) -> Self {
		self.allow_insecure_http = allow;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ServiceDescriptor, ServiceDescriptorError> {
		validate_base_url(&self.base_url, self.allow_insecure_http)?;
		validate_header_name(&self.identity_header)?;

		if self.cache_key.trim().is_empty() {
			return Err(ServiceDescriptorError::EmptyCacheKey);
		}

		let identity = join_endpoint(&self.base_url, "identity", &self.identity_path)?;
		let token = join_endpoint(&self.base_url, "token", &self.token_path)?;

		Ok(ServiceDescriptor {
			base_url: self.base_url,
			endpoints: ServiceEndpoints { identity, token },
			identity_header: self.identity_header,
			cache_key: self.cache_key,
		})
	}
}

fn validate_base_url(url: &Url, allow_insecure_http: bool) -> Result<(), ServiceDescriptorError> {
	if url.cannot_be_a_base() {
		return Err(ServiceDescriptorError::CannotBeABase { url: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if allow_insecure_http => Ok(()),
		_ => Err(ServiceDescriptorError::InsecureBaseUrl { url: url.to_string() }),
	}
}

fn validate_header_name(name: &str) -> Result<(), ServiceDescriptorError> {
	// RFC 7230 `tchar`.
	let is_tchar = |c: char| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c);

	if name.is_empty() || !name.chars().all(is_tchar) {
		Err(ServiceDescriptorError::InvalidHeaderName { name: name.into() })
	} else {
		Ok(())
	}
}

fn join_endpoint(
	base: &Url,
	endpoint: &'static str,
	path: &str,
) -> Result<Url, ServiceDescriptorError> {
	let invalid = || ServiceDescriptorError::InvalidPath { endpoint, path: path.into() };

	if path.trim().is_empty() || path.contains("://") || path.starts_with("//") {
		return Err(invalid());
	}

	let joined = base.join(path).map_err(|_| invalid())?;

	// Endpoints must stay on the base URL's origin.
	if joined.origin() != base.origin() {
		return Err(invalid());
	}

	Ok(joined)
}
