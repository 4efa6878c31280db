//! Client-level error types shared across identity, token, and store operations.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The remote call failed at the transport level or returned an unusable response.
	#[error(transparent)]
	RemoteRequestFailed(#[from] RemoteRequestError),

	/// No user identity could be resolved from the cache or the identity endpoint.
	#[error("No authenticated user could be resolved; please log in.")]
	NotAuthenticated,
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Service descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::service::ServiceDescriptorError),
	/// Token configuration failed validation.
	#[error(transparent)]
	InvalidTokenConfig(#[from] crate::auth::TokenConfigError),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures observed while talking to the remote account service.
#[derive(Debug, ThisError)]
pub enum RemoteRequestError {
	/// Underlying HTTP client reported a network failure (DNS, TCP, TLS, IO).
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Transport {
		/// Endpoint label (`identity` or `token`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Service answered with a non-2xx status.
	#[error("The {endpoint} endpoint returned HTTP {status}: {message}.")]
	Status {
		/// Endpoint label (`identity` or `token`).
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
		/// Service-supplied message, or a preview of the response body.
		message: String,
	},
	/// Service answered 2xx but the body did not match the expected shape.
	#[error("The {endpoint} endpoint returned malformed JSON.")]
	MalformedBody {
		/// Endpoint label (`identity` or `token`).
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl RemoteRequestError {
	/// Wraps a transport-specific network error.
	pub fn transport(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Transport { endpoint, source: Box::new(src) }
	}

	/// Returns the HTTP status code, when the service answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Transport { .. } => None,
			Self::Status { status, .. } | Self::MalformedBody { status, .. } => Some(*status),
		}
	}
}
