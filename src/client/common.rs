//! Shared helpers for client operations (response envelopes, dispatch, error mapping).

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::UserId,
	client::IdentityClient,
	error::RemoteRequestError,
	http::{ApiRequest, ApiResponse, ApiTransport},
};

pub(crate) const IDENTITY_ENDPOINT: &str = "identity";
pub(crate) const TOKEN_ENDPOINT: &str = "token";

const BODY_PREVIEW_CHARS: usize = 256;

/// `{success, message, data}` wrapper the service puts around every payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
	/// Whether the service considers the call successful.
	pub success: bool,
	/// Human-readable status message; may be empty.
	#[serde(default)]
	pub message: String,
	/// Payload, when the service returns one.
	#[serde(default = "Option::default")]
	pub data: Option<T>,
}
impl<T> ApiEnvelope<T> {
	/// Returns the payload only when the service reported success.
	pub fn into_success(self) -> Option<T> {
		if self.success { self.data } else { None }
	}
}

#[derive(Deserialize)]
struct MessageOnly {
	message: String,
}

impl<T> IdentityClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Sends `request` and rejects transport failures and non-2xx answers.
	pub(crate) async fn dispatch(
		&self,
		endpoint: &'static str,
		request: ApiRequest,
	) -> Result<ApiResponse, RemoteRequestError> {
		let response = self
			.transport
			.send(request)
			.await
			.map_err(|e| RemoteRequestError::transport(endpoint, e))?;

		if response.is_success() { Ok(response) } else { Err(status_error(endpoint, &response)) }
	}

	/// Builds the identity-endpoint request, acting as `acting_as` when provided.
	pub(crate) fn identity_request(&self, acting_as: Option<UserId>) -> ApiRequest {
		let request = ApiRequest::get(self.descriptor.endpoints.identity.clone());

		match acting_as {
			Some(id) => request.with_header(&self.descriptor.identity_header, id.header_value()),
			None => request,
		}
	}
}

/// Parses a 2xx body with path-aware errors.
pub(crate) fn parse_body<B>(
	endpoint: &'static str,
	response: &ApiResponse,
) -> Result<B, RemoteRequestError>
where
	B: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		RemoteRequestError::MalformedBody { endpoint, status: response.status, source }
	})
}

/// Maps a non-2xx response, preferring the service's `message` over a raw body preview.
pub(crate) fn status_error(endpoint: &'static str, response: &ApiResponse) -> RemoteRequestError {
	let message = serde_json::from_slice::<MessageOnly>(&response.body)
		.map(|body| body.message)
		.ok()
		.filter(|message| !message.trim().is_empty())
		.unwrap_or_else(|| body_preview(&response.body));

	RemoteRequestError::Status { endpoint, status: response.status, message }
}

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let trimmed = text.trim();

	if trimmed.is_empty() {
		return "<empty body>".into();
	}

	let mut preview: String = trimmed.chars().take(BODY_PREVIEW_CHARS).collect();

	if trimmed.chars().nth(BODY_PREVIEW_CHARS).is_some() {
		preview.push('…');
	}

	preview
}
