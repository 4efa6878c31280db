// self
use crate::{_prelude::*, service::ServiceDescriptorBuilder};

/// Default path of the "current user" endpoint.
pub const DEFAULT_IDENTITY_PATH: &str = "/api/user/self";
/// Default path of the token-creation endpoint.
pub const DEFAULT_TOKEN_PATH: &str = "/api/token/";
/// Default name of the act-as-user header.
pub const DEFAULT_IDENTITY_HEADER: &str = "New-API-User";
/// Default store key holding the cached user payload.
pub const DEFAULT_USER_CACHE_KEY: &str = "user";

/// Endpoint set exposed by the account service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
	/// Returns the user bound to the current session.
	pub identity: Url,
	/// Creates tokens for the acting user.
	pub token: Url,
}

/// Immutable service descriptor consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
	/// Base URL the endpoint paths were joined onto.
	pub base_url: Url,
	/// Resolved endpoint URLs.
	pub endpoints: ServiceEndpoints,
	/// Header carrying the resolved user id.
	pub identity_header: String,
	/// Store key holding the cached user payload.
	pub cache_key: String,
}
impl ServiceDescriptor {
	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: Url) -> ServiceDescriptorBuilder {
		ServiceDescriptorBuilder::new(base_url)
	}
}
