//! Identity resolution and token provisioning against a single account service.

pub mod common;

mod identity;
mod token;

// self
use crate::{_prelude::*, http::ApiTransport, service::ServiceDescriptor, store::KeyValueStore};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, store::FileStore};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestIdentityClient = IdentityClient<ReqwestHttpClient>;

/// Resolves the session's user and provisions tokens on that user's behalf.
///
/// The client owns the transport, the key-value store holding the cached user snapshot, and the
/// service descriptor. The session itself lives in the transport (a cookie jar for the reqwest
/// transport); the client adds only the act-as-user header. Clones share the transport and
/// the store.
///
/// Concurrent resolutions are not coordinated: two callers racing on an empty cache may both
/// hit the identity endpoint, and the last write to the store wins.
pub struct IdentityClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// HTTP transport used for every outbound request.
	pub transport: Arc<T>,
	/// Store holding the cached user snapshot.
	pub store: Arc<dyn KeyValueStore>,
	/// Endpoints, header name, and cache key of the account service.
	pub descriptor: ServiceDescriptor,
}
impl<T> IdentityClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		store: Arc<dyn KeyValueStore>,
		descriptor: ServiceDescriptor,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self { transport: transport.into(), store, descriptor }
	}
}
#[cfg(feature = "reqwest")]
impl IdentityClient<ReqwestHttpClient> {
	/// Creates a new client with its own reqwest transport and an empty cookie store.
	pub fn new(store: Arc<dyn KeyValueStore>, descriptor: ServiceDescriptor) -> Result<Self> {
		let transport = ReqwestHttpClient::new()?;

		Ok(Self::with_transport(store, descriptor, transport))
	}

	/// Creates a client whose cookie store starts with an existing session cookie.
	pub fn with_session_cookie(
		store: Arc<dyn KeyValueStore>,
		descriptor: ServiceDescriptor,
		cookie: &str,
	) -> Result<Self> {
		let transport = ReqwestHttpClient::with_session_cookie(cookie, &descriptor.base_url)?;

		Ok(Self::with_transport(store, descriptor, transport))
	}

	/// Creates a client whose user snapshot persists in a JSON file at `path`.
	pub fn with_file_store(
		path: impl Into<std::path::PathBuf>,
		descriptor: ServiceDescriptor,
	) -> Result<Self> {
		let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(path)?);
		let transport = ReqwestHttpClient::new()?;

		Ok(Self::with_transport(store, descriptor, transport))
	}
}
impl<T> Clone for IdentityClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			descriptor: self.descriptor.clone(),
		}
	}
}
impl<T> Debug for IdentityClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IdentityClient").field("descriptor", &self.descriptor).finish()
	}
}
