//! Identity resolution: cached-user fast path, identity endpoint fallback, and session probes.
//!
//! [`IdentityClient::resolve_user_id`] trusts any positive id found in the store without asking
//! the service again; only an explicit [`IdentityClient::refresh_cached_user`] revalidates it.
//! Resolution and probing never surface errors. Failures are logged through [`crate::obs`] and
//! collapse into `None` or `false`.

// self
use crate::{
	_prelude::*,
	auth::{CachedIdentity, CachedUser, UserId},
	client::{
		IdentityClient,
		common::{self, ApiEnvelope, IDENTITY_ENDPOINT},
	},
	http::ApiTransport,
	obs::{self, OpKind, OpOutcome, OpSpan},
	store::StoreError,
};

impl<T> IdentityClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Resolves the current user's id, preferring the cached snapshot.
	///
	/// Returns `None` when neither the store nor the identity endpoint yields a positive id.
	/// Use [`UserId::raw_or_sentinel`] to obtain the conventional `-1` instead.
	pub async fn resolve_user_id(&self) -> Option<UserId> {
		const KIND: OpKind = OpKind::ResolveUser;

		let span = OpSpan::new(KIND, "resolve_user_id");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let resolved = span
			.instrument(async move {
				if let Some(id) = self.cached_user_id().await {
					return Some(id);
				}

				match self.fetch_user(None).await {
					Ok(Some(user)) => {
						if let Err(e) = self.write_cache_entry(&user).await {
							obs::warn_discarded(KIND, "write_cache", &e);
						}

						user.user_id()
					},
					Ok(None) => None,
					Err(e) => {
						obs::warn_discarded(KIND, "fetch_user", &e);

						None
					},
				}
			})
			.await;

		match resolved {
			Some(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			None => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		resolved
	}

	/// Refetches the current user and overwrites the cached snapshot.
	///
	/// The identity header is sent when a cached id exists. Returns `Ok(None)` when the service
	/// reports that no user is bound to the session; the stale snapshot is left in place.
	pub async fn refresh_cached_user(&self) -> Result<Option<CachedUser>> {
		const KIND: OpKind = OpKind::RefreshUser;

		let span = OpSpan::new(KIND, "refresh_cached_user");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result: Result<Option<CachedUser>> = span
			.instrument(async move {
				let acting_as = self.cached_user_id().await;
				let Some(user) = self.fetch_user(acting_as).await? else {
					return Ok(None);
				};

				self.write_cache_entry(&user).await?;

				Ok(Some(user))
			})
			.await;

		match &result {
			Ok(Some(_)) => obs::record_op_outcome(KIND, OpOutcome::Success),
			_ => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}

	/// Reports whether the session is still accepted by the service.
	///
	/// Resolves the id first (no probe is sent without one), then calls the identity endpoint as
	/// that user. Only a 2xx answer with `success: true` counts; the cache is not touched.
	pub async fn check_login_status(&self) -> bool {
		const KIND: OpKind = OpKind::CheckLogin;

		let Some(id) = self.resolve_user_id().await else {
			return false;
		};
		let span = OpSpan::new(KIND, "check_login_status");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let alive = span
			.instrument(async move {
				let request = self.identity_request(Some(id));
				let probe = self.dispatch(IDENTITY_ENDPOINT, request).await.and_then(|response| {
					common::parse_body::<ApiEnvelope<serde_json::Value>>(IDENTITY_ENDPOINT, &response)
				});

				match probe {
					Ok(envelope) => envelope.success,
					Err(e) => {
						obs::debug_discarded(KIND, "probe", &e);

						false
					},
				}
			})
			.await;

		if alive {
			obs::record_op_outcome(KIND, OpOutcome::Success);
		} else {
			obs::record_op_outcome(KIND, OpOutcome::Failure);
		}

		alive
	}

	/// Returns the cached user snapshot without touching the network.
	pub async fn cached_user(&self) -> Option<CachedUser> {
		let raw = self.read_cache_entry().await?;

		serde_json::from_str(&raw)
			.inspect_err(|e| obs::warn_discarded(OpKind::ResolveUser, "parse_cached_user", e))
			.ok()
	}

	async fn cached_user_id(&self) -> Option<UserId> {
		let raw = self.read_cache_entry().await?;

		serde_json::from_str::<CachedIdentity>(&raw)
			.inspect_err(|e| obs::warn_discarded(OpKind::ResolveUser, "parse_cached_id", e))
			.ok()?
			.user_id()
	}

	async fn read_cache_entry(&self) -> Option<String> {
		self.store
			.get(&self.descriptor.cache_key)
			.await
			.inspect_err(|e| obs::warn_discarded(OpKind::ResolveUser, "read_cache", e))
			.ok()
			.flatten()
	}

	async fn write_cache_entry(&self, user: &CachedUser) -> Result<(), StoreError> {
		let encoded = serde_json::to_string(user)
			.map_err(|e| StoreError::Serialization { message: e.to_string() })?;

		self.store.set(&self.descriptor.cache_key, encoded).await
	}

	/// Calls the identity endpoint; `Ok(None)` means the service reported no user.
	async fn fetch_user(&self, acting_as: Option<UserId>) -> Result<Option<CachedUser>> {
		let request = self.identity_request(acting_as);
		let response = self.dispatch(IDENTITY_ENDPOINT, request).await?;
		let envelope: ApiEnvelope<CachedUser> = common::parse_body(IDENTITY_ENDPOINT, &response)?;

		Ok(envelope.into_success())
	}
}
