//! Locally persisted snapshot of the authenticated user.

// self
use crate::{_prelude::*, auth::UserId};

/// User payload returned by the identity endpoint and persisted under the cache key.
///
/// Only `id` and `username` are guaranteed by the service. Fields this crate does not model
/// are kept in [`CachedUser::extra`] so the cached entry mirrors the full payload.
///
/// Modeled optional fields that are absent or `null` are omitted when written back, so an
/// explicit `null` from the service does not survive in the cached entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedUser {
	/// Raw account identifier as reported by the service.
	pub id: i64,
	/// Login name.
	#[serde(default)]
	pub username: String,
	/// Human-friendly display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Numeric role code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<i64>,
	/// Numeric account status code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<i64>,
	/// Default token group of the account.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
	/// Remaining payload fields, preserved verbatim.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}
impl CachedUser {
	/// Returns the validated identifier, or `None` when the payload carries a non-positive id.
	pub fn user_id(&self) -> Option<UserId> {
		UserId::new(self.id).ok()
	}
}

/// Minimal view of a cached entry: only a usable `id` is required to take the fast path.
///
/// Integral floats (`42.0`) are accepted, since other writers of the same entry may not
/// distinguish integers from floats.
#[derive(Debug, Deserialize)]
pub(crate) struct CachedIdentity {
	#[serde(default)]
	id: Option<serde_json::Number>,
}
impl CachedIdentity {
	pub(crate) fn user_id(&self) -> Option<UserId> {
		let id = self.id.as_ref()?;
		let raw = match id.as_i64() {
			Some(raw) => raw,
			None => {
				let float = id.as_f64()?;

				if float.fract() != 0. || float < 1. || float > i64::MAX as f64 {
					return None;
				}

				float as i64
			},
		};

		UserId::new(raw).ok()
	}
}
