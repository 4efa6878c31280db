//! Token-creation responses owned by the remote service.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Token created by the service on the caller's behalf.
///
/// Only `key` is required. Everything else is optional so a token the service already created
/// is never reported as a failure because of a reshaped payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedToken {
	/// API key; callers must avoid logging it.
	pub key: TokenSecret,
	/// Server-side token identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	/// Token name echoed back by the service.
	#[serde(default)]
	pub name: String,
	/// Token group echoed back by the service.
	#[serde(default)]
	pub group: String,
	/// Remaining token fields, preserved verbatim.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

/// Body returned by the token-creation endpoint, handed back to callers untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenResponse {
	/// Whether the service accepted the request.
	pub success: bool,
	/// Human-readable status message; may be empty.
	#[serde(default)]
	pub message: String,
	/// Created token, when the service returns one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<ProvisionedToken>,
	/// Remaining top-level fields, preserved verbatim.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}
impl CreateTokenResponse {
	/// Returns the created token only when the service reported success.
	pub fn token(&self) -> Option<&ProvisionedToken> {
		if self.success { self.data.as_ref() } else { None }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejection_without_data_parses() {
		let response: CreateTokenResponse =
			serde_json::from_str(r#"{"success":false,"message":"group not allowed"}"#)
				.expect("Rejected response should deserialize.");

		assert!(!response.success);
		assert_eq!(response.message, "group not allowed");
		assert!(response.token().is_none());
	}

	#[test]
	fn success_exposes_token() {
		let response: CreateTokenResponse = serde_json::from_str(
			r#"{"success":true,"message":"ok","data":{"key":"sk-x","id":7,"name":"k1","group":"default"}}"#,
		)
		.expect("Successful response should deserialize.");
		let token = response.token().expect("Successful response should expose its token.");

		assert_eq!(token.key.expose(), "sk-x");
		assert_eq!(token.id, Some(7));
		assert_eq!(token.group, "default");
	}

	#[test]
	fn reshaped_token_payload_still_parses() {
		let response: CreateTokenResponse = serde_json::from_str(
			r#"{"success":true,"message":"","data":{"key":"sk-x","name":"k1","group":"default","remain_quota":0},"trace":"abc"}"#,
		)
		.expect("Token payload without an id should deserialize.");
		let token = response.token().expect("Successful response should expose its token.");

		assert_eq!(token.key.expose(), "sk-x");
		assert_eq!(token.id, None);
		assert_eq!(token.extra.get("remain_quota"), Some(&serde_json::json!(0)));
		assert_eq!(response.extra.get("trace"), Some(&serde_json::json!("abc")));

		let encoded = serde_json::to_value(&response).expect("Token response should serialize.");

		assert_eq!(encoded["data"]["remain_quota"], 0);
		assert!(encoded["data"].get("id").is_none());
	}
}
