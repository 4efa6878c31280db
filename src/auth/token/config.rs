//! Caller-supplied token settings and the fixed creation request body.

// self
use crate::_prelude::*;

/// Errors produced while validating a [`TokenConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TokenConfigError {
	/// Token name was empty or whitespace-only.
	#[error("Token name cannot be empty.")]
	EmptyName,
}

/// Name and group for a token about to be provisioned.
///
/// The group is validated by the service, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
	/// Display name of the new token.
	pub name: String,
	/// Pricing/routing group the token belongs to.
	pub group: String,
}
impl TokenConfig {
	/// Creates a new config after validating the name.
	pub fn new(name: impl Into<String>, group: impl Into<String>) -> Result<Self, TokenConfigError> {
		let config = Self { name: name.into(), group: group.into() };

		config.validate()?;

		Ok(config)
	}

	/// Re-checks invariants for configs built through struct literals.
	pub fn validate(&self) -> Result<(), TokenConfigError> {
		if self.name.trim().is_empty() {
			return Err(TokenConfigError::EmptyName);
		}

		Ok(())
	}
}

/// JSON body sent to the token-creation endpoint.
///
/// Everything except `name` and `group` is pinned: unlimited quota with no expiry, no model
/// restrictions, no cross-group retry, and no IP allowlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenRequestBody<'a> {
	/// Remaining-quota baseline; ignored while `unlimited_quota` is set.
	pub remain_quota: i64,
	/// Expiry timestamp; `-1` means the token never expires.
	pub expired_time: i64,
	/// Disables quota accounting for the token.
	pub unlimited_quota: bool,
	/// Enables the per-model allowlist.
	pub model_limits_enabled: bool,
	/// Comma-separated model allowlist.
	pub model_limits: &'a str,
	/// Lets the service retry the request in another group.
	pub cross_group_retry: bool,
	/// Caller-supplied token name.
	pub name: &'a str,
	/// Caller-supplied token group.
	pub group: &'a str,
	/// Newline-separated IP allowlist.
	pub allow_ips: &'a str,
}
impl<'a> TokenRequestBody<'a> {
	/// Never-expiring `expired_time` value.
	pub const NO_EXPIRY: i64 = -1;

	/// Builds the fixed body around a caller's config.
	pub fn from_config(config: &'a TokenConfig) -> Self {
		Self {
			remain_quota: 0,
			expired_time: Self::NO_EXPIRY,
			unlimited_quota: true,
			model_limits_enabled: false,
			model_limits: "",
			cross_group_retry: false,
			name: &config.name,
			group: &config.group,
			allow_ips: "",
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn blank_names_are_rejected() {
		assert_eq!(TokenConfig::new("", "default"), Err(TokenConfigError::EmptyName));
		assert_eq!(TokenConfig::new("  \t", "default"), Err(TokenConfigError::EmptyName));

		let literal = TokenConfig { name: " ".into(), group: "vip".into() };

		assert_eq!(literal.validate(), Err(TokenConfigError::EmptyName));
		TokenConfig::new("k1", "").expect("Groups are validated by the service, not locally.");
	}

	#[test]
	fn request_body_pins_quota_defaults() {
		let config = TokenConfig::new("k1", "default").expect("Token config should be valid.");
		let body = serde_json::to_value(TokenRequestBody::from_config(&config))
			.expect("Request body should serialize.");

		assert_eq!(
			body,
			serde_json::json!({
				"remain_quota": 0,
				"expired_time": -1,
				"unlimited_quota": true,
				"model_limits_enabled": false,
				"model_limits": "",
				"cross_group_retry": false,
				"name": "k1",
				"group": "default",
				"allow_ips": "",
			})
		);
	}
}
