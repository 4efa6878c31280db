//! Strongly typed user identifier that can never carry the "unresolved" sentinel.

// std
use std::num::ParseIntError;
// self
use crate::_prelude::*;

/// Error returned when user identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum UserIdError {
	/// The identifier was zero or negative (including the sentinel).
	#[error("User identifier must be positive, got {value}.")]
	NonPositive {
		/// Rejected raw value.
		value: i64,
	},
	/// The identifier text was not an integer.
	#[error("User identifier is not an integer.")]
	Parse(#[from] ParseIntError),
}

/// Positive numeric identifier of an account on the remote service.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);
impl UserId {
	/// Raw value conventionally used for "no resolvable identity".
	pub const SENTINEL: i64 = -1;

	/// Creates a new identifier after validation.
	pub fn new(value: i64) -> Result<Self, UserIdError> {
		if value > 0 { Ok(Self(value)) } else { Err(UserIdError::NonPositive { value }) }
	}

	/// Returns the raw integer.
	pub const fn get(self) -> i64 {
		self.0
	}

	/// Collapses an optional identifier into the raw `-1` sentinel convention.
	pub fn raw_or_sentinel(id: Option<Self>) -> i64 {
		id.map_or(Self::SENTINEL, Self::get)
	}

	/// Renders the value sent in the identity header.
	pub fn header_value(self) -> String {
		self.0.to_string()
	}
}
impl From<UserId> for i64 {
	fn from(value: UserId) -> Self {
		value.0
	}
}
impl TryFrom<i64> for UserId {
	type Error = UserIdError;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "User({})", self.0)
	}
}
impl Display for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}
impl FromStr for UserId {
	type Err = UserIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s.trim().parse()?)
	}
}
