//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `newapi_identity.op` with the `op` and
//!   `stage` fields, plus events for errors the silent operations swallow.
//! - Enable `metrics` to increment the `newapi_identity_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Cache-then-network user id resolution.
	ResolveUser,
	/// Explicit identity refetch.
	RefreshUser,
	/// Token provisioning.
	CreateToken,
	/// Session liveness probe.
	CheckLogin,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::ResolveUser => "resolve_user",
			OpKind::RefreshUser => "refresh_user",
			OpKind::CreateToken => "create_token",
			OpKind::CheckLogin => "check_login",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion (identity resolved, token response received, session alive).
	Success,
	/// Failure, whether propagated or degraded to `None`/`false`.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
