//! Remote account-service description.
//!
//! `descriptor` exposes validated metadata ([`ServiceDescriptor`]) covering the service base URL,
//! the identity and token endpoints, the name of the act-as-user header, and the key under which
//! the user snapshot is cached. `builder` assembles and validates descriptors.

/// Builder API for assembling service descriptors.
pub mod builder;
/// Validated service metadata and its defaults.
pub mod descriptor;

pub use builder::*;
pub use descriptor::*;
