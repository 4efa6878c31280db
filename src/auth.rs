//! Identity-domain identifiers, cached user snapshots, and token models.

pub mod id;
pub mod token;
pub mod user;

pub use id::*;
pub use token::{config::*, provisioned::*, secret::*};
pub use user::*;
