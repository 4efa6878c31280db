//! Token provisioning inputs, request bodies, and service responses.

pub mod config;
pub mod provisioned;
pub mod secret;
