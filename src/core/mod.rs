//! Core components shared by the rest of the crate:
//! - The HTTP client ([`CapClient`]) and its builder.
//! - The primary error type ([`CapError`]).
//! - Internal networking helpers.

/// The client (`CapClient`), builder, and default configuration.
pub mod client;
/// The primary error type (`CapError`) for the crate.
pub mod error;

pub(crate) mod net;

pub use client::{CapClient, CapClientBuilder};
pub use error::CapError;
