//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::net::{Ipv4Addr, SocketAddr};

use crate::queue::DEFAULT_MAX_IN_FLIGHT;

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Listener Defaults
// =============================================================================

pub const DEFAULT_PORT: u16 = 6464;

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

// =============================================================================
// Queue Defaults
// =============================================================================

pub fn default_max_in_flight() -> usize {
    DEFAULT_MAX_IN_FLIGHT
}
