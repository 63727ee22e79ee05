//! Ports
//!
//! Traits implemented outside the domain crate.

pub mod providers;
