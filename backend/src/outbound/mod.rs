//! Outbound adapters implementing the driven ports.

pub mod memory;
pub mod persistence;
