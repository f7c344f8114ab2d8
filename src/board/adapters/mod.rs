//! Adapter implementations for board ports.

pub mod file;
pub mod memory;
