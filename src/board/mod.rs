//! Task board engine.
//!
//! A board unifies personal tasks and tasks synchronized from an external
//! issue tracker into ordered columns, with an archive, bulk mutation and
//! workload-aware column suggestions. The module follows hexagonal
//! architecture:
//!
//! - Domain types and board mutation rules in [`domain`]
//! - Port contracts for snapshot persistence and tracker input in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The single-writer orchestration service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
