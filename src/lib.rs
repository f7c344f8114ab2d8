//! Taskboard: a personal task board engine.
//!
//! This crate keeps personal tasks and tasks mirrored from an external issue
//! tracker on one board of ordered columns, with an archive, bulk operations,
//! filtered views and workload-aware column suggestions.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Board rules with no infrastructure dependencies
//! - **Ports**: Trait interfaces for snapshot persistence and tracker input
//! - **Adapters**: In-memory and filesystem implementations of the ports
//! - **Services**: The single-writer service that persists every mutation
//!
//! # Modules
//!
//! - [`board`]: Board aggregate, persistence ports and orchestration

pub mod board;
