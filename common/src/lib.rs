//! Mockingjay common types
//!
//! Endpoint definitions, behaviour profiles and configuration loading shared
//! by the mock server and the compatibility checker.

#![warn(missing_docs)]

/// Behaviour profiles and weighted profile selection
pub mod behaviour;

/// Configuration structs and YAML loaders
pub mod config;

/// Error types
pub mod error;

/// Endpoint data model
pub mod types;
