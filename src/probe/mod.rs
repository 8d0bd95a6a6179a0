//! Host fact probing.
//!
//! This module provides the core functionality for gathering host facts:
//! best-effort shell execution, the facts snapshot, the probed source set,
//! and the collector that walks each fact's fallback chain.

pub mod collector;
pub mod exec;
pub mod facts;
pub mod sources;

// Re-export commonly used items
pub use collector::SystemInfoProbe;
pub use facts::SystemFacts;
pub use sources::Sources;
