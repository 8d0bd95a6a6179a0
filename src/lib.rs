//! # hostfacts - Host System Facts Probe
//!
//! A small crate that gathers six host facts (hostname, distro label, CPU
//! model, used/total memory, CPU temperature) by invoking shell utilities
//! and reading well-known system files, with an ordered fallback chain per
//! fact and a fixed placeholder when every source comes up empty.
//!
//! ## Features
//!
//! - **Fallback chains**: each fact tries progressively less-specific
//!   sources, accepting the first usable answer
//! - **Consistent snapshots**: all six facts are published together; a
//!   reader never sees a half-updated set
//! - **Change notifications**: one notification per completed fetch, as a
//!   watch channel or a stream
//! - **Library + Binary**: use as a crate or as a standalone CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hostfacts::SystemInfoProbe;
//!
//! #[tokio::main]
//! async fn main() {
//!     let probe = SystemInfoProbe::init().await;
//!     println!("{} on {}", probe.hostname(), probe.distro());
//!
//!     probe.refresh().await;
//!     println!("CPU at {}", probe.cpu_temp());
//! }
//! ```

pub mod error;
pub mod probe;

// Re-export public API
pub use error::{ProbeError, Result};
pub use probe::{
    collector::SystemInfoProbe,
    exec::{run_shell, try_run_shell, COMMAND_TIMEOUT_MS},
    facts::SystemFacts,
    sources::Sources,
};

/// The default re-fetch interval for watch mode, in milliseconds
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 5000;
