//! Infrastructure adapters for postgen.
//!
//! This crate implements the ports defined in `postgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ProcessRunner, SystemLocator};
