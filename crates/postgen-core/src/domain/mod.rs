// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for postgen.
//!
//! This module contains pure text-patching logic with no I/O. Reading and
//! writing files, running processes, and locating executables are handled
//! via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
pub mod error;
pub mod lines;
pub mod patch;
pub mod value_objects;

pub use error::{DomainError, ErrorCategory};
pub use lines::LineBuffer;
pub use patch::{INCLUDE_KEYWORD, PatchRules, Patched, insert_dependency, insert_include};
pub use value_objects::{FeatureName, VersionControl};
