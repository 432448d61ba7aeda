//! Application layer for postgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (FeatureService, FinalizeService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer and the ports. Where a
//! line goes lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CommandSpec, FeatureReport, FeatureService, FeatureTargets, FinalizeEvent, FinalizeReport,
    FinalizeService, FinalizeSettings, FinalizeStep, PatchOutcome, RenameOutcome, SkipReason,
    VcsOutcome, VcsStep, VerifyOutcome,
};

pub use ports::{CommandRunner, CommandStatus, ExecutableLocator, Filesystem, Invocation};

pub use error::ApplicationError;
