//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! hooks: "register a feature" and "finalize a project".

pub mod feature_service;
pub mod finalize_service;

pub use feature_service::{FeatureReport, FeatureService, FeatureTargets, PatchOutcome, SkipReason};
pub use finalize_service::{
    CommandSpec, FinalizeEvent, FinalizeReport, FinalizeService, FinalizeSettings, FinalizeStep,
    RenameOutcome, VcsOutcome, VcsStep, VerifyOutcome,
};
