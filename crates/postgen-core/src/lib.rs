//! Postgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the postgen
//! post-generation hooks, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           postgen-cli (CLI)             │
//! │     (feature / finalize commands)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (FeatureService, FinalizeService)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CommandRunner, Locator)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     postgen-adapters (Infrastructure)   │
//! │ (LocalFilesystem, ProcessRunner, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (LineBuffer, PatchRules, FeatureName)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use postgen_core::{
//!     application::{FeatureService, FeatureTargets},
//!     domain::PatchRules,
//! };
//!
//! let service = FeatureService::new(filesystem, PatchRules::default());
//! let targets = FeatureTargets::under_project_root("../..");
//! let report = service.register(&targets, "payments").unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;
