//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `postgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Whole-file reads and writes, directory rename
//!   - `CommandRunner`: Blocking subprocess execution
//!   - `ExecutableLocator`: Env-override / PATH lookup of a program
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandRunner, CommandStatus, ExecutableLocator, Filesystem, Invocation};

#[cfg(test)]
pub use output::{MockCommandRunner, MockExecutableLocator, MockFilesystem};
