//! Process adapters: running commands and finding executables.

mod locator;
mod runner;

pub use locator::SystemLocator;
pub use runner::ProcessRunner;
