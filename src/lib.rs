//! Workspace umbrella crate. Hosts the demos under `demos/` and re-exports
//! [`addressing_core`] so they can be run from the workspace root.

pub use addressing_core::*;
