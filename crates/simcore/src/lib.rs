//! Facade over `simcore-fixed`, `simcore-bitset`, `simcore-ecs`, and
//! `simcore-rollback`: the host-facing `Sim` runtime, its collaborator
//! traits, configuration, diagnostics, and a unified error type.

pub mod config;
pub mod diag;
pub mod error;
pub mod sim;

pub use config::{DiagConfig, SimConfig};
pub use error::SimError;
pub use sim::{Clock, Frame, InputSource, Renderer, Sim};

// Re-exported so a host depending only on `simcore` has the full
// schema-declaration and rollback surface without a second dependency.
pub use simcore_bitset as bitset;
pub use simcore_ecs as ecs;
pub use simcore_fixed as fixed;
pub use simcore_rollback as rollback;
