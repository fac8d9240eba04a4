//! # Kernel
//!
//! The [`Orchestrator`] drives a run: it loads plugins, constructs every
//! configured component, configures each with its data merged over the
//! component's defaults and finally executes the requested applications.
//!
//! - **[`orchestrator`]**: [`Orchestrator`] and its [`OrchestratorState`].
//! - **[`error`]**: the top-level [`Error`] with its process exit codes.
//! - **[`constants`]**: names shared by the runtime and the front end.
pub mod constants;
pub mod error;
pub mod orchestrator;

pub use error::{Error, Phase, Result};
pub use orchestrator::{Orchestrator, OrchestratorState};
