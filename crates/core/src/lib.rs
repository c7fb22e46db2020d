//! # Tierbot Core
//!
//! Domain types, traits, and error definitions for the Tierbot assistant
//! runtime. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem boundary is defined as a trait here. Implementations live
//! in their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod action;
pub mod backend;
pub mod error;
pub mod insight;
pub mod request;

// Re-export key types at crate root for ergonomics
pub use action::{Action, ActionRegistry};
pub use backend::{ChatBackend, ChatCompletion, ChatUsage};
pub use error::{ActionError, BackendError, DispatchError, Error, ProfileError, Result};
pub use insight::Insight;
pub use request::{Request, Tier};
