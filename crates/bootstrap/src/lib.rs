//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading and component wiring that can be reused
//! by CLI, UI, or other front-end crates. Stores are constructed here once
//! at startup and passed to front-ends by handle — there is no ambient
//! global state. Lifecycle: `build` (app start) → active → `shutdown`
//! (app close).

pub mod builder;
pub mod config;

pub use builder::{Client, ClientBuilder};
pub use config::{AppConfig, ProviderKind};
