//! Authorization-gated asset registry.
//!
//! [`AssetRegistry`] implements create, read, update, delete and listing on
//! top of any [`WorldState`](assetledger_state::WorldState). Hosts wrap each
//! call in a transaction with [`invoke::submit`] or [`invoke::evaluate`].

pub mod config;
pub mod context;
pub mod error;
pub mod invoke;
pub mod registry;

pub use config::RegistryConfig;
pub use context::Invocation;
pub use error::{RegistryError, RegistryResult};
pub use registry::AssetRegistry;
