//! Domain types and authorization policy for the asset registry.
//!
//! This crate has no storage dependency. The world-state contract lives in
//! `assetledger-state` and the service that ties both together lives in
//! `assetledger-registry`.

pub mod asset;
pub mod error;
pub mod identity;
pub mod policy;
pub mod roles;
pub mod types;
