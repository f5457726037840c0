//! Durable client-side storage capability.
//!
//! This module contains the key-value store trait every persisted piece of
//! client state goes through, the well-known keys, and the host events
//! (visibility and cross-tab storage changes) the session clock listens to.
//!
//! # Module Structure
//!
//! - `repository`: The [`KeyValueStore`] trait
//! - `event`: Host events and the [`HostEventSource`] trait
//! - `keys`: Well-known storage keys

mod event;
pub mod keys;
mod repository;

pub use event::{HostEvent, HostEventSource, StorageChange};
pub use repository::KeyValueStore;
