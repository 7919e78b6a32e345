//! `ga-agent` — agent handles and the id-keyed agent registry.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`entity`]    | `Agent` trait (id, position, bounding radius)            |
//! | [`registry`]  | `AgentRegistry<A>` — owns agents, resolves ids           |
//! | [`error`]     | `RegistryError`, `RegistryResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Use FxHash instead of SipHash for the id → agent map.      |

pub mod entity;
pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use entity::Agent;
pub use error::{RegistryError, RegistryResult};
pub use registry::AgentRegistry;
