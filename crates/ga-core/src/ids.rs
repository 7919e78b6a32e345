//! Agent identifiers.
//!
//! The dispatcher and every telegram hold ids, never references.  An id is
//! resolved through the registry at the moment a message is delivered, so a
//! stale id simply fails to resolve.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an agent in the world registry.
///
/// Ordering is the update order: the world runs agents by ascending id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    /// No agent.  Also the `Default`, so an unset id never resolves.
    pub const INVALID: AgentId = AgentId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#invalid")
        }
    }
}
