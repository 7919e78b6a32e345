//! The read-only view of an agent that the toolkit core relies on.

use ga_core::{AgentId, Vector2D};

/// Anything that can live in an [`AgentRegistry`][crate::AgentRegistry].
///
/// The core never owns game objects directly; it only needs a stable id to
/// address messages and a little geometry for evaluators.
pub trait Agent {
    /// Stable identifier, unique within one registry.
    fn id(&self) -> AgentId;

    fn position(&self) -> Vector2D;

    fn bounding_radius(&self) -> f64;

    /// Distance between the edges of two agents' bounding circles
    /// (negative when they overlap).
    fn gap_to(&self, other: &dyn Agent) -> f64 {
        self.position().distance(other.position())
            - self.bounding_radius()
            - other.bounding_radius()
    }
}
