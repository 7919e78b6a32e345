//! Unit tests for ga-agent.

use ga_core::{AgentId, Vector2D};

use crate::Agent;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Dummy {
    id:     AgentId,
    pos:    Vector2D,
    radius: f64,
}

impl Dummy {
    fn at(id: u32, x: f64) -> Self {
        Self { id: AgentId(id), pos: Vector2D::new(x, 0.0), radius: 1.0 }
    }
}

impl Agent for Dummy {
    fn id(&self) -> AgentId {
        self.id
    }
    fn position(&self) -> Vector2D {
        self.pos
    }
    fn bounding_radius(&self) -> f64 {
        self.radius
    }
}

#[cfg(test)]
mod entity_tests {
    use super::*;

    #[test]
    fn gap_subtracts_both_radii() {
        let a = Dummy::at(0, 0.0);
        let b = Dummy::at(1, 10.0);
        assert!((a.gap_to(&b) - 8.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::{AgentRegistry, RegistryError};

    #[test]
    fn insert_and_resolve() {
        let mut reg = AgentRegistry::new();
        reg.insert(Dummy::at(3, 0.0)).unwrap();
        assert!(reg.resolve(AgentId(3)).is_some());
        assert!(reg.resolve(AgentId(4)).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut reg = AgentRegistry::new();
        reg.insert(Dummy::at(1, 0.0)).unwrap();
        assert_eq!(
            reg.insert(Dummy::at(1, 5.0)),
            Err(RegistryError::DuplicateId(AgentId(1)))
        );
    }

    #[test]
    fn invalid_id_rejected() {
        let mut reg = AgentRegistry::new();
        let agent = Dummy { id: AgentId::INVALID, pos: Vector2D::ZERO, radius: 0.0 };
        assert_eq!(reg.insert(agent), Err(RegistryError::InvalidId(AgentId::INVALID)));
    }

    #[test]
    fn ids_are_sorted_regardless_of_insert_order() {
        let mut reg = AgentRegistry::new();
        for id in [5, 1, 3] {
            reg.insert(Dummy::at(id, 0.0)).unwrap();
        }
        assert_eq!(reg.ids(), &[AgentId(1), AgentId(3), AgentId(5)]);
        let seen: Vec<AgentId> = reg.iter().map(|a| a.id()).collect();
        assert_eq!(seen, vec![AgentId(1), AgentId(3), AgentId(5)]);
    }

    #[test]
    fn next_valid_id_skips_explicit_ids() {
        let mut reg = AgentRegistry::new();
        reg.insert(Dummy::at(10, 0.0)).unwrap();
        assert_eq!(reg.next_valid_id(), AgentId(11));
        assert_eq!(reg.next_valid_id(), AgentId(12));
    }

    #[test]
    fn checked_out_agent_is_unresolvable_until_restored() {
        let mut reg = AgentRegistry::new();
        reg.insert(Dummy::at(0, 0.0)).unwrap();
        let agent = reg.take(AgentId(0)).unwrap();
        assert!(reg.resolve(AgentId(0)).is_none());
        assert!(reg.contains(AgentId(0)));
        reg.restore(agent).unwrap();
        assert!(reg.resolve(AgentId(0)).is_some());
    }

    #[test]
    fn restore_after_remove_fails() {
        let mut reg = AgentRegistry::new();
        reg.insert(Dummy::at(0, 0.0)).unwrap();
        let agent = reg.take(AgentId(0)).unwrap();
        assert!(reg.remove(AgentId(0)).is_none());
        assert_eq!(reg.restore(agent), Err(RegistryError::NotCheckedOut(AgentId(0))));
        assert!(reg.is_empty());
    }

    #[test]
    fn restore_without_take_fails() {
        let mut reg = AgentRegistry::new();
        reg.insert(Dummy::at(0, 0.0)).unwrap();
        assert!(reg.restore(Dummy::at(0, 1.0)).is_err());
    }

    #[test]
    fn remove_then_resolve_is_none() {
        let mut reg = AgentRegistry::new();
        reg.insert(Dummy::at(2, 0.0)).unwrap();
        assert!(reg.remove(AgentId(2)).is_some());
        assert!(reg.resolve(AgentId(2)).is_none());
        assert!(!reg.contains(AgentId(2)));
    }
}
