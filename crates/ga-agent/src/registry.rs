//! `AgentRegistry` — owns every agent and resolves ids to agents.
//!
//! # Why ids, not references
//!
//! Delayed telegrams may outlive their receiver.  Storing an id and looking
//! it up at delivery time turns "receiver was destroyed" into an ordinary
//! `None` instead of a dangling reference.
//!
//! # Check-out
//!
//! While an agent runs its own update or message handler it is *checked
//! out*: [`take`](AgentRegistry::take) moves it out of the map so the agent
//! can be borrowed mutably while the rest of the registry stays readable.
//! A checked-out agent keeps its slot in the iteration order and resolves
//! to `None` until [`restore`](AgentRegistry::restore) puts it back.

use ga_core::AgentId;

use crate::{Agent, RegistryError, RegistryResult};

#[cfg(feature = "fx-hash")]
type AgentMap<A> = rustc_hash::FxHashMap<AgentId, A>;
#[cfg(not(feature = "fx-hash"))]
type AgentMap<A> = std::collections::HashMap<AgentId, A>;

pub struct AgentRegistry<A> {
    agents: AgentMap<A>,
    /// Every registered id (present or checked out), ascending.
    order: Vec<AgentId>,
    next_id: u32,
}

impl<A> Default for AgentRegistry<A> {
    fn default() -> Self {
        Self {
            agents: AgentMap::default(),
            order: Vec::new(),
            next_id: 0,
        }
    }
}

impl<A: Agent> AgentRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id no agent in this registry has used yet.
    pub fn next_valid_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register `agent` under its own id.
    pub fn insert(&mut self, agent: A) -> RegistryResult<AgentId> {
        let id = agent.id();
        if !id.is_valid() {
            return Err(RegistryError::InvalidId(id));
        }
        match self.order.binary_search(&id) {
            Ok(_) => Err(RegistryError::DuplicateId(id)),
            Err(pos) => {
                self.order.insert(pos, id);
                self.agents.insert(id, agent);
                // Keep allocated ids ahead of explicitly chosen ones.
                self.next_id = self.next_id.max(id.0.saturating_add(1));
                Ok(id)
            }
        }
    }

    /// Unregister and return the agent.  Telegrams still queued for it are
    /// dropped when they come due.
    ///
    /// Removing a checked-out agent unregisters the id; the later
    /// [`restore`](Self::restore) call then fails and hands the agent back.
    pub fn remove(&mut self, id: AgentId) -> Option<A> {
        let pos = self.order.binary_search(&id).ok()?;
        self.order.remove(pos);
        self.agents.remove(&id)
    }

    /// Look up an agent by id.  `None` if unknown or currently checked out.
    #[inline]
    pub fn resolve(&self, id: AgentId) -> Option<&A> {
        self.agents.get(&id)
    }

    #[inline]
    pub fn resolve_mut(&mut self, id: AgentId) -> Option<&mut A> {
        self.agents.get_mut(&id)
    }

    /// `true` if `id` is registered (even while checked out).
    pub fn contains(&self, id: AgentId) -> bool {
        self.order.binary_search(&id).is_ok()
    }

    /// Check an agent out for exclusive use.
    pub fn take(&mut self, id: AgentId) -> Option<A> {
        self.agents.remove(&id)
    }

    /// Return a checked-out agent.
    ///
    /// Fails with [`RegistryError::NotCheckedOut`] (returning nothing) if
    /// the id was removed meanwhile or the agent was never taken; the
    /// agent is dropped in that case.
    pub fn restore(&mut self, agent: A) -> RegistryResult<()> {
        let id = agent.id();
        if !self.contains(id) || self.agents.contains_key(&id) {
            return Err(RegistryError::NotCheckedOut(id));
        }
        self.agents.insert(id, agent);
        Ok(())
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> &[AgentId] {
        &self.order
    }

    /// Present (not checked out) agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &A> + '_ {
        self.order.iter().filter_map(|id| self.agents.get(id))
    }

    /// Registered agents, including checked-out ones.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every agent.  Called between simulation runs.
    pub fn clear(&mut self) {
        self.agents.clear();
        self.order.clear();
        self.next_id = 0;
    }
}
