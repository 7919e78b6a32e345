//! Fluent builder for constructing a [`World`].

use ga_agent::AgentRegistry;
use ga_core::{SimClock, SimRng, ToolkitConfig};
use ga_message::Dispatcher;

use crate::{SimAgent, SimResult, World};

/// Fluent builder for [`World<A>`].
///
/// | Method          | Default                     |
/// |-----------------|-----------------------------|
/// | `.config(c)`    | `ToolkitConfig::default()`  |
/// | `.agent(a)`     | no agents                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new()
///     .config(ToolkitConfig::load_json("toolkit.json")?)
///     .agent(Bot::new(AgentId(0)))
///     .agent(Bot::new(AgentId(1)))
///     .build()?;
/// world.run_ticks(600, &mut NoopObserver);
/// ```
pub struct WorldBuilder<A: SimAgent> {
    config: ToolkitConfig,
    agents: Vec<A>,
}

impl<A: SimAgent> Default for WorldBuilder<A> {
    fn default() -> Self {
        Self { config: ToolkitConfig::default(), agents: Vec::new() }
    }
}

impl<A: SimAgent> WorldBuilder<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ToolkitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn agent(mut self, agent: A) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = A>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Validate the configuration, register the agents and return a world
    /// at time zero.
    pub fn build(self) -> SimResult<World<A>> {
        self.config.validate()?;
        let dispatcher = Dispatcher::new(&self.config.dispatch)?;

        let mut agents = AgentRegistry::new();
        for agent in self.agents {
            agents.insert(agent)?;
        }

        Ok(World {
            rng: SimRng::new(self.config.world.seed),
            clock: SimClock::new(),
            config: self.config,
            agents,
            dispatcher,
        })
    }
}
