//! The `World` struct and its tick loop.

use ga_agent::AgentRegistry;
use ga_core::{AgentId, SimClock, SimRng, SimTime, Tick, ToolkitConfig};
use ga_message::{DispatchReport, DispatchStats, Dispatcher};
use tracing::{trace, warn};

use crate::context::RegistryRecipients;
use crate::{AgentContext, SimAgent, SimResult, WorldObserver};

/// What one [`World::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    pub now: SimTime,
    /// Agents whose `update` ran.
    pub updated: usize,
    /// Message traffic during the tick: due telegrams plus every send made
    /// by an agent update.
    pub messages: DispatchReport,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Owns every agent, the clock and the message dispatcher.
///
/// Each tick:
///
/// 1. **Clock**: advance simulated time by `dt`.
/// 2. **Due messages**: deliver every delayed telegram with
///    `dispatch_time <= now`, in dispatch-time order, each with the
///    immediate sends its handler makes.
/// 3. **Updates**: for each agent in ascending id order, check it out of
///    the registry and call [`SimAgent::update`].  Its zero-delay sends are
///    handled by their receivers during the call.  Once it is put back,
///    telegrams that were waiting for it (self-sends) are delivered.
///
/// Separate worlds share nothing, so tests and parallel runs stay isolated.
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<A: SimAgent> {
    pub config: ToolkitConfig,
    pub clock: SimClock,
    pub(crate) agents: AgentRegistry<A>,
    pub(crate) dispatcher: Dispatcher<A::Message>,
    pub(crate) rng: SimRng,
}

impl<A: SimAgent> World<A> {
    // ── Agents ────────────────────────────────────────────────────────────

    /// Register an agent under its own id.
    pub fn add_agent(&mut self, agent: A) -> SimResult<AgentId> {
        Ok(self.agents.insert(agent)?)
    }

    /// Allocate a fresh id, build the agent with it and register it.
    pub fn spawn(&mut self, make: impl FnOnce(AgentId, &mut SimRng) -> A) -> SimResult<AgentId> {
        let id = self.agents.next_valid_id();
        let agent = make(id, &mut self.rng);
        self.add_agent(agent)
    }

    /// Unregister an agent.  Telegrams still queued for it are dropped
    /// when they come due.
    pub fn remove_agent(&mut self, id: AgentId) -> Option<A> {
        self.agents.remove(id)
    }

    pub fn agent(&self, id: AgentId) -> Option<&A> {
        self.agents.resolve(id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut A> {
        self.agents.resolve_mut(id)
    }

    pub fn agents(&self) -> &AgentRegistry<A> {
        &self.agents
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    // ── Messages ──────────────────────────────────────────────────────────

    /// Send a message from outside any agent (game logic, triggers, tests).
    ///
    /// With `delay_secs <= 0` the receiver handles it, together with every
    /// immediate send that follows from it, before this returns.
    pub fn dispatch(
        &mut self,
        delay_secs: f64,
        sender:     AgentId,
        receiver:   AgentId,
        message:    A::Message,
    ) -> DispatchReport {
        let before = self.dispatcher.stats();
        let mut recipients = RegistryRecipients::new(&mut self.agents, &self.clock, 0.0);
        self.dispatcher
            .dispatch(self.clock.now, delay_secs, sender, receiver, message, &mut recipients);
        self.dispatcher.flush_deferred(&mut recipients);
        self.dispatcher.stats().since(&before)
    }

    /// Telegrams waiting for a future tick.
    pub fn pending_messages(&self) -> usize {
        self.dispatcher.pending()
    }

    pub fn next_message_due(&self) -> Option<SimTime> {
        self.dispatcher.next_due()
    }

    pub fn dispatch_stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }

    // ── Time ──────────────────────────────────────────────────────────────

    pub fn now(&self) -> SimTime {
        self.clock.now
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Advance by `dt` seconds and run one tick.
    pub fn tick<O: WorldObserver<A>>(&mut self, dt: f64, observer: &mut O) -> TickReport {
        self.clock.advance(dt);
        let (tick, now, dt) = (self.clock.current_tick, self.clock.now, self.clock.last_dt);
        observer.on_tick_start(tick, now);

        let before = self.dispatcher.stats();

        // ── Phase 1: due telegrams ────────────────────────────────────────
        {
            let mut recipients = RegistryRecipients::new(&mut self.agents, &self.clock, dt);
            self.dispatcher.drain_due(now, &mut recipients);
        }

        // ── Phase 2: agent updates ────────────────────────────────────────
        //
        // The id list is copied because the registry is mutated (check-out
        // and restore) while it is walked.
        let ids: Vec<AgentId> = self.agents.ids().to_vec();
        let mut updated = 0;
        for id in ids {
            let Some(mut agent) = self.agents.take(id) else {
                continue;
            };
            {
                let mut ctx = AgentContext::new(now, dt, tick, id, &mut self.agents, &mut self.dispatcher);
                if let Err(e) = agent.update(&mut ctx) {
                    warn!(agent = %id, error = %e, "agent update failed");
                }
            }
            updated += 1;
            if let Err(e) = self.agents.restore(agent) {
                warn!(agent = %id, error = %e, "agent could not be returned to the registry");
            }

            if self.dispatcher.deferred() > 0 {
                let mut recipients = RegistryRecipients::new(&mut self.agents, &self.clock, dt);
                self.dispatcher.flush_deferred(&mut recipients);
            }
        }

        let messages = self.dispatcher.stats().since(&before);
        let report = TickReport { tick, now, updated, messages };
        trace!(tick = tick.0, %now, updated, "tick complete");
        observer.on_tick_end(&report, &self.agents);
        report
    }

    /// Run `n` ticks of `config.world.tick_secs` each.
    pub fn run_ticks<O: WorldObserver<A>>(&mut self, n: u64, observer: &mut O) -> Vec<TickReport> {
        let dt = self.config.world.tick_secs;
        let reports = (0..n).map(|_| self.tick(dt, observer)).collect();
        observer.on_run_end(self.clock.current_tick, &self.dispatcher.stats());
        reports
    }

    /// Run fixed ticks until simulated time reaches `until`.
    pub fn run_until<O: WorldObserver<A>>(&mut self, until: SimTime, observer: &mut O) -> usize {
        let dt = self.config.world.tick_secs;
        let mut ticks = 0;
        while self.clock.now.total_cmp(&until).is_lt() {
            self.tick(dt, observer);
            ticks += 1;
        }
        observer.on_run_end(self.clock.current_tick, &self.dispatcher.stats());
        ticks
    }

    /// Back to time zero with no agents and no queued telegrams.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.agents.clear();
        self.dispatcher.reset();
        self.rng = SimRng::new(self.config.world.seed);
    }
}
