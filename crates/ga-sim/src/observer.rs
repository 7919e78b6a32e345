//! World observer trait for progress reporting and data collection.

use ga_agent::AgentRegistry;
use ga_core::{SimTime, Tick};
use ga_message::DispatchStats;

use crate::{SimAgent, TickReport};

/// Callbacks invoked by [`World::tick`][crate::World::tick] and the run
/// helpers.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: kill counter
///
/// ```rust,ignore
/// struct Deaths(usize);
///
/// impl WorldObserver<Bot> for Deaths {
///     fn on_tick_end(&mut self, _report: &TickReport, agents: &AgentRegistry<Bot>) {
///         self.0 = agents.iter().filter(|b| b.is_dead()).count();
///     }
/// }
/// ```
pub trait WorldObserver<A: SimAgent> {
    /// Called after the clock advances, before any delivery or update.
    fn on_tick_start(&mut self, _tick: Tick, _now: SimTime) {}

    /// Called once every agent has been updated and every send routed.
    fn on_tick_end(&mut self, _report: &TickReport, _agents: &AgentRegistry<A>) {}

    /// Called once at the end of `run_ticks` / `run_until`.
    fn on_run_end(&mut self, _final_tick: Tick, _stats: &DispatchStats) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl<A: SimAgent> WorldObserver<A> for NoopObserver {}
