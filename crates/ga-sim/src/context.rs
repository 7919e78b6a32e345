//! `SimAgent` and the per-call `AgentContext`.

use ga_agent::{Agent, AgentRegistry};
use ga_core::{AgentId, SimClock, SimTime, Tick};
use ga_message::{Delivery, DispatchReport, Dispatcher, Message, Recipients, Telegram};
use tracing::warn;

use crate::SimResult;

/// An agent the [`World`][crate::World] can update and deliver messages to.
///
/// # Determinism contract
///
/// Agents are updated one at a time in ascending id order, and every
/// telegram is delivered in dispatch-time order, so for a given seed and
/// sequence of `tick` calls a world always produces the same run.
pub trait SimAgent: Agent + Sized + 'static {
    type Message: Message;

    /// Per-tick logic: typically `update_states`, regulated arbitration
    /// and sends.
    ///
    /// An error is logged by the world and does not stop the tick.
    fn update(&mut self, ctx: &mut AgentContext<'_, Self>) -> SimResult<()>;

    /// Return `true` if the telegram was consumed.
    fn handle_message(
        &mut self,
        telegram: &Telegram<Self::Message>,
        ctx:      &mut AgentContext<'_, Self>,
    ) -> bool;
}

/// What an agent sees while it runs: the clock, a view of every other
/// agent, and the dispatcher for sends.
///
/// The agent itself is checked out of the registry for the duration of the
/// call, so [`resolve`](Self::resolve) on its own id returns `None`.
pub struct AgentContext<'a, A: SimAgent> {
    pub now: SimTime,
    /// Length of the current tick in seconds (0 outside a tick).
    pub dt: f64,
    pub tick: Tick,
    pub self_id: AgentId,
    agents: &'a mut AgentRegistry<A>,
    dispatcher: &'a mut Dispatcher<A::Message>,
}

impl<'a, A: SimAgent> AgentContext<'a, A> {
    pub fn new(
        now:        SimTime,
        dt:         f64,
        tick:       Tick,
        self_id:    AgentId,
        agents:     &'a mut AgentRegistry<A>,
        dispatcher: &'a mut Dispatcher<A::Message>,
    ) -> Self {
        Self { now, dt, tick, self_id, agents, dispatcher }
    }

    /// Send `message` from this agent.
    ///
    /// `delay_secs <= 0`: the receiver's handler runs before this returns.
    /// Sends to this agent itself, or to an agent further up the current
    /// call stack, cannot enter the receiver yet; they are delivered right
    /// after the agent being updated is put back, within the same tick.
    /// `delay_secs > 0`: queued for `now + delay_secs`.
    pub fn send(&mut self, delay_secs: f64, receiver: AgentId, message: A::Message) -> DispatchReport {
        let mut recipients = RegistryRecipients {
            agents: &mut *self.agents,
            now: self.now,
            tick: self.tick,
            dt: self.dt,
        };
        self.dispatcher
            .dispatch(self.now, delay_secs, self.self_id, receiver, message, &mut recipients)
    }

    /// Look up another agent.
    pub fn resolve(&self, id: AgentId) -> Option<&A> {
        self.agents.resolve(id)
    }

    pub fn agents(&self) -> &AgentRegistry<A> {
        &*self.agents
    }

    /// Every other agent, in ascending id order.
    pub fn others(&self) -> impl Iterator<Item = &A> + '_ {
        self.agents.iter()
    }

    /// Telegrams parked for busy receivers, this agent's self-sends included.
    pub fn deferred(&self) -> usize {
        self.dispatcher.deferred()
    }
}

// ── Delivery into the registry ────────────────────────────────────────────────

/// Resolves receivers in the registry at delivery time and runs their
/// message handlers with the receiver checked out.
pub(crate) struct RegistryRecipients<'w, A: SimAgent> {
    agents: &'w mut AgentRegistry<A>,
    now: SimTime,
    tick: Tick,
    dt: f64,
}

impl<'w, A: SimAgent> RegistryRecipients<'w, A> {
    pub(crate) fn new(agents: &'w mut AgentRegistry<A>, clock: &SimClock, dt: f64) -> Self {
        Self { agents, now: clock.now, tick: clock.current_tick, dt }
    }
}

impl<A: SimAgent> Recipients<A::Message> for RegistryRecipients<'_, A> {
    fn deliver(&mut self, telegram: &Telegram<A::Message>, dispatcher: &mut Dispatcher<A::Message>) -> Delivery {
        let id = telegram.receiver;
        let Some(mut receiver) = self.agents.take(id) else {
            return if self.agents.contains(id) { Delivery::Busy } else { Delivery::NoReceiver };
        };
        let handled = {
            let mut ctx = AgentContext::new(self.now, self.dt, self.tick, id, &mut *self.agents, dispatcher);
            receiver.handle_message(telegram, &mut ctx)
        };
        if let Err(e) = self.agents.restore(receiver) {
            warn!(agent = %id, error = %e, "receiver could not be returned to the registry");
        }
        if handled { Delivery::Handled } else { Delivery::Unhandled }
    }
}
