//! `StateMachine` and the transition API.

use std::any::TypeId;
use std::fmt;

use ga_message::{Message, Telegram};
use tracing::debug;

use crate::{FsmError, FsmResult, State};

/// An agent that owns a [`StateMachine`] over itself.
pub trait Stateful: Sized + 'static {
    /// Message vocabulary the agent's states understand.
    type Message: Message;

    /// Whatever the caller hands to every hook: usually the world context
    /// for the current tick (clock, registry view, message dispatcher).
    type Context<'a>;

    fn state_machine(&self) -> &StateMachine<Self>;

    fn state_machine_mut(&mut self) -> &mut StateMachine<Self>;
}

/// Current / previous / global state of one agent.
///
/// Holds only `'static` references to shared states, so it is `Copy`-cheap
/// and carries no per-agent data of its own.
pub struct StateMachine<E: Stateful> {
    current:  Option<&'static dyn State<E>>,
    previous: Option<&'static dyn State<E>>,
    global:   Option<&'static dyn State<E>>,
}

impl<E: Stateful> Default for StateMachine<E> {
    fn default() -> Self {
        Self { current: None, previous: None, global: None }
    }
}

impl<E: Stateful> StateMachine<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Machine whose current state is `initial`.  `initial.enter` is not
    /// called; initialisation is not a transition.
    pub fn with_initial(initial: &'static dyn State<E>) -> Self {
        Self { current: Some(initial), ..Self::default() }
    }

    // ── Initialisation ────────────────────────────────────────────────────
    //
    // These only assign; no hooks run.

    pub fn set_current_state(&mut self, state: &'static dyn State<E>) {
        self.current = Some(state);
    }

    pub fn set_previous_state(&mut self, state: &'static dyn State<E>) {
        self.previous = Some(state);
    }

    pub fn set_global_state(&mut self, state: Option<&'static dyn State<E>>) {
        self.global = state;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn current_state(&self) -> Option<&'static dyn State<E>> {
        self.current
    }

    pub fn previous_state(&self) -> Option<&'static dyn State<E>> {
        self.previous
    }

    pub fn global_state(&self) -> Option<&'static dyn State<E>> {
        self.global
    }

    pub fn current_state_name(&self) -> Option<&'static str> {
        self.current.map(|s| s.name())
    }

    /// `true` if the current state is of concrete type `S`.
    pub fn is_in_state<S: State<E>>(&self) -> bool {
        self.current
            .is_some_and(|s| s.state_type() == TypeId::of::<S>())
    }
}

impl<E: Stateful> fmt::Debug for StateMachine<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current.map(|s| s.name()))
            .field("previous", &self.previous.map(|s| s.name()))
            .field("global", &self.global.map(|s| s.name()))
            .finish()
    }
}

/// State-machine operations, available on every [`Stateful`] agent.
pub trait StateMachineExt: Stateful {
    /// Run the global state's `execute` (if any), then the current state's.
    ///
    /// Both run on every call; a transition made by the global state is
    /// visible to the second step, which executes the new current state.
    fn update_states(&mut self, ctx: &mut Self::Context<'_>) -> FsmResult<()>;

    /// `previous = current; current.exit; current = next; next.enter`.
    fn change_state(
        &mut self,
        next: &'static dyn State<Self>,
        ctx:  &mut Self::Context<'_>,
    ) -> FsmResult<()>;

    /// Transition back to the previous state.
    fn revert_to_previous_state(&mut self, ctx: &mut Self::Context<'_>) -> FsmResult<()>;

    /// Offer `telegram` to the current state, then the global state.
    /// Returns `true` as soon as one of them consumes it.
    fn handle_state_message(
        &mut self,
        telegram: &Telegram<Self::Message>,
        ctx:      &mut Self::Context<'_>,
    ) -> bool;
}

impl<E: Stateful> StateMachineExt for E {
    fn update_states(&mut self, ctx: &mut Self::Context<'_>) -> FsmResult<()> {
        if self.state_machine().current.is_none() {
            return Err(FsmError::NoCurrentState);
        }

        let global = self.state_machine().global;
        if let Some(global) = global {
            global.execute(self, ctx);
        }

        let current = self.state_machine().current;
        if let Some(current) = current {
            current.execute(self, ctx);
        }
        Ok(())
    }

    fn change_state(
        &mut self,
        next: &'static dyn State<Self>,
        ctx:  &mut Self::Context<'_>,
    ) -> FsmResult<()> {
        let current = self.state_machine().current.ok_or(FsmError::NoCurrentState)?;
        debug!(from = current.name(), to = next.name(), "state change");

        self.state_machine_mut().previous = Some(current);
        current.exit(self, ctx);
        self.state_machine_mut().current = Some(next);
        next.enter(self, ctx);
        Ok(())
    }

    fn revert_to_previous_state(&mut self, ctx: &mut Self::Context<'_>) -> FsmResult<()> {
        let previous = self.state_machine().previous.ok_or(FsmError::NoPreviousState)?;
        self.change_state(previous, ctx)
    }

    fn handle_state_message(
        &mut self,
        telegram: &Telegram<Self::Message>,
        ctx:      &mut Self::Context<'_>,
    ) -> bool {
        let current = self.state_machine().current;
        if let Some(current) = current {
            if current.on_message(self, telegram, ctx) {
                return true;
            }
        }

        let global = self.state_machine().global;
        if let Some(global) = global {
            if global.on_message(self, telegram, ctx) {
                return true;
            }
        }

        debug!(
            receiver = %telegram.receiver,
            sender = %telegram.sender,
            kind = telegram.message.kind_name(),
            state = self.state_machine().current_state_name().unwrap_or("<none>"),
            "message not handled by any state"
        );
        false
    }
}
