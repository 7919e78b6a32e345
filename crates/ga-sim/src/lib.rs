//! `ga-sim` — the world that runs agents, state machines and messages.
//!
//! # Tick loop
//!
//! ```text
//! tick(dt):
//!   ① Clock     — now += dt
//!   ② Messages  — deliver every delayed telegram due at or before `now`,
//!                 in dispatch-time order, nested sends handled inline
//!   ③ Updates   — for each agent in ascending AgentId order:
//!                   check out → SimAgent::update(ctx) → restore
//!                   → deliver sends that were waiting for it
//! ```
//!
//! `ctx.send(0.0, …)` is synchronous: the receiver is checked out, its
//! handler runs (and may send on, depth-first), it is restored, and only
//! then does `send` return.  A receiver that is already checked out (the
//! sender itself, or a handler further up the stack) is the exception;
//! its telegram is parked and delivered once the agent being updated has
//! been put back, still within the tick.
//!
//! Agents reach the rest of the world only through [`AgentContext`]: a
//! view of the other agents plus a handle to the dispatcher.  A `SimAgent` that
//! also implements [`ga_fsm::Stateful`] with
//! `type Context<'a> = AgentContext<'a, Self>` gets state machine hooks that
//! can send messages and inspect other agents.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut world = WorldBuilder::new().agent(a).agent(b).build()?;
//! world.dispatch(0.0, a_id, b_id, GameMessage::TakeDamage { amount: 10 });
//! world.run_ticks(60, &mut NoopObserver);
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod observer;
pub mod world;


pub use builder::WorldBuilder;
pub use context::{AgentContext, SimAgent};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, WorldObserver};
pub use world::{TickReport, World};
