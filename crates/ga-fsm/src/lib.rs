//! `ga-fsm` — per-agent state machines over shared, stateless states.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`state`]   | `State<E>` trait — enter / execute / exit / on_message hooks    |
//! | [`machine`] | `StateMachine<E>`, `Stateful`, `StateMachineExt`                |
//! | [`error`]   | `FsmError`, `FsmResult<T>`                                      |
//!
//! # Design notes
//!
//! A state is a `'static` value, usually a unit struct, shared by every
//! agent of a type:
//!
//! ```rust,ignore
//! struct Patrol;
//! impl State<Guard> for Patrol { /* ... */ }
//! static PATROL: Patrol = Patrol;
//!
//! guard.change_state(&PATROL, ctx)?;
//! ```
//!
//! Hooks receive the agent (`&mut E`) and the caller's context, so all
//! per-agent data lives in the agent.  A state that stores per-agent data
//! on itself would leak it across every agent sharing that state; the
//! `Send + Sync + 'static` bound and the `&self` receivers make that
//! awkward on purpose.
//!
//! The machine is stored inside the agent, and transitions are methods on
//! the agent (via [`StateMachineExt`]) rather than on the machine: a hook
//! needs `&mut E`, which a `&mut StateMachine` borrowed out of `E` could not
//! provide.

pub mod error;
pub mod machine;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{FsmError, FsmResult};
pub use machine::{StateMachine, StateMachineExt, Stateful};
pub use state::State;
