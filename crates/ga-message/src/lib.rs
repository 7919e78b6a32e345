//! `ga-message` — point-to-point telegrams with immediate or delayed delivery.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`message`]     | `Message` trait, `GameMessage` (kind + payload enum)     |
//! | [`telegram`]    | `Telegram<M>` and its duplicate-within-tolerance relation |
//! | [`delay_queue`] | `DelayQueue<M>` — min-heap keyed by dispatch time        |
//! | [`dispatcher`]  | `Dispatcher<M>`, `Recipients` trait, `DispatchReport`    |
//! | [`error`]       | `MessageError`, `MessageResult<T>`                       |
//!
//! # Delivery model (summary)
//!
//! ```text
//! dispatch(delay <= 0) ─► resolve receiver by id ─► handler runs now
//!                          └─ receiver busy ─► deferred FIFO
//! dispatch(delay  > 0) ─► DelayQueue (dispatch_time = now + delay)
//! drain_due(now)       ─► pop every head with dispatch_time <= now ─► deliver
//! flush_deferred()     ─► retry parked telegrams once their receiver is back
//! ```
//!
//! Handlers get the dispatcher back through [`Recipients::deliver`], so a
//! zero-delay send from inside a handler runs the next receiver's handler
//! before the send returns.  Fan-out is therefore depth-first, and a chain
//! of zero-delay replies between two agents nests until `max_depth`.

pub mod delay_queue;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod telegram;

#[cfg(test)]
mod tests;

pub use delay_queue::{DelayQueue, Enqueue};
pub use dispatcher::{Delivery, DispatchReport, DispatchStats, Dispatcher, Recipients};
pub use error::{MessageError, MessageResult};
pub use message::{GameMessage, Message};
pub use telegram::{DEFAULT_DEDUP_TOLERANCE, Telegram};
