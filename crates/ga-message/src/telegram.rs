//! `Telegram` — one addressed, timestamped message.

use ga_core::{AgentId, SimTime};

use crate::Message;

/// Dispatch-time window, in seconds, inside which two otherwise identical
/// telegrams are considered the same event.
pub const DEFAULT_DEDUP_TOLERANCE: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct Telegram<M> {
    pub sender: AgentId,
    pub receiver: AgentId,
    pub message: M,
    /// When the telegram is (or was) due for delivery.  For immediate sends
    /// this is the send time.
    pub dispatch_time: SimTime,
}

impl<M: Message> Telegram<M> {
    pub fn new(sender: AgentId, receiver: AgentId, message: M, dispatch_time: SimTime) -> Self {
        Self { sender, receiver, message, dispatch_time }
    }

    /// Same sender, receiver and message kind, with dispatch times less than
    /// `tolerance_secs` apart.  Payloads are not compared.
    ///
    /// The relation is not transitive: `a ~ b` and `b ~ c` does not imply
    /// `a ~ c` when the three times straddle the window.
    pub fn is_duplicate_of(&self, other: &Self, tolerance_secs: f64) -> bool {
        self.sender == other.sender
            && self.receiver == other.receiver
            && self.message.same_kind(&other.message)
            && (self.dispatch_time - other.dispatch_time).abs() < tolerance_secs
    }
}

/// Equality is the duplicate relation at [`DEFAULT_DEDUP_TOLERANCE`].
///
/// The dispatcher itself uses the tolerance from its configuration; this
/// impl exists for callers comparing telegrams directly.
impl<M: Message> PartialEq for Telegram<M> {
    fn eq(&self, other: &Self) -> bool {
        self.is_duplicate_of(other, DEFAULT_DEDUP_TOLERANCE)
    }
}
