//! `Dispatcher` — routes telegrams to receivers now or later.
//!
//! Zero-delay telegrams are delivered synchronously: the receiver's handler
//! runs before `dispatch` returns, and anything it sends immediately runs
//! inside that, depth-first.  Nesting is bounded by `max_depth`.
//!
//! A receiver that is registered but currently busy (it is the agent being
//! updated, or a handler further up the stack) cannot take a telegram
//! re-entrantly.  Those telegrams are parked in a deferred FIFO and handed
//! over by [`Dispatcher::flush_deferred`] once the receiver is back.

use std::collections::VecDeque;

use ga_core::{AgentId, DispatchConfig, SimTime};
use tracing::{debug, trace, warn};

use crate::{DelayQueue, Enqueue, Message, MessageError, MessageResult, Telegram};

/// Outcome of handing one telegram to its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The receiver consumed the message.
    Handled,
    /// The receiver exists but nothing in it consumed the message.
    Unhandled,
    /// The receiver is registered but cannot be entered right now.
    Busy,
    /// No agent with the receiver id is registered.
    NoReceiver,
}

/// Resolves receiver ids and invokes their message handlers.
///
/// Implemented by the world around its agent registry.  Resolution happens
/// here, at delivery time, so a receiver removed after a delayed send is
/// simply [`Delivery::NoReceiver`].  The handler gets the dispatcher back
/// so its own zero-delay sends are delivered before `deliver` returns.
pub trait Recipients<M> {
    fn deliver(&mut self, telegram: &Telegram<M>, dispatcher: &mut Dispatcher<M>) -> Delivery;
}

/// What one `dispatch` / `flush_deferred` / `drain_due` call did, nested
/// deliveries included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Telegrams handed to an existing receiver (handled or not).
    pub delivered: usize,
    /// Telegrams placed in the delay queue.
    pub queued: usize,
    /// Telegrams parked until a busy receiver is available.
    pub deferred: usize,
    /// Telegrams dropped: missing receiver, duplicate, full queue or
    /// nesting too deep.
    pub dropped: usize,
}

/// Running totals since construction or the last [`Dispatcher::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub unhandled: u64,
    pub queued: u64,
    pub deferred: u64,
    pub missing_receiver: u64,
    pub deduplicated: u64,
    pub queue_full: u64,
    pub depth_overflow: u64,
}

impl DispatchStats {
    pub fn dropped(&self) -> u64 {
        self.missing_receiver + self.deduplicated + self.queue_full + self.depth_overflow
    }

    /// Everything counted since `earlier`, as a report.
    pub fn since(&self, earlier: &DispatchStats) -> DispatchReport {
        DispatchReport {
            delivered: self.delivered.saturating_sub(earlier.delivered) as usize,
            queued: self.queued.saturating_sub(earlier.queued) as usize,
            deferred: self.deferred.saturating_sub(earlier.deferred) as usize,
            dropped: self.dropped().saturating_sub(earlier.dropped()) as usize,
        }
    }
}

pub struct Dispatcher<M> {
    queue: DelayQueue<M>,
    deferred: VecDeque<Telegram<M>>,
    max_pending: usize,
    max_depth: usize,
    depth: usize,
    stats: DispatchStats,
}

impl<M: Message> Dispatcher<M> {
    pub fn new(config: &DispatchConfig) -> MessageResult<Self> {
        if config.max_depth == 0 || config.max_pending == 0 {
            return Err(MessageError::Config(
                "max_depth and max_pending must both be > 0".into(),
            ));
        }
        if let Some(tol) = config.dedup_tolerance_secs {
            if !(tol >= 0.0) {
                return Err(MessageError::Config(format!("invalid dedup tolerance {tol}")));
            }
        }
        Ok(Self {
            queue: DelayQueue::new(config.dedup_tolerance_secs, config.max_pending),
            deferred: VecDeque::new(),
            max_pending: config.max_pending,
            max_depth: config.max_depth,
            depth: 0,
            stats: DispatchStats::default(),
        })
    }

    /// Send `message` from `sender` to `receiver`.
    ///
    /// `delay_secs <= 0`: delivered before this call returns, together with
    /// everything the receiver's handler sends immediately in turn.  A busy
    /// receiver gets it from the next [`flush_deferred`](Self::flush_deferred).
    /// `delay_secs > 0`: queued for `now + delay_secs`; the receiver is not
    /// looked up until then.
    pub fn dispatch<R: Recipients<M>>(
        &mut self,
        now:          SimTime,
        delay_secs:   f64,
        sender:       AgentId,
        receiver:     AgentId,
        message:      M,
        recipients:   &mut R,
    ) -> DispatchReport {
        let before = self.stats;
        if delay_secs > 0.0 {
            self.enqueue(Telegram::new(sender, receiver, message, now + delay_secs));
        } else {
            let telegram = Telegram::new(sender, receiver, message, now);
            self.deliver_now(telegram, recipients);
        }
        self.stats.since(&before)
    }

    /// Retry every telegram parked for a busy receiver, in the order they
    /// were parked.  Telegrams parked again during the flush (a receiver
    /// sending to itself from its handler) wait for the next flush.
    pub fn flush_deferred<R: Recipients<M>>(&mut self, recipients: &mut R) -> DispatchReport {
        let before = self.stats;
        let batch = self.deferred.len();
        for _ in 0..batch {
            let Some(telegram) = self.deferred.pop_front() else { break };
            self.deliver_now(telegram, recipients);
        }
        self.stats.since(&before)
    }

    /// Deliver every queued telegram whose dispatch time is `<= now`, in
    /// dispatch-time order.  Each delivery's nested sends complete, and
    /// anything it parked is flushed, before the next queued telegram is
    /// popped.
    pub fn drain_due<R: Recipients<M>>(&mut self, now: SimTime, recipients: &mut R) -> DispatchReport {
        let before = self.stats;
        while let Some(telegram) = self.queue.pop_due(now) {
            self.deliver_now(telegram, recipients);
            self.flush_deferred(recipients);
        }
        self.stats.since(&before)
    }

    /// Telegrams waiting in the delay queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Telegrams parked for a busy receiver.
    pub fn deferred(&self) -> usize {
        self.deferred.len()
    }

    /// How many deliveries are on the stack right now.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Dispatch time of the next queued telegram.
    pub fn next_due(&self) -> Option<SimTime> {
        self.queue.next_due()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Forget all queued and parked telegrams and statistics.  Called
    /// between runs.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.deferred.clear();
        self.depth = 0;
        self.stats = DispatchStats::default();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn enqueue(&mut self, telegram: Telegram<M>) {
        let kind = telegram.message.kind_name();
        let (sender, receiver) = (telegram.sender, telegram.receiver);
        match self.queue.push(telegram) {
            Enqueue::Queued => self.stats.queued += 1,
            Enqueue::Duplicate => {
                debug!(%sender, %receiver, kind, "duplicate delayed telegram dropped");
                self.stats.deduplicated += 1;
            }
            Enqueue::Full => {
                warn!(%sender, %receiver, kind, pending = self.queue.len(), "delay queue full, telegram dropped");
                self.stats.queue_full += 1;
            }
        }
    }

    fn deliver_now<R: Recipients<M>>(&mut self, telegram: Telegram<M>, recipients: &mut R) {
        let kind = telegram.message.kind_name();
        let (sender, receiver) = (telegram.sender, telegram.receiver);

        if self.depth >= self.max_depth {
            warn!(%sender, %receiver, kind, limit = self.max_depth, "immediate delivery nested too deep, telegram dropped");
            self.stats.depth_overflow += 1;
            return;
        }

        self.depth += 1;
        let outcome = recipients.deliver(&telegram, self);
        self.depth -= 1;

        match outcome {
            Delivery::Handled => {
                trace!(%sender, %receiver, kind, depth = self.depth, "delivered");
                self.stats.delivered += 1;
            }
            Delivery::Unhandled => {
                debug!(%sender, %receiver, kind, "message not handled");
                self.stats.delivered += 1;
                self.stats.unhandled += 1;
            }
            Delivery::Busy => {
                if self.deferred.len() >= self.max_pending {
                    warn!(%sender, %receiver, kind, "deferred queue full, telegram dropped");
                    self.stats.queue_full += 1;
                } else {
                    trace!(%sender, %receiver, kind, "receiver busy, telegram deferred");
                    self.deferred.push_back(telegram);
                    self.stats.deferred += 1;
                }
            }
            Delivery::NoReceiver => {
                warn!(%sender, %receiver, kind, "no receiver with this id");
                self.stats.missing_receiver += 1;
            }
        }
    }
}
