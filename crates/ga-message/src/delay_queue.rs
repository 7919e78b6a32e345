//! `DelayQueue` — telegrams waiting for their dispatch time.
//!
//! # Ordering
//!
//! A binary min-heap on `(dispatch_time, sequence)`.  The sequence number
//! is assigned at push time, so telegrams due at the same instant come out
//! in the order they were sent.  Only the head ever needs checking: if it is
//! not yet due, nothing behind it is.
//!
//! # Duplicates
//!
//! With a dedup tolerance configured, a push that
//! [duplicates](crate::Telegram::is_duplicate_of) any telegram already
//! waiting is refused.  The check is a linear scan; queues stay small
//! because they only hold in-flight delayed messages.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ga_core::SimTime;

use crate::{Message, Telegram};

/// Result of [`DelayQueue::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueue {
    Queued,
    /// An equivalent telegram is already waiting; this one was dropped.
    Duplicate,
    /// The queue is at capacity; this one was dropped.
    Full,
}

struct Pending<M> {
    seq: u64,
    telegram: Telegram<M>,
}

impl<M> PartialEq for Pending<M> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<M> Eq for Pending<M> {}

impl<M> PartialOrd for Pending<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M> Ord for Pending<M> {
    /// Reversed so `BinaryHeap` (a max-heap) pops the earliest telegram.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .telegram
            .dispatch_time
            .total_cmp(&self.telegram.dispatch_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct DelayQueue<M> {
    heap: BinaryHeap<Pending<M>>,
    next_seq: u64,
    dedup_tolerance: Option<f64>,
    capacity: usize,
}

impl<M: Message> DelayQueue<M> {
    /// `dedup_tolerance`: see [`DispatchConfig`](ga_core::DispatchConfig);
    /// `capacity`: maximum number of waiting telegrams.
    pub fn new(dedup_tolerance: Option<f64>, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            dedup_tolerance,
            capacity,
        }
    }

    pub fn push(&mut self, telegram: Telegram<M>) -> Enqueue {
        if let Some(tol) = self.dedup_tolerance {
            if self.heap.iter().any(|p| p.telegram.is_duplicate_of(&telegram, tol)) {
                return Enqueue::Duplicate;
            }
        }
        if self.heap.len() >= self.capacity {
            return Enqueue::Full;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Pending { seq, telegram });
        Enqueue::Queued
    }

    /// Dispatch time of the earliest waiting telegram.
    pub fn next_due(&self) -> Option<SimTime> {
        self.heap.peek().map(|p| p.telegram.dispatch_time)
    }

    /// Remove and return the head if it is due at `now`.
    pub fn pop_due(&mut self, now: SimTime) -> Option<Telegram<M>> {
        let due = self.heap.peek()?.telegram.dispatch_time.total_cmp(&now).is_le();
        if !due {
            return None;
        }
        self.heap.pop().map(|p| p.telegram)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}
