//! Unit tests for ga-message.

use std::collections::{HashMap, HashSet};

use ga_core::{AgentId, DispatchConfig, SimTime, Vector2D};

use crate::{Delivery, Dispatcher, GameMessage, Recipients, Telegram};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A receiver that records what it got and optionally sends on.
#[derive(Default)]
struct Inbox {
    received: Vec<(GameMessage, SimTime)>,
    /// Reply to every `Wait` with an immediate `Wait` back to the sender.
    ping_pong: bool,
    /// Pass every `Wait` on to these agents, immediately and in order.
    forward: Vec<AgentId>,
    /// Refuse to handle anything.
    deaf: bool,
}

#[derive(Default)]
struct Agents {
    inboxes: HashMap<AgentId, Inbox>,
    /// Registered but not enterable, like an agent mid-update.
    busy: HashSet<AgentId>,
    /// Global delivery order, for interleaving checks.
    log: Vec<AgentId>,
    /// Dispatcher depth seen by each delivery.
    depths: Vec<usize>,
}

impl Agents {
    fn with(ids: &[u32]) -> Self {
        let mut agents = Agents::default();
        for &id in ids {
            agents.inboxes.insert(AgentId(id), Inbox::default());
        }
        agents
    }

    fn received(&self, id: u32) -> &[(GameMessage, SimTime)] {
        &self.inboxes[&AgentId(id)].received
    }
}

impl Recipients<GameMessage> for Agents {
    fn deliver(
        &mut self,
        telegram: &Telegram<GameMessage>,
        dispatcher: &mut Dispatcher<GameMessage>,
    ) -> Delivery {
        let me = telegram.receiver;
        if self.busy.contains(&me) {
            return Delivery::Busy;
        }
        let Some(inbox) = self.inboxes.get_mut(&me) else {
            return Delivery::NoReceiver;
        };
        self.log.push(me);
        self.depths.push(dispatcher.depth());
        if inbox.deaf {
            return Delivery::Unhandled;
        }
        inbox.received.push((telegram.message.clone(), telegram.dispatch_time));
        if telegram.message != GameMessage::Wait {
            return Delivery::Handled;
        }

        let mut targets = inbox.forward.clone();
        if inbox.ping_pong {
            targets.push(telegram.sender);
        }
        for to in targets {
            dispatcher.dispatch(telegram.dispatch_time, 0.0, me, to, GameMessage::Wait, &mut *self);
        }
        Delivery::Handled
    }
}

fn dispatcher() -> Dispatcher<GameMessage> {
    Dispatcher::new(&DispatchConfig::default()).unwrap()
}

fn dispatcher_with(config: DispatchConfig) -> Dispatcher<GameMessage> {
    Dispatcher::new(&config).unwrap()
}

const A: AgentId = AgentId(1);
const B: AgentId = AgentId(2);
const C: AgentId = AgentId(3);
const D: AgentId = AgentId(4);

// ── Telegram ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod telegram_tests {
    use super::*;

    fn hit(at: f64, amount: u32) -> Telegram<GameMessage> {
        Telegram::new(A, B, GameMessage::TakeDamage { amount }, SimTime(at))
    }

    #[test]
    fn equal_within_quarter_second() {
        assert_eq!(hit(1.0, 10), hit(1.2, 10));
    }

    #[test]
    fn payload_is_ignored() {
        assert_eq!(hit(1.0, 10), hit(1.1, 99));
    }

    #[test]
    fn not_equal_outside_window() {
        assert_ne!(hit(1.0, 10), hit(1.3, 10));
    }

    #[test]
    fn kind_sender_receiver_must_match() {
        let other_kind = Telegram::new(A, B, GameMessage::YouGotMe, SimTime(1.0));
        assert_ne!(hit(1.0, 10), other_kind);
        let swapped = Telegram::new(B, A, GameMessage::TakeDamage { amount: 10 }, SimTime(1.0));
        assert_ne!(hit(1.0, 10), swapped);
    }

    #[test]
    fn custom_tolerance() {
        assert!(hit(1.0, 1).is_duplicate_of(&hit(1.9, 1), 1.0));
        assert!(!hit(1.0, 1).is_duplicate_of(&hit(1.0, 1), 0.0));
    }
}

// ── Immediate delivery ────────────────────────────────────────────────────────

#[cfg(test)]
mod immediate_tests {
    use super::*;

    #[test]
    fn zero_delay_delivers_before_return() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[1, 2]);
        let report = d.dispatch(SimTime(0.0), 0.0, A, B, GameMessage::GoHome, &mut agents);
        assert_eq!(report.delivered, 1);
        assert_eq!(agents.received(2), &[(GameMessage::GoHome, SimTime(0.0))]);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn negative_delay_is_immediate() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(3.0), -1.0, A, B, GameMessage::Wait, &mut agents);
        assert_eq!(agents.received(2).len(), 1);
    }

    #[test]
    fn unregistered_receiver_is_noop() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[1]);
        let report = d.dispatch(SimTime(0.0), 0.0, A, AgentId(99), GameMessage::Wait, &mut agents);
        assert_eq!(report.delivered, 0);
        assert_eq!(report.dropped, 1);
        assert_eq!(d.stats().missing_receiver, 1);
        assert!(agents.received(1).is_empty());
    }

    #[test]
    fn unhandled_counts_as_delivered() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        agents.inboxes.get_mut(&B).unwrap().deaf = true;
        let report = d.dispatch(SimTime(0.0), 0.0, A, B, GameMessage::Wait, &mut agents);
        assert_eq!(report.delivered, 1);
        assert_eq!(d.stats().unhandled, 1);
    }

    #[test]
    fn ping_pong_nests_until_depth_bound() {
        let mut d = dispatcher_with(DispatchConfig { max_depth: 6, ..Default::default() });
        let mut agents = Agents::with(&[1, 2]);
        agents.inboxes.get_mut(&A).unwrap().ping_pong = true;
        agents.inboxes.get_mut(&B).unwrap().ping_pong = true;

        let report = d.dispatch(SimTime(0.0), 0.0, A, B, GameMessage::Wait, &mut agents);

        // Six nested deliveries, then the seventh bounce is too deep.
        assert_eq!(report.delivered, 6);
        assert_eq!(report.dropped, 1);
        assert_eq!(agents.log, vec![B, A, B, A, B, A]);
        assert_eq!(agents.depths, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(d.stats().depth_overflow, 1);
        assert_eq!(d.depth(), 0);
    }

    #[test]
    fn fan_out_is_depth_first() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[1, 2, 3, 4]);
        agents.inboxes.get_mut(&A).unwrap().forward = vec![B, C];
        agents.inboxes.get_mut(&B).unwrap().forward = vec![D];

        let report = d.dispatch(SimTime(0.0), 0.0, AgentId(9), A, GameMessage::Wait, &mut agents);

        // B's forward to D completes before A moves on to C.
        assert_eq!(agents.log, vec![A, B, D, C]);
        assert_eq!(agents.depths, vec![1, 2, 3, 2]);
        assert_eq!(report.delivered, 4);
    }

    #[test]
    fn nested_send_is_handled_before_it_returns() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[1, 2]);
        agents.inboxes.get_mut(&A).unwrap().forward = vec![B];

        d.dispatch(SimTime(2.0), 0.0, AgentId(9), A, GameMessage::Wait, &mut agents);

        // Nested telegrams are stamped with the outer dispatch time.
        assert_eq!(agents.received(2), &[(GameMessage::Wait, SimTime(2.0))]);
        assert_eq!(d.deferred(), 0);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn busy_receiver_is_deferred_until_flush() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[1, 2]);
        agents.busy.insert(B);

        let report = d.dispatch(SimTime(0.0), 0.0, A, B, GameMessage::PathReady, &mut agents);
        assert_eq!(report.deferred, 1);
        assert_eq!(report.delivered, 0);
        assert!(agents.received(2).is_empty());
        assert_eq!(d.deferred(), 1);

        // Still busy: parked again, nothing lost.
        d.flush_deferred(&mut agents);
        assert_eq!(d.deferred(), 1);

        agents.busy.clear();
        let report = d.flush_deferred(&mut agents);
        assert_eq!(report.delivered, 1);
        assert_eq!(agents.received(2), &[(GameMessage::PathReady, SimTime(0.0))]);
        assert_eq!(d.deferred(), 0);
    }

    #[test]
    fn flush_keeps_parked_order() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        agents.busy.insert(B);
        d.dispatch(SimTime(0.0), 0.0, A, B, GameMessage::GoHome, &mut agents);
        d.dispatch(SimTime(0.0), 0.0, A, B, GameMessage::Wait, &mut agents);
        d.dispatch(SimTime(0.0), 0.0, A, B, GameMessage::PlayerReady, &mut agents);

        agents.busy.clear();
        d.flush_deferred(&mut agents);
        let kinds: Vec<GameMessage> = agents.received(2).iter().map(|(m, _)| m.clone()).collect();
        assert_eq!(kinds, vec![GameMessage::GoHome, GameMessage::Wait, GameMessage::PlayerReady]);
    }

    #[test]
    fn delayed_send_from_handler_is_queued() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(1.0), 0.0, A, B, GameMessage::PathReady, &mut agents);
        let report = d.dispatch(SimTime(1.0), 2.0, A, B, GameMessage::NoPathAvailable, &mut agents);
        assert_eq!(report.queued, 1);
        assert_eq!(d.next_due(), Some(SimTime(3.0)));
        assert_eq!(d.stats().queued, 1);
    }
}

// ── Delayed delivery ──────────────────────────────────────────────────────────

#[cfg(test)]
mod delayed_tests {
    use super::*;

    #[test]
    fn not_delivered_before_due_delivered_after() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        let report = d.dispatch(SimTime(0.0), 1.5, A, B, GameMessage::OpenSesame, &mut agents);
        assert_eq!(report.queued, 1);
        assert!(agents.received(2).is_empty());

        d.drain_due(SimTime(1.0), &mut agents);
        assert!(agents.received(2).is_empty());

        let report = d.drain_due(SimTime(1.5), &mut agents);
        assert_eq!(report.delivered, 1);
        assert_eq!(agents.received(2), &[(GameMessage::OpenSesame, SimTime(1.5))]);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn drained_in_dispatch_time_order() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(0.0), 3.0, A, B, GameMessage::GoHome, &mut agents);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::Wait, &mut agents);
        d.dispatch(SimTime(0.0), 2.0, A, B, GameMessage::PlayerReady, &mut agents);

        d.drain_due(SimTime(10.0), &mut agents);
        let times: Vec<f64> = agents.received(2).iter().map(|(_, t)| t.secs()).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn same_time_keeps_send_order() {
        let mut d = dispatcher_with(DispatchConfig { dedup_tolerance_secs: None, ..Default::default() });
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::GoHome, &mut agents);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::Wait, &mut agents);
        d.drain_due(SimTime(1.0), &mut agents);
        let kinds: Vec<GameMessage> = agents.received(2).iter().map(|(m, _)| m.clone()).collect();
        assert_eq!(kinds, vec![GameMessage::GoHome, GameMessage::Wait]);
    }

    #[test]
    fn receiver_removed_before_delivery_is_dropped() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::Wait, &mut agents);
        agents.inboxes.remove(&B);
        let report = d.drain_due(SimTime(2.0), &mut agents);
        assert_eq!(report.dropped, 1);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn duplicates_within_tolerance_are_dropped() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        let msg = GameMessage::GunshotSound { origin: Vector2D::ZERO };
        d.dispatch(SimTime(0.0), 1.0, A, B, msg.clone(), &mut agents);
        let report = d.dispatch(SimTime(0.1), 1.0, A, B, msg.clone(), &mut agents);
        assert_eq!(report.dropped, 1);
        assert_eq!(d.pending(), 1);
        assert_eq!(d.stats().deduplicated, 1);

        // Outside the window it queues normally.
        d.dispatch(SimTime(0.5), 1.0, A, B, msg, &mut agents);
        assert_eq!(d.pending(), 2);
    }

    #[test]
    fn dedup_can_be_disabled() {
        let mut d = dispatcher_with(DispatchConfig { dedup_tolerance_secs: None, ..Default::default() });
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::Wait, &mut agents);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::Wait, &mut agents);
        assert_eq!(d.pending(), 2);
    }

    #[test]
    fn full_queue_drops() {
        let mut d = dispatcher_with(DispatchConfig { max_pending: 1, ..Default::default() });
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::Wait, &mut agents);
        let report = d.dispatch(SimTime(0.0), 5.0, A, B, GameMessage::GoHome, &mut agents);
        assert_eq!(report.dropped, 1);
        assert_eq!(d.stats().queue_full, 1);
    }

    #[test]
    fn reset_clears_queue_and_stats() {
        let mut d = dispatcher();
        let mut agents = Agents::with(&[2]);
        d.dispatch(SimTime(0.0), 1.0, A, B, GameMessage::Wait, &mut agents);
        d.dispatch(SimTime(0.0), 0.0, A, AgentId(50), GameMessage::Wait, &mut agents);
        d.reset();
        assert_eq!(d.pending(), 0);
        assert_eq!(d.stats(), Default::default());
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn zero_bounds_rejected() {
        assert!(Dispatcher::<GameMessage>::new(&DispatchConfig { max_depth: 0, ..Default::default() }).is_err());
        assert!(Dispatcher::<GameMessage>::new(&DispatchConfig { max_pending: 0, ..Default::default() }).is_err());
        assert!(
            Dispatcher::<GameMessage>::new(&DispatchConfig {
                dedup_tolerance_secs: Some(-1.0),
                ..Default::default()
            })
            .is_err()
        );
    }
}
