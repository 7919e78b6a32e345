//! Unit tests for ga-fsm.

use ga_core::{AgentId, SimTime};
use ga_message::{GameMessage, Telegram};

use crate::{State, StateMachine, StateMachineExt, Stateful};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal agent: records every hook invocation.
#[derive(Default)]
struct Miner {
    fsm:     StateMachine<Miner>,
    log:     Vec<String>,
    gold:    u32,
    fatigue: u32,
}

/// Per-call context; counts hook calls made through it.
#[derive(Default)]
struct Ctx {
    calls: u32,
}

impl Stateful for Miner {
    type Message = GameMessage;
    type Context<'a> = Ctx;

    fn state_machine(&self) -> &StateMachine<Self> {
        &self.fsm
    }
    fn state_machine_mut(&mut self) -> &mut StateMachine<Self> {
        &mut self.fsm
    }
}

struct Digging;
struct Resting;
struct Watchful;

static DIGGING: Digging = Digging;
static RESTING: Resting = Resting;
static WATCHFUL: Watchful = Watchful;

impl State<Miner> for Digging {
    fn name(&self) -> &'static str {
        "Digging"
    }
    fn enter(&self, m: &mut Miner, ctx: &mut Ctx) {
        ctx.calls += 1;
        m.log.push("enter:Digging".into());
    }
    fn execute(&self, m: &mut Miner, ctx: &mut Ctx) {
        ctx.calls += 1;
        m.log.push("execute:Digging".into());
        m.gold += 1;
        m.fatigue += 1;
    }
    fn exit(&self, m: &mut Miner, ctx: &mut Ctx) {
        ctx.calls += 1;
        m.log.push("exit:Digging".into());
    }
    fn on_message(&self, m: &mut Miner, t: &Telegram<GameMessage>, _ctx: &mut Ctx) -> bool {
        match t.message {
            GameMessage::Wait | GameMessage::PathReady => {
                m.log.push("msg:Digging".into());
                true
            }
            _ => false,
        }
    }
}

impl State<Miner> for Resting {
    fn name(&self) -> &'static str {
        "Resting"
    }
    fn enter(&self, m: &mut Miner, _ctx: &mut Ctx) {
        m.log.push("enter:Resting".into());
    }
    fn execute(&self, m: &mut Miner, _ctx: &mut Ctx) {
        m.log.push("execute:Resting".into());
        m.fatigue = m.fatigue.saturating_sub(1);
    }
    fn exit(&self, m: &mut Miner, _ctx: &mut Ctx) {
        m.log.push("exit:Resting".into());
    }
}

/// Global state: forces a rest when fatigue reaches 3.
impl State<Miner> for Watchful {
    fn name(&self) -> &'static str {
        "Watchful"
    }
    fn execute(&self, m: &mut Miner, ctx: &mut Ctx) {
        m.log.push("execute:Watchful".into());
        if m.fatigue >= 3 && !m.fsm.is_in_state::<Resting>() {
            m.change_state(&RESTING, ctx).unwrap();
        }
    }
    fn on_message(&self, m: &mut Miner, t: &Telegram<GameMessage>, _ctx: &mut Ctx) -> bool {
        match t.message {
            GameMessage::GoHome | GameMessage::PathReady => {
                m.log.push("msg:Watchful".into());
                true
            }
            _ => false,
        }
    }
}

fn miner_in(state: &'static dyn State<Miner>) -> Miner {
    Miner { fsm: StateMachine::with_initial(state), ..Default::default() }
}

fn telegram(message: GameMessage) -> Telegram<GameMessage> {
    Telegram::new(AgentId(0), AgentId(1), message, SimTime::ZERO)
}

// ── update ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod update_tests {
    use super::*;
    use crate::FsmError;

    #[test]
    fn update_without_current_state_errors() {
        let mut m = Miner::default();
        assert_eq!(m.update_states(&mut Ctx::default()), Err(FsmError::NoCurrentState));
        assert!(m.log.is_empty());
    }

    #[test]
    fn global_runs_before_current() {
        let mut m = miner_in(&DIGGING);
        m.fsm.set_global_state(Some(&WATCHFUL));
        m.update_states(&mut Ctx::default()).unwrap();
        assert_eq!(m.log, vec!["execute:Watchful", "execute:Digging"]);
    }

    #[test]
    fn both_run_every_tick() {
        let mut m = miner_in(&DIGGING);
        m.fsm.set_global_state(Some(&WATCHFUL));
        let mut ctx = Ctx::default();
        m.update_states(&mut ctx).unwrap();
        m.update_states(&mut ctx).unwrap();
        let executes = m.log.iter().filter(|l| l.starts_with("execute:")).count();
        assert_eq!(executes, 4);
    }

    #[test]
    fn global_transition_is_seen_by_current_step() {
        let mut m = miner_in(&DIGGING);
        m.fsm.set_global_state(Some(&WATCHFUL));
        m.fatigue = 3;
        m.update_states(&mut Ctx::default()).unwrap();
        assert_eq!(
            m.log,
            vec!["execute:Watchful", "exit:Digging", "enter:Resting", "execute:Resting"]
        );
        assert!(m.fsm.is_in_state::<Resting>());
    }

    #[test]
    fn no_global_state_is_fine() {
        let mut m = miner_in(&RESTING);
        m.update_states(&mut Ctx::default()).unwrap();
        assert_eq!(m.log, vec!["execute:Resting"]);
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod transition_tests {
    use super::*;
    use crate::FsmError;

    #[test]
    fn exactly_one_exit_then_one_enter() {
        let mut m = miner_in(&DIGGING);
        let mut ctx = Ctx::default();
        m.change_state(&RESTING, &mut ctx).unwrap();
        assert_eq!(m.log, vec!["exit:Digging", "enter:Resting"]);
        assert_eq!(m.fsm.previous_state().map(|s| s.name()), Some("Digging"));
        assert_eq!(m.fsm.current_state_name(), Some("Resting"));
    }

    #[test]
    fn self_transition_still_exits_and_enters() {
        let mut m = miner_in(&DIGGING);
        let mut ctx = Ctx::default();
        m.change_state(&DIGGING, &mut ctx).unwrap();
        assert_eq!(m.log, vec!["exit:Digging", "enter:Digging"]);
        assert_eq!(ctx.calls, 2);
    }

    #[test]
    fn revert_returns_to_previous() {
        let mut m = miner_in(&DIGGING);
        let mut ctx = Ctx::default();
        m.change_state(&RESTING, &mut ctx).unwrap();
        m.revert_to_previous_state(&mut ctx).unwrap();
        assert!(m.fsm.is_in_state::<Digging>());
        assert!(!m.fsm.is_in_state::<Resting>());
        assert_eq!(
            m.log,
            vec!["exit:Digging", "enter:Resting", "exit:Resting", "enter:Digging"]
        );
    }

    #[test]
    fn revert_without_previous_errors() {
        let mut m = miner_in(&DIGGING);
        assert_eq!(
            m.revert_to_previous_state(&mut Ctx::default()),
            Err(FsmError::NoPreviousState)
        );
    }

    #[test]
    fn change_without_current_errors() {
        let mut m = Miner::default();
        assert_eq!(
            m.change_state(&RESTING, &mut Ctx::default()),
            Err(FsmError::NoCurrentState)
        );
        assert!(m.log.is_empty());
    }

    #[test]
    fn initialisation_setters_run_no_hooks() {
        let mut m = Miner::default();
        m.fsm.set_current_state(&DIGGING);
        m.fsm.set_previous_state(&RESTING);
        assert!(m.log.is_empty());
        m.revert_to_previous_state(&mut Ctx::default()).unwrap();
        assert!(m.fsm.is_in_state::<Resting>());
    }

    #[test]
    fn shared_states_keep_agent_data_separate() {
        let mut a = miner_in(&DIGGING);
        let mut b = miner_in(&DIGGING);
        let mut ctx = Ctx::default();
        a.update_states(&mut ctx).unwrap();
        a.update_states(&mut ctx).unwrap();
        b.update_states(&mut ctx).unwrap();
        assert_eq!(a.gold, 2);
        assert_eq!(b.gold, 1);
    }

    #[test]
    fn debug_shows_state_names() {
        let m = miner_in(&DIGGING);
        let s = format!("{:?}", m.fsm);
        assert!(s.contains("Digging"), "{s}");
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod message_tests {
    use super::*;

    fn watched_miner() -> Miner {
        let mut m = miner_in(&DIGGING);
        m.fsm.set_global_state(Some(&WATCHFUL));
        m
    }

    #[test]
    fn current_state_gets_first_refusal() {
        let mut m = watched_miner();
        assert!(m.handle_state_message(&telegram(GameMessage::PathReady), &mut Ctx::default()));
        assert_eq!(m.log, vec!["msg:Digging"]);
    }

    #[test]
    fn falls_back_to_global() {
        let mut m = watched_miner();
        assert!(m.handle_state_message(&telegram(GameMessage::GoHome), &mut Ctx::default()));
        assert_eq!(m.log, vec!["msg:Watchful"]);
    }

    #[test]
    fn unhandled_returns_false() {
        let mut m = watched_miner();
        assert!(!m.handle_state_message(&telegram(GameMessage::YouGotMe), &mut Ctx::default()));
        assert!(m.log.is_empty());
    }

    #[test]
    fn no_states_returns_false() {
        let mut m = Miner::default();
        assert!(!m.handle_state_message(&telegram(GameMessage::Wait), &mut Ctx::default()));
    }
}
