//! Goals and the subgoal stack that runs them.

use std::collections::VecDeque;

use ga_message::Telegram;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalStatus {
    #[default]
    Inactive,
    Active,
    Completed,
    Failed,
}

impl GoalStatus {
    /// Completed or failed.
    pub fn is_finished(self) -> bool {
        matches!(self, GoalStatus::Completed | GoalStatus::Failed)
    }
}

/// One unit of work an agent of type `A` pursues over several ticks.
pub trait Goal<A, M> {
    fn name(&self) -> &'static str;

    fn status(&self) -> GoalStatus;

    /// Called before the first `process` (and again after a goal resets
    /// itself to `Inactive`).
    fn activate(&mut self, agent: &mut A);

    /// Advance the goal by one step and report where it stands.
    fn process(&mut self, agent: &mut A) -> GoalStatus;

    /// Called once when the goal is removed from its stack.
    fn terminate(&mut self, _agent: &mut A) {}

    /// Return `true` if the message was consumed.
    fn handle_message(&mut self, _agent: &mut A, _telegram: &Telegram<M>) -> bool {
        false
    }
}

/// LIFO stack of subgoals; only the front one runs.
pub struct GoalStack<A, M> {
    subgoals: VecDeque<Box<dyn Goal<A, M>>>,
}

impl<A, M> Default for GoalStack<A, M> {
    fn default() -> Self {
        Self { subgoals: VecDeque::new() }
    }
}

impl<A, M> GoalStack<A, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `goal` to the front; it runs next.
    pub fn add_subgoal(&mut self, goal: impl Goal<A, M> + 'static) {
        self.subgoals.push_front(Box::new(goal));
    }

    /// Drop finished goals from the front, then process the new front.
    ///
    /// Returns the front's status, except that a completed front with more
    /// goals behind it reports `Active`.  An empty stack is `Completed`.
    pub fn process_subgoals(&mut self, agent: &mut A) -> GoalStatus {
        while let Some(front) = self.subgoals.front_mut() {
            if !front.status().is_finished() {
                break;
            }
            front.terminate(agent);
            debug!(goal = front.name(), status = ?front.status(), "subgoal removed");
            self.subgoals.pop_front();
        }

        let remaining = self.subgoals.len();
        let Some(front) = self.subgoals.front_mut() else {
            return GoalStatus::Completed;
        };
        if front.status() == GoalStatus::Inactive {
            front.activate(agent);
        }
        match front.process(agent) {
            GoalStatus::Completed if remaining > 1 => GoalStatus::Active,
            status => status,
        }
    }

    /// Offer `telegram` to the front goal.
    pub fn forward_to_front(&mut self, agent: &mut A, telegram: &Telegram<M>) -> bool {
        self.subgoals
            .front_mut()
            .is_some_and(|g| g.handle_message(agent, telegram))
    }

    /// Terminate and drop every subgoal.
    pub fn remove_all(&mut self, agent: &mut A) {
        for mut goal in self.subgoals.drain(..) {
            goal.terminate(agent);
        }
    }

    pub fn front_name(&self) -> Option<&'static str> {
        self.subgoals.front().map(|g| g.name())
    }

    pub fn len(&self) -> usize {
        self.subgoals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subgoals.is_empty()
    }
}
