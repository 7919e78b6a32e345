//! Evaluators and the arbitration that picks between them.

use ga_core::{AgentRng, ArbitrationConfig};
use tracing::{debug, warn};

use crate::{GoalError, GoalResult};

/// Scores one candidate course of action for an agent of type `A` and,
/// if it wins, commits the agent to it.
pub trait Evaluator<A> {
    fn name(&self) -> &'static str;

    /// Personality multiplier applied to the raw desirability.
    fn character_bias(&self) -> f64;

    /// Raw desirability.  Usually in `[0, 1]` but not required to be.
    fn calculate_desirability(&self, agent: &A) -> f64;

    /// Commit `agent` to this evaluator's goal.
    fn set_goal(&self, agent: &mut A);

    /// `calculate_desirability * character_bias`.
    fn score(&self, agent: &A) -> f64 {
        self.calculate_desirability(agent) * self.character_bias()
    }
}

/// Evaluator built from two plain functions.
pub struct FnEvaluator<A> {
    name: &'static str,
    bias: f64,
    desirability: fn(&A) -> f64,
    commit: fn(&mut A),
}

impl<A> FnEvaluator<A> {
    pub fn new(name: &'static str, bias: f64, desirability: fn(&A) -> f64, commit: fn(&mut A)) -> Self {
        Self { name, bias, desirability, commit }
    }
}

impl<A> Evaluator<A> for FnEvaluator<A> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn character_bias(&self) -> f64 {
        self.bias
    }

    fn calculate_desirability(&self, agent: &A) -> f64 {
        (self.desirability)(agent)
    }

    fn set_goal(&self, agent: &mut A) {
        (self.commit)(agent)
    }
}

/// Draw a character bias from the configured range.
pub fn random_bias(rng: &mut AgentRng, config: &ArbitrationConfig) -> GoalResult<f64> {
    let (min, max) = (config.bias_min, config.bias_max);
    if !(min >= 0.0 && max >= min) {
        return Err(GoalError::InvalidBias { min, max });
    }
    Ok(rng.in_range(min, max))
}

/// Index and value of the strictly greatest score above zero.
///
/// Ties go to the first candidate reaching the maximum.  NaN never wins.
pub fn best_score(scores: impl IntoIterator<Item = f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    let mut best_score = 0.0;
    for (i, score) in scores.into_iter().enumerate() {
        if score > best_score {
            best_score = score;
            best = Some((i, score));
        }
    }
    best
}

/// Result of one arbitration round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub index: usize,
    pub name: &'static str,
    pub score: f64,
}

/// Ordered set of evaluators for one agent.
///
/// The arbitrator is usually stored outside the agent it judges, or taken
/// out of it for the call, since [`arbitrate`](Self::arbitrate) needs
/// `&mut A` while reading the evaluators.
pub struct Arbitrator<A> {
    evaluators: Vec<Box<dyn Evaluator<A>>>,
}

impl<A> Default for Arbitrator<A> {
    fn default() -> Self {
        Self { evaluators: Vec::new() }
    }
}

impl<A> Arbitrator<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, evaluator: impl Evaluator<A> + 'static) -> Self {
        self.add(evaluator);
        self
    }

    pub fn add(&mut self, evaluator: impl Evaluator<A> + 'static) {
        self.evaluators.push(Box::new(evaluator));
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// Scores of every evaluator, in insertion order.
    pub fn scores(&self, agent: &A) -> Vec<f64> {
        self.evaluators.iter().map(|e| e.score(agent)).collect()
    }

    /// Winning evaluator without committing to it.
    pub fn best(&self, agent: &A) -> Option<Choice> {
        let (index, score) = best_score(self.evaluators.iter().map(|e| e.score(agent)))?;
        Some(Choice { index, name: self.evaluators[index].name(), score })
    }

    /// Score every evaluator and call the winner's `set_goal`.
    /// When nothing scores above zero, logs a warning and does nothing.
    pub fn arbitrate(&self, agent: &mut A) -> Option<Choice> {
        match self.best(agent) {
            Some(choice) => {
                debug!(winner = choice.name, score = choice.score, "arbitration");
                self.evaluators[choice.index].set_goal(agent);
                Some(choice)
            }
            None => {
                warn!(candidates = self.evaluators.len(), "no evaluator scored above zero");
                None
            }
        }
    }
}
