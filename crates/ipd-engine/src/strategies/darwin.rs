//! Evolving strategy with a genome shared by every instance
//!
//! The genome is a plan of actions indexed by round. All Darwin instances
//! read the same plan through the registry, so learning accumulates across
//! matches until [`Darwin::reset_genome`] discards it. During a match an
//! instance evolves a private copy of the plan and publishes it on
//! [`Strategy::commit`], which the engine only calls for completed matches.

use std::sync::PoisonError;

use crate::action::{Action, C};
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::MatchError;
use crate::random::SeededRng;
use crate::registry::{self, Genome};
use crate::strategy::{Inspectable, Strategy, Turn};

use super::StrategyKind;

/// Plan every Darwin genome starts from
pub const GENOME_SEED: [Action; 1] = [C];

#[derive(Clone, Debug)]
pub struct Darwin {
    /// Action written back into the plan for the previous round
    response: Action,
    /// Plan being evolved by the current match, not yet published
    staged: Option<Vec<Action>>,
    /// Length of the staged prefix this match has written
    touched: usize,
}

impl Darwin {
    pub fn new() -> Self {
        let response = Self::current_genome().first().copied().unwrap_or(C);
        Self { response, staged: None, touched: 0 }
    }

    /// The shared plan object
    pub fn genome() -> Genome {
        registry::shared_genome(Self::NAME, &GENOME_SEED)
    }

    /// Copy of the shared plan's current contents
    pub fn current_genome() -> Vec<Action> {
        Self::genome().lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Class-level reset: replace the shared plan with a fresh `[C]`.
    pub fn reset_genome() -> Result<(), MatchError> {
        registry::reset_shared_state(Self::NAME)
    }

    fn staged_plan(&mut self) -> &mut Vec<Action> {
        self.staged.get_or_insert_with(Self::current_genome)
    }
}

impl Default for Darwin {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyKind for Darwin {
    const NAME: &'static str = "Darwin";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Unbounded)
        .inspecting()
        .manipulating_state();

    fn create() -> Self {
        Self::new()
    }
}

impl Inspectable for Darwin {
    // Inspecting Darwin must not run (and so evolve) the plan
    fn foil_strategy_inspection(&self, _rng: &mut SeededRng) -> Option<Action> {
        Some(C)
    }
}

impl Strategy for Darwin {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        let trial = turn.round();
        let outcome = match (turn.own().last(), turn.opponent_history().last()) {
            (Some(&own), Some(&opponent)) => Some(turn.game().score(own, opponent)),
            _ => None,
        };

        let mut response = self.response;
        let plan = self.staged_plan();
        let mut written = 0;
        if let Some((own_score, opponent_score)) = outcome {
            // A round is lost when the opponent out-scored us
            if own_score < opponent_score && plan.len() >= trial {
                response = plan[trial - 1].flip();
            }
            if let Some(slot) = plan.get_mut(trial - 1) {
                *slot = response;
                written = trial;
            }
        }

        let action = match plan.get(trial) {
            Some(&planned) => planned,
            None => {
                plan.push(response);
                written = plan.len();
                response
            }
        };
        self.touched = self.touched.max(written);
        self.response = response;
        Ok(action)
    }

    /// Restores the instance and re-opens the plan with cooperate; the rest
    /// of the plan is kept.
    fn reset(&mut self) {
        self.response = C;
        let mut plan = Self::current_genome();
        match plan.first_mut() {
            Some(first) => *first = C,
            None => plan.push(C),
        }
        self.staged = Some(plan);
        self.touched = 1;
    }

    /// Merges the evolved prefix into the shared plan. Entries this match
    /// never reached keep whatever concurrent matches wrote there.
    fn commit(&mut self) {
        let Some(staged) = self.staged.take() else {
            return;
        };
        let genome = Self::genome();
        let mut plan = genome.lock().unwrap_or_else(PoisonError::into_inner);
        for (index, action) in staged.into_iter().take(self.touched).enumerate() {
            match plan.get_mut(index) {
                Some(slot) => *slot = action,
                None => plan.push(action),
            }
        }
        self.touched = 0;
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}
