//! Strategies that cooperate as often as the opponent has

use crate::action::{Action, C};
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::MatchError;
use crate::strategy::{Inspectable, Strategy, Turn};

use super::StrategyKind;

fn cooperation_rate(history: &[Action]) -> f64 {
    let cooperations = history.iter().filter(|a| **a == C).count();
    cooperations as f64 / history.len() as f64
}

/// Opens at random, then cooperates with the opponent's cooperation rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageCopier;

impl StrategyKind for AverageCopier {
    const NAME: &'static str = "Average Copier";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Unbounded).stochastic();

    fn create() -> Self {
        AverageCopier
    }
}

impl Inspectable for AverageCopier {}

impl Strategy for AverageCopier {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        if turn.opponent_history().is_empty() {
            return Ok(turn.random_choice(0.5));
        }
        let p = cooperation_rate(turn.opponent_history());
        Ok(turn.random_choice(p))
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Like [`AverageCopier`] but always opens with cooperate.
#[derive(Clone, Copy, Debug, Default)]
pub struct NiceAverageCopier;

impl StrategyKind for NiceAverageCopier {
    const NAME: &'static str = "Nice Average Copier";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Unbounded).stochastic();

    fn create() -> Self {
        NiceAverageCopier
    }
}

impl Inspectable for NiceAverageCopier {}

impl Strategy for NiceAverageCopier {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        if turn.opponent_history().is_empty() {
            return Ok(C);
        }
        let p = cooperation_rate(turn.opponent_history());
        Ok(turn.random_choice(p))
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::D;
    use crate::strategies::testing::respond;

    #[test]
    fn test_first_move_is_random() {
        assert_eq!(respond(&mut AverageCopier, &[], &[], 1), C);
        assert_eq!(respond(&mut AverageCopier, &[], &[], 2), D);
    }

    #[test]
    fn test_nice_first_move_cooperates() {
        assert_eq!(respond(&mut NiceAverageCopier, &[], &[], 1), C);
        assert_eq!(respond(&mut NiceAverageCopier, &[], &[], 2), C);
    }

    #[test]
    fn test_copies_unanimous_opponent() {
        for seed in 0..10 {
            assert_eq!(respond(&mut AverageCopier, &[D, D], &[C, C], seed), C);
            assert_eq!(respond(&mut AverageCopier, &[C, C], &[D, D], seed), D);
            assert_eq!(respond(&mut NiceAverageCopier, &[C], &[D], seed), D);
        }
    }

    #[test]
    fn test_mixed_opponent_uses_rate() {
        // Seed 2 opens with 0.956..., above any rate below one
        assert_eq!(respond(&mut AverageCopier, &[C, C, C], &[C, C, D], 2), D);
        // Seed 1 opens with 0.134..., below a rate of two thirds
        assert_eq!(respond(&mut AverageCopier, &[C, C, C], &[C, C, D], 1), C);
    }
}
