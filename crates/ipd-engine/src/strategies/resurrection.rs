//! Tit-for-tat that stops trying after a run of its own defections

use crate::action::{Action, C, D};
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::MatchError;
use crate::strategy::{Inspectable, Strategy, Turn};

use super::StrategyKind;

const STREAK: usize = 5;

/// Cooperate first. Keep defecting once the last five own moves were all
/// defections; otherwise copy the opponent's last move.
#[derive(Clone, Copy, Debug, Default)]
pub struct Resurrection;

impl StrategyKind for Resurrection {
    const NAME: &'static str = "Resurrection";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Finite(STREAK as u32));

    fn create() -> Self {
        Resurrection
    }
}

impl Inspectable for Resurrection {}

impl Strategy for Resurrection {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        let own = turn.own();
        let Some(&opponent_last) = turn.opponent_history().last() else {
            return Ok(C);
        };
        if own.len() >= STREAK && own[own.len() - STREAK..].iter().all(|a| *a == D) {
            return Ok(D);
        }
        Ok(opponent_last)
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}
