//! Look-ahead strategy that simulates the opponent's responses

use crate::action::{Action, D};
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::MatchError;
use crate::introspection::LOOK_AHEAD_ROUNDS;
use crate::random::SeededRng;
use crate::strategy::{Inspectable, Strategy, Turn};

use super::StrategyKind;

/// Plays whichever of always-cooperate or always-defect scores better over
/// the next ten rounds against the inspected opponent. Reports defect when
/// inspected.
#[derive(Clone, Copy, Debug, Default)]
pub struct MindReader;

impl StrategyKind for MindReader {
    const NAME: &'static str = "Mind Reader";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Unbounded)
        .inspecting()
        .using(&["game"]);

    fn create() -> Self {
        MindReader
    }
}

impl Inspectable for MindReader {
    fn foil_strategy_inspection(&self, _rng: &mut SeededRng) -> Option<Action> {
        Some(D)
    }
}

impl Strategy for MindReader {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        turn.look_ahead(LOOK_AHEAD_ROUNDS)
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}
