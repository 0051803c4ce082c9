//! Strategies that read the opponent's next move and mirror it
//!
//! When inspected themselves they report a fixed default instead of
//! recursing, which is what keeps Geller-vs-Geller from looping.

use crate::action::{Action, C, D};
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::MatchError;
use crate::random::SeededRng;
use crate::strategy::{Inspectable, Strategy, Turn};

use super::StrategyKind;

/// Mirrors the opponent; reports a coin flip when inspected.
#[derive(Clone, Copy, Debug, Default)]
pub struct Geller;

/// Mirrors the opponent; reports cooperate when inspected.
#[derive(Clone, Copy, Debug, Default)]
pub struct GellerCooperator;

/// Mirrors the opponent; reports defect when inspected.
#[derive(Clone, Copy, Debug, Default)]
pub struct GellerDefector;

impl StrategyKind for Geller {
    const NAME: &'static str = "Geller";
    const CLASSIFIER: Classifier =
        Classifier::basic(MemoryDepth::Unbounded).stochastic().inspecting();

    fn create() -> Self {
        Geller
    }
}

impl StrategyKind for GellerCooperator {
    const NAME: &'static str = "Geller Cooperator";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Unbounded).inspecting();

    fn create() -> Self {
        GellerCooperator
    }
}

impl StrategyKind for GellerDefector {
    const NAME: &'static str = "Geller Defector";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Unbounded).inspecting();

    fn create() -> Self {
        GellerDefector
    }
}

impl Inspectable for Geller {
    fn foil_strategy_inspection(&self, rng: &mut SeededRng) -> Option<Action> {
        Some(rng.random_choice(0.5))
    }
}

impl Inspectable for GellerCooperator {
    fn foil_strategy_inspection(&self, _rng: &mut SeededRng) -> Option<Action> {
        Some(C)
    }
}

impl Inspectable for GellerDefector {
    fn foil_strategy_inspection(&self, _rng: &mut SeededRng) -> Option<Action> {
        Some(D)
    }
}

macro_rules! mirror_opponent {
    ($($ty:ty),*) => {$(
        impl Strategy for $ty {
            fn kind(&self) -> &'static str {
                <$ty as StrategyKind>::NAME
            }

            fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
                turn.inspect()
            }

            fn duplicate(&self) -> Box<dyn Strategy> {
                Box::new(*self)
            }
        }
    )*};
}

mirror_opponent!(Geller, GellerCooperator, GellerDefector);
