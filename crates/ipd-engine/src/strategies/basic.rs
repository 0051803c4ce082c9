//! Memoryless and short-memory reference strategies

use crate::action::{Action, C, D};
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::MatchError;
use crate::strategy::{Inspectable, Strategy, Turn};

use super::StrategyKind;

/// Always cooperate, never defect.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cooperator;

impl StrategyKind for Cooperator {
    const NAME: &'static str = "Cooperator";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Finite(0));

    fn create() -> Self {
        Cooperator
    }
}

impl Inspectable for Cooperator {}

impl Strategy for Cooperator {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, _turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        Ok(C)
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Always defect, never cooperate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Defector;

impl StrategyKind for Defector {
    const NAME: &'static str = "Defector";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Finite(0));

    fn create() -> Self {
        Defector
    }
}

impl Inspectable for Defector {}

impl Strategy for Defector {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, _turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        Ok(D)
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Start with cooperate, then switch every round.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alternator;

impl StrategyKind for Alternator {
    const NAME: &'static str = "Alternator";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Finite(1));

    fn create() -> Self {
        Alternator
    }
}

impl Inspectable for Alternator {}

impl Strategy for Alternator {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        Ok(turn.own().last().map_or(C, |last| last.flip()))
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Repeat a fixed sequence of actions. Useful as a scripted opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycler {
    cycle: Vec<Action>,
}

impl Cycler {
    pub fn new(cycle: impl Into<Vec<Action>>) -> Result<Self, MatchError> {
        let cycle = cycle.into();
        if cycle.is_empty() {
            return Err(MatchError::InvalidConfig("cycler needs at least one action".into()));
        }
        Ok(Self { cycle })
    }

    /// Parse a pattern such as `"CCD"`
    pub fn from_pattern(pattern: &str) -> Result<Self, MatchError> {
        let cycle = pattern
            .chars()
            .map(|c| match c {
                'C' | 'c' => Ok(C),
                'D' | 'd' => Ok(D),
                other => Err(MatchError::InvalidConfig(format!("unknown action `{}`", other))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cycle)
    }

    pub fn cycle(&self) -> &[Action] {
        &self.cycle
    }
}

impl StrategyKind for Cycler {
    const NAME: &'static str = "Cycler";
    // Depth depends on the cycle of each instance
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Unbounded);

    fn create() -> Self {
        Self { cycle: vec![C, C, D] }
    }
}

impl Inspectable for Cycler {}

impl Strategy for Cycler {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        Ok(self.cycle[turn.round() % self.cycle.len()])
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}

/// Copy opponent's last move. Start with cooperate.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitForTat;

impl StrategyKind for TitForTat {
    const NAME: &'static str = "Tit For Tat";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Finite(1));

    fn create() -> Self {
        TitForTat
    }
}

impl Inspectable for TitForTat {}

impl Strategy for TitForTat {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        Ok(turn.opponent_history().last().copied().unwrap_or(C))
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Random choice each round, cooperating half the time.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPlayer;

impl StrategyKind for RandomPlayer {
    const NAME: &'static str = "Random";
    const CLASSIFIER: Classifier = Classifier::basic(MemoryDepth::Finite(0)).stochastic();

    fn create() -> Self {
        RandomPlayer
    }
}

impl Inspectable for RandomPlayer {}

impl Strategy for RandomPlayer {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        Ok(turn.random_choice(0.5))
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}
