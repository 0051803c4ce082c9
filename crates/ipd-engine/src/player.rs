//! Player state: one strategy instance and its history

use core::fmt;

use crate::action::{Action, History};
use crate::classifier::Classifier;
use crate::error::MatchError;
use crate::registry;
use crate::strategy::Strategy;

/// A strategy instance taking part in matches.
///
/// The player exclusively owns its history and the strategy's instance
/// fields. Class-shared state lives in the registry, not here.
pub struct Player {
    pub(crate) strategy: Box<dyn Strategy>,
    pub(crate) history: History,
}

impl Player {
    pub fn new<S: Strategy + 'static>(strategy: S) -> Self {
        Self::from_boxed(Box::new(strategy))
    }

    pub fn from_boxed(strategy: Box<dyn Strategy>) -> Self {
        Self { strategy, history: History::new() }
    }

    /// Build a player for a registered built-in kind
    pub fn of_kind(kind: &str) -> Result<Self, MatchError> {
        registry::create(kind)
            .map(Self::from_boxed)
            .ok_or_else(|| MatchError::UnregisteredStrategy { kind: kind.to_string() })
    }

    pub fn kind(&self) -> &'static str {
        self.strategy.kind()
    }

    pub fn classifier(&self) -> Result<Classifier, MatchError> {
        registry::classifier_for(self.kind())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub fn strategy_mut(&mut self) -> &mut dyn Strategy {
        self.strategy.as_mut()
    }

    /// Clear the history and restore the strategy's instance fields.
    ///
    /// Takes effect on class-shared state immediately.
    pub fn reset(&mut self) {
        self.prepare();
        self.commit();
    }

    /// Reset for a new match, keeping class-shared changes staged.
    pub(crate) fn prepare(&mut self) {
        self.history.clear();
        self.strategy.reset();
    }

    pub(crate) fn commit(&mut self) {
        self.strategy.commit();
    }

    pub(crate) fn record(&mut self, action: Action) {
        self.history.push(action);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("kind", &self.kind())
            .field("history", &self.history.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{C, D};
    use crate::strategies::{Cooperator, TitForTat};

    #[test]
    fn test_new_player_has_empty_history() {
        let p = Player::new(TitForTat);
        assert!(p.history().is_empty());
        assert_eq!(p.kind(), "Tit For Tat");
    }

    #[test]
    fn test_reset_clears_history() {
        let mut p = Player::new(Cooperator);
        p.record(C);
        p.record(D);
        assert_eq!(p.history().len(), 2);
        p.reset();
        assert!(p.history().is_empty());
    }

    #[test]
    fn test_of_kind_unknown() {
        let err = Player::of_kind("No Such Strategy").unwrap_err();
        assert_eq!(err, MatchError::UnregisteredStrategy { kind: "No Such Strategy".into() });
    }

    #[test]
    fn test_of_kind_builtin() {
        let p = Player::of_kind("Defector").unwrap();
        assert_eq!(p.kind(), "Defector");
        assert!(!p.classifier().unwrap().stochastic);
    }
}
