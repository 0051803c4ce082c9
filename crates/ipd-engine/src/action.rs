//! Actions and per-player move histories

use core::fmt;
use core::ops::Deref;
use serde::{Deserialize, Serialize};

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Cooperate,
    Defect,
}

pub const C: Action = Action::Cooperate;
pub const D: Action = Action::Defect;

impl Action {
    /// The complementary action.
    pub fn flip(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Action::Cooperate => 'C',
            Action::Defect => 'D',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Ordered, append-only record of one player's actions.
///
/// Index `r` holds the action played in round `r`. The only way to shorten a
/// history is [`History::clear`], which the player lifecycle calls on reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    actions: Vec<Action>,
    cooperations: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self { actions: Vec::with_capacity(rounds), cooperations: 0 }
    }

    pub fn push(&mut self, action: Action) {
        if action == Action::Cooperate {
            self.cooperations += 1;
        }
        self.actions.push(action);
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.cooperations = 0;
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn cooperations(&self) -> usize {
        self.cooperations
    }

    pub fn defections(&self) -> usize {
        self.actions.len() - self.cooperations
    }

    pub fn into_vec(self) -> Vec<Action> {
        self.actions
    }
}

impl Deref for History {
    type Target = [Action];

    fn deref(&self) -> &[Action] {
        &self.actions
    }
}

impl From<Vec<Action>> for History {
    fn from(actions: Vec<Action>) -> Self {
        let cooperations = actions.iter().filter(|a| **a == Action::Cooperate).count();
        Self { actions, cooperations }
    }
}

impl FromIterator<Action> for History {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut history = History::new();
        for action in iter {
            history.push(action);
        }
        history
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            write!(f, "{}", action)?;
        }
        Ok(())
    }
}
