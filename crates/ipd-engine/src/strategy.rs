//! The contract every pluggable strategy implements

use crate::action::Action;
use crate::error::MatchError;
use crate::game::Game;
use crate::introspection;
use crate::random::SeededRng;

/// What a strategy reports when another strategy reads its decision logic.
///
/// Returning `None` means "inspect me honestly": the channel computes the
/// move this strategy would really play on a scratch copy instead.
pub trait Inspectable {
    fn foil_strategy_inspection(&self, _rng: &mut SeededRng) -> Option<Action> {
        None
    }
}

/// A pluggable decision rule driven by the match engine.
pub trait Strategy: Inspectable + Send {
    /// Registry key of this strategy's kind
    fn kind(&self) -> &'static str;

    /// Decide the move for the current round.
    ///
    /// Only `turn` may be consulted: both histories, the match attributes,
    /// the match random stream and, for inspecting kinds, the introspection
    /// channel.
    fn play(&mut self, turn: &mut Turn<'_>) -> Result<Action, MatchError>;

    /// Restore instance-local state to its post-construction value.
    ///
    /// Class-shared state survives; see [`crate::registry::reset_shared_state`].
    /// Kinds with shared state stage their changes here and publish them in
    /// [`Strategy::commit`].
    fn reset(&mut self) {}

    /// Publish updates to class-shared state staged since the last reset.
    ///
    /// The engine calls this only after a match completes without error, so
    /// a failed match never reaches the shared state.
    fn commit(&mut self) {}

    /// Boxed copy of this instance's current state, used as an
    /// introspection scratch instance.
    fn duplicate(&self) -> Box<dyn Strategy>;
}

/// Strategies visible to an inspecting player during one call.
#[derive(Clone, Copy)]
pub(crate) struct Peers<'a> {
    /// The strategy that may be inspected
    pub opponent: &'a dyn Strategy,
    /// Read-only stand-in for the player itself, handed to scratch copies of
    /// the opponent so they can inspect back
    pub itself: Option<&'a dyn Strategy>,
}

/// Everything a strategy may see while choosing one move.
pub struct Turn<'a> {
    kind: &'static str,
    own: &'a [Action],
    opponent: &'a [Action],
    rng: &'a mut SeededRng,
    game: &'a Game,
    length: Option<u32>,
    peers: Option<Peers<'a>>,
    depth: usize,
}

impl<'a> Turn<'a> {
    pub(crate) fn new(
        kind: &'static str,
        own: &'a [Action],
        opponent: &'a [Action],
        rng: &'a mut SeededRng,
        game: &'a Game,
        length: Option<u32>,
    ) -> Self {
        Self { kind, own, opponent, rng, game, length, peers: None, depth: 0 }
    }

    pub(crate) fn with_peers(mut self, peers: Option<Peers<'a>>, depth: usize) -> Self {
        self.peers = peers;
        self.depth = depth;
        self
    }

    /// Our own past actions
    pub fn own(&self) -> &[Action] {
        self.own
    }

    /// The opponent's past actions
    pub fn opponent_history(&self) -> &[Action] {
        self.opponent
    }

    /// Zero-based index of the round being decided
    pub fn round(&self) -> usize {
        self.own.len()
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    /// Total rounds, when the match length is known in advance
    pub fn length(&self) -> Option<u32> {
        self.length
    }

    /// The match's random stream
    pub fn rng(&mut self) -> &mut SeededRng {
        &mut *self.rng
    }

    /// Cooperate with probability `p`, drawn from the match stream.
    pub fn random_choice(&mut self, p: f64) -> Action {
        self.rng.random_choice(p)
    }

    /// What the opponent would play this round, as reported to an inspector.
    ///
    /// Idempotent and side-effect free: neither the opponent, its history
    /// nor the match stream changes.
    pub fn inspect(&self) -> Result<Action, MatchError> {
        let peers = self.peers()?;
        introspection::inspect(
            peers,
            self.opponent,
            self.own,
            &mut self.rng.clone(),
            self.game,
            self.length,
            self.depth,
        )
    }

    /// Simulate `rounds` rounds per candidate action and pick the better one.
    pub fn look_ahead(&self, rounds: usize) -> Result<Action, MatchError> {
        let peers = self.peers()?;
        introspection::look_ahead(
            peers,
            self.own,
            self.opponent,
            &self.rng.clone(),
            self.game,
            self.length,
            self.depth,
            rounds,
        )
    }

    fn peers(&self) -> Result<Peers<'a>, MatchError> {
        self.peers.ok_or_else(|| MatchError::UndeclaredIntrospection {
            kind: self.kind.to_string(),
        })
    }
}
