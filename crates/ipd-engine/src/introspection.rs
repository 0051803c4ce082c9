//! Introspection channel
//!
//! Lets an inspecting strategy ask what its opponent is about to play. The
//! answer is either the opponent's declared foil or the move a scratch copy
//! of the opponent would make this round. The real opponent, its history and
//! the match stream are never touched; scratch copies run on snapshots.

use tracing::warn;

use crate::action::Action;
use crate::error::MatchError;
use crate::game::Game;
use crate::random::SeededRng;
use crate::registry;
use crate::strategy::{Inspectable, Peers, Strategy, Turn};

/// Nested inspections allowed before a cycle is reported
pub const MAX_INSPECTION_DEPTH: usize = 8;

/// Rounds simulated per candidate by [`Turn::look_ahead`] callers by default
pub const LOOK_AHEAD_ROUNDS: usize = 10;

/// Query `peers.opponent` for its move this round.
///
/// `target_own` / `target_opponent` are the histories from the target's
/// point of view.
pub(crate) fn inspect(
    peers: Peers<'_>,
    target_own: &[Action],
    target_opponent: &[Action],
    rng: &mut SeededRng,
    game: &Game,
    length: Option<u32>,
    depth: usize,
) -> Result<Action, MatchError> {
    let target = peers.opponent;
    if let Some(foil) = target.foil_strategy_inspection(rng) {
        return Ok(foil);
    }

    let mut scratch = target.duplicate();
    let next = scratch_peers(target, peers.itself)?;
    play_scratch(scratch.as_mut(), target_own, target_opponent, rng, game, length, next, depth)
}

/// Compare the payoff of always cooperating against always defecting over
/// the next `rounds` rounds, given how the opponent responds when inspected.
///
/// Ties favor Defect.
#[allow(clippy::too_many_arguments)]
pub(crate) fn look_ahead(
    peers: Peers<'_>,
    own: &[Action],
    opponent: &[Action],
    rng: &SeededRng,
    game: &Game,
    length: Option<u32>,
    depth: usize,
    rounds: usize,
) -> Result<Action, MatchError> {
    let cooperate = simulate(peers, own, opponent, rng, game, length, depth, Action::Cooperate, rounds)?;
    let defect = simulate(peers, own, opponent, rng, game, length, depth, Action::Defect, rounds)?;

    Ok(if cooperate > defect { Action::Cooperate } else { Action::Defect })
}

#[allow(clippy::too_many_arguments)]
fn simulate(
    peers: Peers<'_>,
    own: &[Action],
    opponent: &[Action],
    rng: &SeededRng,
    game: &Game,
    length: Option<u32>,
    depth: usize,
    committed: Action,
    rounds: usize,
) -> Result<u32, MatchError> {
    let stand_in = Committed(committed);
    let target = peers.opponent;
    let mut scratch = target.duplicate();
    let next = scratch_peers(target, Some(&stand_in))?;

    let mut rng = rng.clone();
    let mut own_sim = own.to_vec();
    let mut opponent_sim = opponent.to_vec();
    let mut total = 0u32;

    for _ in 0..rounds {
        let response = match scratch.foil_strategy_inspection(&mut rng.clone()) {
            Some(foil) => foil,
            None => play_scratch(
                scratch.as_mut(),
                &opponent_sim,
                &own_sim,
                &mut rng,
                game,
                length,
                next,
                depth,
            )?,
        };
        total += game.score(committed, response).0;
        own_sim.push(committed);
        opponent_sim.push(response);
    }

    Ok(total)
}

/// Peers handed to a scratch copy of `target`, if its kind may inspect.
fn scratch_peers<'a>(
    target: &'a dyn Strategy,
    inspector: Option<&'a dyn Strategy>,
) -> Result<Option<Peers<'a>>, MatchError> {
    let classifier = registry::classifier_for(target.kind())?;
    if !classifier.inspects_source {
        return Ok(None);
    }
    Ok(inspector.map(|inspector| Peers { opponent: inspector, itself: Some(target) }))
}

#[allow(clippy::too_many_arguments)]
fn play_scratch(
    scratch: &mut dyn Strategy,
    own: &[Action],
    opponent: &[Action],
    rng: &mut SeededRng,
    game: &Game,
    length: Option<u32>,
    peers: Option<Peers<'_>>,
    depth: usize,
) -> Result<Action, MatchError> {
    if depth >= MAX_INSPECTION_DEPTH {
        warn!(kind = scratch.kind(), depth, "introspection cycle");
        return Err(MatchError::IntrospectionCycle { depth });
    }
    let mut turn = Turn::new(scratch.kind(), own, opponent, rng, game, length)
        .with_peers(peers, depth + 1);
    scratch.play(&mut turn)
}

/// Simulation stand-in that always plays, and always reports, one action.
#[derive(Clone, Copy, Debug)]
struct Committed(Action);

impl Inspectable for Committed {
    fn foil_strategy_inspection(&self, _rng: &mut SeededRng) -> Option<Action> {
        Some(self.0)
    }
}

impl Strategy for Committed {
    fn kind(&self) -> &'static str {
        "Committed"
    }

    fn play(&mut self, _turn: &mut Turn<'_>) -> Result<Action, MatchError> {
        Ok(self.0)
    }

    fn duplicate(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}
