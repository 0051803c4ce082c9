//! Match execution engine

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::action::Action;
use crate::error::MatchError;
use crate::player::Player;
use crate::random::SeededRng;
use crate::registry;
use crate::strategy::{Peers, Strategy, Turn};

/// Payoff matrix for the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Mutual cooperation
    pub reward: u32,
    /// Cooperating against a defector
    pub sucker: u32,
    /// Defecting against a cooperator
    pub temptation: u32,
    /// Mutual defection
    pub punishment: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self { reward: 3, sucker: 0, temptation: 5, punishment: 1 }
    }
}

impl Game {
    /// Returns (score_a, score_b)
    pub fn score(&self, a: Action, b: Action) -> (u32, u32) {
        match (a, b) {
            (Action::Cooperate, Action::Cooperate) => (self.reward, self.reward),
            (Action::Cooperate, Action::Defect) => (self.sucker, self.temptation),
            (Action::Defect, Action::Cooperate) => (self.temptation, self.sucker),
            (Action::Defect, Action::Defect) => (self.punishment, self.punishment),
        }
    }
}

/// How many rounds a match lasts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchLength {
    Fixed(u32),
    /// Each round ends the match with probability `prob_end`; the length is
    /// sampled up front and hidden from the strategies
    Probabilistic { prob_end: f64, max_rounds: u32 },
}

/// Configuration for a single match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub length: MatchLength,
    pub game: Game,
    /// Probability that an emitted action is flipped before being recorded
    pub noise: f64,
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::fixed(200)
    }
}

impl MatchConfig {
    pub fn fixed(rounds: u32) -> Self {
        Self { length: MatchLength::Fixed(rounds), game: Game::default(), noise: 0.0, seed: None }
    }

    pub fn probabilistic(prob_end: f64, max_rounds: u32) -> Self {
        Self {
            length: MatchLength::Probabilistic { prob_end, max_rounds },
            ..Self::fixed(max_rounds)
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MatchError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        match self.length {
            MatchLength::Fixed(0) => return Err(MatchError::InvalidMatchLength { rounds: 0 }),
            MatchLength::Probabilistic { max_rounds: 0, .. } => {
                return Err(MatchError::InvalidMatchLength { rounds: 0 })
            }
            MatchLength::Probabilistic { prob_end, .. } if !(0.0..=1.0).contains(&prob_end) => {
                return Err(MatchError::InvalidConfig(format!("prob_end {} outside [0, 1]", prob_end)))
            }
            _ => {}
        }
        if !(0.0..=1.0).contains(&self.noise) {
            return Err(MatchError::InvalidConfig(format!("noise {} outside [0, 1]", self.noise)));
        }
        Ok(())
    }
}

/// Sample a match length for a per-round end probability
fn sample_length(rng: &mut SeededRng, prob_end: f64, max_rounds: u32) -> u32 {
    if prob_end <= 0.0 {
        return max_rounds;
    }
    if prob_end >= 1.0 {
        return 1;
    }
    let x = rng.random();
    let rounds = ((1.0 - x).ln() / (1.0 - prob_end).ln()).floor() + 1.0;
    if rounds >= max_rounds as f64 {
        max_rounds
    } else {
        rounds as u32
    }
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub history_a: Vec<Action>,
    pub history_b: Vec<Action>,
    pub rounds: u32,
    pub seed: Option<u64>,
}

impl MatchResult {
    /// Round-by-round action pairs
    pub fn actions(&self) -> Vec<(Action, Action)> {
        self.history_a.iter().copied().zip(self.history_b.iter().copied()).collect()
    }

    /// Total payoffs (score_a, score_b)
    pub fn scores(&self, game: &Game) -> (u32, u32) {
        self.actions().into_iter().fold((0, 0), |(total_a, total_b), (a, b)| {
            let (score_a, score_b) = game.score(a, b);
            (total_a + score_a, total_b + score_b)
        })
    }
}

/// A configured match, reusable across player pairs
#[derive(Clone, Debug)]
pub struct Match {
    config: MatchConfig,
}

impl Match {
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a complete match between two players
    ///
    /// Both players are reset first. Rounds run strictly in order; within a
    /// round `a` decides before `b`, neither sees the other's current move,
    /// and both histories are appended together. Class-shared state is only
    /// published once every round has succeeded.
    pub fn play(&self, a: &mut Player, b: &mut Player) -> Result<MatchResult, MatchError> {
        let result = self.play_inner(a, b);
        if let Err(e) = &result {
            warn!(kind_a = a.kind(), kind_b = b.kind(), error = %e, "match failed");
        }
        result
    }

    fn play_inner(&self, a: &mut Player, b: &mut Player) -> Result<MatchResult, MatchError> {
        let classifier_a = registry::classifier_for(a.kind())?;
        let classifier_b = registry::classifier_for(b.kind())?;
        let config = &self.config;

        let mut rng = match config.seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };
        let (rounds, length) = match config.length {
            MatchLength::Fixed(rounds) => (rounds, Some(rounds)),
            MatchLength::Probabilistic { prob_end, max_rounds } => {
                (sample_length(&mut rng, prob_end, max_rounds), None)
            }
        };

        debug!(kind_a = a.kind(), kind_b = b.kind(), rounds, seed = ?config.seed, "match start");

        a.prepare();
        b.prepare();

        for round in 0..rounds {
            let stand_in_a = classifier_b.inspects_source.then(|| a.strategy.duplicate());
            let stand_in_b = classifier_a.inspects_source.then(|| b.strategy.duplicate());

            let mut action_a = decide(
                a,
                b.strategy.as_ref(),
                &b.history,
                classifier_a.inspects_source,
                stand_in_a.as_deref(),
                &mut rng,
                config,
                length,
            )?;
            let mut action_b = decide(
                b,
                a.strategy.as_ref(),
                &a.history,
                classifier_b.inspects_source,
                stand_in_b.as_deref(),
                &mut rng,
                config,
                length,
            )?;

            if config.noise > 0.0 {
                if rng.chance(config.noise) {
                    action_a = action_a.flip();
                }
                if rng.chance(config.noise) {
                    action_b = action_b.flip();
                }
            }

            trace!(round, %action_a, %action_b, "round");
            a.record(action_a);
            b.record(action_b);
        }

        a.commit();
        b.commit();
        debug!(kind_a = a.kind(), kind_b = b.kind(), history_a = %a.history, history_b = %b.history, "match end");

        Ok(MatchResult {
            history_a: a.history.to_vec(),
            history_b: b.history.to_vec(),
            rounds,
            seed: config.seed,
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn decide(
    player: &mut Player,
    opponent: &dyn Strategy,
    opponent_history: &[Action],
    inspects_source: bool,
    stand_in: Option<&dyn Strategy>,
    rng: &mut SeededRng,
    config: &MatchConfig,
    length: Option<u32>,
) -> Result<Action, MatchError> {
    let kind = player.kind();
    let peers = inspects_source.then_some(Peers { opponent, itself: stand_in });
    let mut turn = Turn::new(kind, &player.history, opponent_history, rng, &config.game, length)
        .with_peers(peers, 0);
    player.strategy.play(&mut turn)
}

/// Play `rounds` rounds between two players, optionally seeded.
///
/// Entry point used by the tournament layer for each pairing.
pub fn run_match(
    a: &mut Player,
    b: &mut Player,
    rounds: u32,
    seed: Option<u64>,
) -> Result<MatchResult, MatchError> {
    Match::new(MatchConfig::fixed(rounds).with_seed(seed))?.play(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{C, D};
    use crate::strategies::{Alternator, Cooperator, Defector, RandomPlayer, TitForTat};

    #[test]
    fn test_payoff_matrix() {
        let game = Game::default();
        assert_eq!(game.score(C, C), (3, 3));
        assert_eq!(game.score(C, D), (0, 5));
        assert_eq!(game.score(D, C), (5, 0));
        assert_eq!(game.score(D, D), (1, 1));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let mut a = Player::new(Cooperator);
        let mut b = Player::new(Defector);
        let err = run_match(&mut a, &mut b, 0, None).unwrap_err();
        assert_eq!(err, MatchError::InvalidMatchLength { rounds: 0 });
        assert!(a.history().is_empty());
    }

    #[test]
    fn test_histories_equal_length() {
        let mut a = Player::new(TitForTat);
        let mut b = Player::new(RandomPlayer);
        let result = run_match(&mut a, &mut b, 37, Some(3)).unwrap();
        assert_eq!(result.history_a.len(), 37);
        assert_eq!(result.history_b.len(), 37);
        assert_eq!(a.history().len(), b.history().len());
    }

    #[test]
    fn test_match_determinism() {
        let mut a = Player::new(TitForTat);
        let mut b = Player::new(RandomPlayer);

        let result1 = run_match(&mut a, &mut b, 50, Some(42)).unwrap();
        let result2 = run_match(&mut a, &mut b, 50, Some(42)).unwrap();

        assert_eq!(result1, result2);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = Player::new(RandomPlayer);
        let mut b = Player::new(RandomPlayer);

        let result1 = run_match(&mut a, &mut b, 50, Some(1)).unwrap();
        let result2 = run_match(&mut a, &mut b, 50, Some(2)).unwrap();

        assert_ne!(result1.actions(), result2.actions());
    }

    #[test]
    fn test_cooperate_vs_cooperate() {
        let mut a = Player::new(Cooperator);
        let mut b = Player::new(Cooperator);
        let result = run_match(&mut a, &mut b, 20, None).unwrap();

        assert!(result.actions().iter().all(|pair| *pair == (C, C)));
        assert_eq!(result.scores(&Game::default()), (60, 60));
    }

    #[test]
    fn test_tft_vs_defector() {
        let mut a = Player::new(TitForTat);
        let mut b = Player::new(Defector);
        let result = run_match(&mut a, &mut b, 10, None).unwrap();

        assert_eq!(result.actions()[0], (C, D));
        for pair in result.actions().iter().skip(1) {
            assert_eq!(*pair, (D, D));
        }
    }

    #[test]
    fn test_tft_vs_alternator_lags_one_round() {
        let mut a = Player::new(TitForTat);
        let mut b = Player::new(Alternator);
        let result = run_match(&mut a, &mut b, 6, None).unwrap();
        assert_eq!(result.history_a, vec![C, C, D, C, D, C]);
        assert_eq!(result.history_b, vec![C, D, C, D, C, D]);
    }

    #[test]
    fn test_players_are_reset_between_matches() {
        let mut a = Player::new(TitForTat);
        let mut b = Player::new(Defector);
        run_match(&mut a, &mut b, 10, None).unwrap();
        run_match(&mut a, &mut b, 4, None).unwrap();
        assert_eq!(a.history().len(), 4);
        assert_eq!(a.history()[0], C);
    }

    #[test]
    fn test_full_noise_flips_everything() {
        let config = MatchConfig::fixed(8).with_noise(1.0).with_seed(Some(5));
        let mut a = Player::new(Cooperator);
        let mut b = Player::new(Defector);
        let result = Match::new(config).unwrap().play(&mut a, &mut b).unwrap();
        assert!(result.history_a.iter().all(|x| *x == D));
        assert!(result.history_b.iter().all(|x| *x == C));
    }

    #[test]
    fn test_invalid_noise_rejected() {
        let err = Match::new(MatchConfig::fixed(5).with_noise(1.5)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn test_probabilistic_length_in_range() {
        for seed in 0..100 {
            let mut rng = SeededRng::new(seed);
            let rounds = sample_length(&mut rng, 0.1, 50);
            assert!((1..=50).contains(&rounds), "sampled {} rounds", rounds);
        }
    }

    #[test]
    fn test_probabilistic_length_distribution() {
        let samples = 2000;
        let total: u32 = (0..samples)
            .map(|seed| sample_length(&mut SeededRng::new(seed), 0.1, 1000))
            .sum();
        let average = total as f64 / samples as f64;
        // Geometric with p = 0.1 has mean 10
        assert!(average > 9.0 && average < 11.0, "average {} not ~10", average);
    }

    #[test]
    fn test_probabilistic_edge_probabilities() {
        let mut rng = SeededRng::new(1);
        assert_eq!(sample_length(&mut rng, 0.0, 25), 25);
        assert_eq!(sample_length(&mut rng, 1.0, 25), 1);
    }

    #[test]
    fn test_probabilistic_match_hides_length() {
        let config = MatchConfig::probabilistic(0.2, 40).with_seed(Some(11));
        let mut a = Player::new(Cooperator);
        let mut b = Player::new(Alternator);
        let result = Match::new(config).unwrap().play(&mut a, &mut b).unwrap();
        assert!(result.rounds >= 1 && result.rounds <= 40);
        assert_eq!(result.history_a.len(), result.rounds as usize);
    }

    #[test]
    fn test_config_from_json() {
        let config = MatchConfig::from_json(
            r#"{"length": {"Fixed": 12}, "noise": 0.05, "seed": 7}"#,
        )
        .unwrap();
        assert_eq!(config.length, MatchLength::Fixed(12));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.game, Game::default());
    }

    #[test]
    fn test_config_from_json_rejects_zero_rounds() {
        let err = MatchConfig::from_json(r#"{"length": {"Fixed": 0}}"#).unwrap_err();
        assert_eq!(err, MatchError::InvalidMatchLength { rounds: 0 });
    }

    #[test]
    fn test_scores_with_custom_game() {
        let game = Game { reward: 2, sucker: 0, temptation: 4, punishment: 1 };
        let config = MatchConfig::fixed(3).with_game(game);
        let mut a = Player::new(Defector);
        let mut b = Player::new(Cooperator);
        let result = Match::new(config).unwrap().play(&mut a, &mut b).unwrap();
        assert_eq!(result.scores(&game), (12, 0));
    }
}
