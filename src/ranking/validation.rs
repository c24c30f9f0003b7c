//! Scores a performance ranking against completed games: did the team with
//! the higher performance value win?
//!
//! Run against the games a ranking was built from this measures retrodiction;
//! run against games it never saw (e.g. a regular-season ranking against the
//! postseason) it measures prediction.

use std::fmt;
use tracing::info;

use super::{PerformanceValue, Ranking};
use crate::data::models::{Game, GameId, TeamId};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The higher-valued team won
    Correct,
    /// The lower-valued team won
    Incorrect,
    /// Equal values, or a participant the ranking does not cover
    Skipped,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Correct => write!(f, "Correct"),
            GameOutcome::Incorrect => write!(f, "Incorrect"),
            GameOutcome::Skipped => write!(f, "Skipped"),
        }
    }
}

/// Per-game outcomes plus tallies
#[derive(Debug, Clone, Default)]
pub struct PredictionReport {
    pub outcomes: Vec<(GameId, GameOutcome)>,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

impl PredictionReport {
    /// `correct / (correct + incorrect)`; 0 when no game was decided
    pub fn accuracy(&self) -> f64 {
        let decided = self.correct + self.incorrect;
        if decided == 0 {
            0.0
        } else {
            self.correct as f64 / decided as f64
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn record(&mut self, game: GameId, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Correct => self.correct += 1,
            GameOutcome::Incorrect => self.incorrect += 1,
            GameOutcome::Skipped => self.skipped += 1,
        }
        self.outcomes.push((game, outcome));
    }
}

/// Classify one completed game against `ranking`
pub fn classify<V: PerformanceValue>(ranking: &Ranking<TeamId, V>, game: &Game) -> Result<GameOutcome> {
    let result = game.result()?;
    let (Some(winner), Some(loser)) = (ranking.get(&result.winner), ranking.get(&result.loser)) else {
        return Ok(GameOutcome::Skipped);
    };
    let outcome = if winner.performance() > loser.performance() {
        GameOutcome::Correct
    } else if winner.performance() < loser.performance() {
        GameOutcome::Incorrect
    } else {
        GameOutcome::Skipped
    };
    Ok(outcome)
}

/// Classify every game in `games`, which must all be completed
pub fn validate<V: PerformanceValue>(
    ranking: &Ranking<TeamId, V>,
    games: &[&Game],
) -> Result<PredictionReport> {
    let mut report = PredictionReport::default();
    for game in games {
        report.record(game.id, classify(ranking, game)?);
    }
    info!(
        "Validation: {} correct, {} incorrect, {} skipped ({:.1}% accuracy)",
        report.correct,
        report.incorrect,
        report.skipped,
        report.accuracy() * 100.0
    );
    Ok(report)
}
