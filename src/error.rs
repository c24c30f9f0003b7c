use thiserror::Error;

use crate::data::models::{ConferenceId, GameId, TeamId};
use crate::linalg::LinalgError;

/// Errors raised by ingestion and by every ranking computation.
///
/// A computation either succeeds as a whole or returns one of these; no
/// partial rankings are ever produced.
#[derive(Debug, Error)]
pub enum RankingError {
    // ── Input inconsistencies ────────────────────────────────────────────────
    #[error("Game {game} has equal final scores ({score}-{score})")]
    TiedGame { game: GameId, score: u32 },

    #[error("Game {game} lists {team} as both home and away")]
    SelfMatch { game: GameId, team: TeamId },

    #[error("Game {game} is not completed")]
    IncompleteGame { game: GameId },

    #[error("Game {game} has only one final score")]
    PartialScore { game: GameId },

    #[error("Unknown team {team} referenced by {context}")]
    UnknownTeam { team: TeamId, context: String },

    #[error("Unknown conference {conference} referenced by team {team}")]
    UnknownConference { conference: ConferenceId, team: TeamId },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: i64 },

    #[error("{method}: record for {team} shows no games but the team won game {game}")]
    RecordMismatch {
        method: &'static str,
        team: TeamId,
        game: GameId,
    },

    // ── Numeric failures ─────────────────────────────────────────────────────
    #[error("{method}: linear solve failed: {source}")]
    Numeric {
        method: &'static str,
        #[source]
        source: LinalgError,
    },

    #[error("Score component {index} for {key} is not finite ({value})")]
    NonFiniteScore {
        key: String,
        index: usize,
        value: f64,
    },

    // ── Ranking container ────────────────────────────────────────────────────
    #[error("Key {key} is not part of this ranking")]
    UnknownKey { key: String },

    #[error("Key {key} appears more than once in ranking input")]
    DuplicateKey { key: String },

    #[error("Entry {key} has {found} score components, expected {expected}")]
    ScoreLengthMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Entry {key} has {found} tie-breakers, expected {expected}")]
    TieBreakLengthMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    // ── Ingestion ────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed season snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RankingError>;
