use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

use crate::error::{RankingError, Result};

/// Unique identifier for a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub i64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team({})", self.0)
    }
}

/// Unique identifier for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Unique identifier for a conference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct ConferenceId(pub i64);

impl fmt::Display for ConferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conference({})", self.0)
    }
}

/// Competition tier. Only FBS teams receive full rankings; FCS teams only
/// ever show up as opponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Fbs,
    Fcs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonPhase {
    Regular,
    Postseason,
}

/// A college football team
#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub conference: Option<ConferenceId>,
    #[serde(default)]
    pub division: Option<String>,
    pub tier: Tier,
}

impl Team {
    pub fn is_fbs(&self) -> bool {
        self.tier == Tier::Fbs
    }
}

/// Final score of a completed game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FinalScore {
    pub home: u32,
    pub away: u32,
}

/// Winner and loser of a completed game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub winner: TeamId,
    pub loser: TeamId,
}

/// A scheduled or completed game.
///
/// `score` is present iff the game has been played.
#[derive(Debug, Clone, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub week: u32,
    pub date: NaiveDate,
    pub home: TeamId,
    pub away: TeamId,
    pub phase: SeasonPhase,
    pub score: Option<FinalScore>,
}

impl Game {
    pub fn is_completed(&self) -> bool {
        self.score.is_some()
    }

    /// Get the opponent for a given team
    pub fn opponent(&self, team: TeamId) -> Option<TeamId> {
        if team == self.home {
            Some(self.away)
        } else if team == self.away {
            Some(self.home)
        } else {
            None
        }
    }

    /// Winner and loser of a completed game.
    ///
    /// Fails for unplayed games, self-matches and equal scores, none of which
    /// should survive ingestion.
    pub fn result(&self) -> Result<GameResult> {
        if self.home == self.away {
            return Err(RankingError::SelfMatch {
                game: self.id,
                team: self.home,
            });
        }
        let score = self
            .score
            .ok_or(RankingError::IncompleteGame { game: self.id })?;
        match score.home.cmp(&score.away) {
            std::cmp::Ordering::Greater => Ok(GameResult {
                winner: self.home,
                loser: self.away,
            }),
            std::cmp::Ordering::Less => Ok(GameResult {
                winner: self.away,
                loser: self.home,
            }),
            std::cmp::Ordering::Equal => Err(RankingError::TiedGame {
                game: self.id,
                score: score.home,
            }),
        }
    }
}

/// A conference and its FBS member teams
#[derive(Debug, Clone, Deserialize)]
pub struct Conference {
    pub id: ConferenceId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<TeamId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(home_score: Option<u32>, away_score: Option<u32>) -> Game {
        Game {
            id: GameId(7),
            week: 3,
            date: NaiveDate::from_ymd_opt(2023, 9, 16).unwrap(),
            home: TeamId(1),
            away: TeamId(2),
            phase: SeasonPhase::Regular,
            score: home_score.zip(away_score).map(|(home, away)| FinalScore { home, away }),
        }
    }

    #[test]
    fn test_home_win_result() {
        let r = game(Some(31), Some(17)).result().unwrap();
        assert_eq!(r.winner, TeamId(1));
        assert_eq!(r.loser, TeamId(2));
    }

    #[test]
    fn test_away_win_result() {
        let r = game(Some(3), Some(10)).result().unwrap();
        assert_eq!(r.winner, TeamId(2));
        assert_eq!(r.loser, TeamId(1));
    }

    #[test]
    fn test_tied_game_rejected() {
        let err = game(Some(21), Some(21)).result().unwrap_err();
        assert!(matches!(err, RankingError::TiedGame { score: 21, .. }));
    }

    #[test]
    fn test_unplayed_game_has_no_result() {
        let g = game(None, None);
        assert!(!g.is_completed());
        assert!(matches!(g.result(), Err(RankingError::IncompleteGame { .. })));
    }

    #[test]
    fn test_opponent_lookup() {
        let g = game(None, None);
        assert_eq!(g.opponent(TeamId(1)), Some(TeamId(2)));
        assert_eq!(g.opponent(TeamId(2)), Some(TeamId(1)));
        assert_eq!(g.opponent(TeamId(3)), None);
    }
}
