use std::collections::HashMap;
use tracing::debug;

use crate::data::models::{Game, TeamId};
use crate::error::{RankingError, Result};

/// Games played and won over one specific set of completed games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub games: u32,
    pub wins: u32,
}

impl TeamRecord {
    pub fn losses(&self) -> u32 {
        self.games - self.wins
    }

    /// `wins / games`, or 0 for a team that has not played
    pub fn win_pct(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Per-team records for a fixed team universe
#[derive(Debug, Clone, Default)]
pub struct TeamRecords {
    records: HashMap<TeamId, TeamRecord>,
}

impl TeamRecords {
    /// Tally every completed game in `games` for the teams in `teams`.
    ///
    /// The winner gains a game and a win, the loser only a game. Games must be
    /// completed, decided and between teams of the universe.
    pub fn build<'a>(
        teams: impl IntoIterator<Item = TeamId>,
        games: impl IntoIterator<Item = &'a Game>,
    ) -> Result<Self> {
        let mut records: HashMap<TeamId, TeamRecord> = teams
            .into_iter()
            .map(|id| (id, TeamRecord::default()))
            .collect();

        let mut counted = 0usize;
        for game in games {
            let result = game.result()?;
            for team in [result.winner, result.loser] {
                if !records.contains_key(&team) {
                    return Err(RankingError::UnknownTeam {
                        team,
                        context: format!("game {}", game.id),
                    });
                }
            }
            if let Some(winner) = records.get_mut(&result.winner) {
                winner.games += 1;
                winner.wins += 1;
            }
            if let Some(loser) = records.get_mut(&result.loser) {
                loser.games += 1;
            }
            counted += 1;
        }

        debug!("Team records: {} teams over {} games", records.len(), counted);
        Ok(TeamRecords { records })
    }

    /// Record for a team in the universe this was built from
    pub fn get(&self, team: TeamId) -> Result<TeamRecord> {
        self.records
            .get(&team)
            .copied()
            .ok_or_else(|| RankingError::UnknownKey {
                key: team.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Scope;
    use crate::testing::{self, A, B, C, D};
    use approx::assert_relative_eq;

    #[test]
    fn test_records_over_all_completed_games() {
        let season = testing::season();
        let records = season.records_through(3, Scope::Overall).unwrap();
        assert_eq!(records.get(A).unwrap(), TeamRecord { games: 2, wins: 1 });
        assert_eq!(records.get(B).unwrap(), TeamRecord { games: 2, wins: 1 });
        assert_eq!(records.get(C).unwrap(), TeamRecord { games: 2, wins: 2 });
        assert_eq!(records.get(D).unwrap(), TeamRecord { games: 2, wins: 0 });
    }

    #[test]
    fn test_records_through_week_one() {
        let season = testing::season();
        let records = season.records_through(1, Scope::Overall).unwrap();
        assert_eq!(records.get(A).unwrap(), TeamRecord { games: 1, wins: 1 });
        assert_eq!(records.get(B).unwrap(), TeamRecord { games: 1, wins: 0 });
    }

    #[test]
    fn test_fbs_scope_drops_fcs_games() {
        let season = testing::season();
        let records = season.records_through(3, Scope::Fbs).unwrap();
        assert_eq!(records.get(B).unwrap(), TeamRecord { games: 1, wins: 0 });
        assert_eq!(records.get(C).unwrap(), TeamRecord { games: 1, wins: 1 });
        assert_eq!(records.get(D).unwrap(), TeamRecord::default());
    }

    #[test]
    fn test_win_pct_of_idle_team_is_zero() {
        assert_eq!(TeamRecord::default().win_pct(), 0.0);
        let r = TeamRecord { games: 3, wins: 2 };
        assert_relative_eq!(r.win_pct(), 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(r.losses(), 1);
    }

    #[test]
    fn test_unplayed_game_rejected() {
        let games = testing::games();
        let err = TeamRecords::build([A, B, C, D], games.iter()).unwrap_err();
        assert!(matches!(err, RankingError::IncompleteGame { .. }));
    }

    #[test]
    fn test_team_outside_universe_rejected() {
        let games = testing::games();
        let err = TeamRecords::build([A, B], games.iter().take(2)).unwrap_err();
        assert!(matches!(err, RankingError::UnknownTeam { team, .. } if team == C));
    }

    #[test]
    fn test_lookup_outside_universe_fails() {
        let records = TeamRecords::build([A], std::iter::empty()).unwrap();
        assert!(matches!(records.get(B), Err(RankingError::UnknownKey { .. })));
    }
}
