//! Simultaneous wins: every FBS team's value is its own win percentage plus a
//! share of the values of the FBS teams it beat, all solved together.
//!
//! With `n` FBS teams the system is `A x = b` where
//!
//! ```text
//! A[i][i] = 1
//! A[i][j] = -(times i beat j) / games[i]
//! b[i]    = wins[i] / games[i]
//! ```
//!
//! so `x[i] = b[i] + Σ x[j] / games[i]` over every FBS win. The opponent
//! value is whatever the solve adds on top of the win percentage.

use std::collections::HashMap;
use tracing::{debug, info};

use super::aggregate::AggregationRule;
use super::record::{TeamRecord, TeamRecords};
use super::{fbs_teams, participant, PerformanceMethod, PerformanceValue, Ranking, RankingValue, TieBreak};
use crate::data::models::{Game, Team, TeamId};
use crate::error::{RankingError, Result};
use crate::linalg::Matrix;

pub struct SimultaneousWins;

#[derive(Debug, Clone, PartialEq)]
pub struct SimultaneousValue {
    name: String,
    record: TeamRecord,
    performance: f64,
}

impl SimultaneousValue {
    pub fn new(name: impl Into<String>, record: TeamRecord, performance: f64) -> Self {
        SimultaneousValue {
            name: name.into(),
            record,
            performance,
        }
    }
}

impl RankingValue for SimultaneousValue {
    fn scores(&self) -> Vec<f64> {
        vec![self.performance, self.team_value(), self.opponent_value()]
    }

    fn tie_breakers(&self) -> Vec<TieBreak> {
        vec![self.name.as_str().into()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        format!(
            "{}-{}, team {:.4} + opponents {:.4}",
            self.record.wins,
            self.record.losses(),
            self.team_value(),
            self.opponent_value()
        )
    }
}

impl PerformanceValue for SimultaneousValue {
    const AGGREGATION: AggregationRule = AggregationRule::WeightedPerformance;

    fn performance(&self) -> f64 {
        self.performance
    }

    fn team_value(&self) -> f64 {
        self.record.win_pct()
    }

    fn opponent_value(&self) -> f64 {
        self.performance - self.team_value()
    }

    fn record(&self) -> TeamRecord {
        self.record
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl PerformanceMethod for SimultaneousWins {
    const NAME: &'static str = "SimultaneousWins";
    type Value = SimultaneousValue;

    fn rank(
        teams: &HashMap<TeamId, Team>,
        games: &[&Game],
        records: &TeamRecords,
    ) -> Result<Ranking<TeamId, SimultaneousValue>> {
        let fbs = fbs_teams(teams);
        let index: HashMap<TeamId, usize> =
            fbs.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let n = fbs.len();

        let team_records = fbs
            .iter()
            .map(|t| records.get(t.id))
            .collect::<Result<Vec<_>>>()?;
        let b: Vec<f64> = team_records.iter().map(TeamRecord::win_pct).collect();
        let mut a = Matrix::identity(n);

        let mut fbs_games = 0usize;
        for game in games {
            let result = game.result()?;
            participant(teams, result.winner, game)?;
            participant(teams, result.loser, game)?;
            let (Some(&i), Some(&j)) = (index.get(&result.winner), index.get(&result.loser)) else {
                continue;
            };
            let played = team_records[i].games;
            if played == 0 {
                return Err(RankingError::RecordMismatch {
                    method: Self::NAME,
                    team: result.winner,
                    game: game.id,
                });
            }
            a.add_to(i, j, -1.0 / played as f64);
            fbs_games += 1;
        }

        debug!(
            "{}: solving {}x{} system ({} FBS-vs-FBS games)",
            Self::NAME,
            n,
            n,
            fbs_games
        );
        let x = a.solve(&b).map_err(|source| RankingError::Numeric {
            method: Self::NAME,
            source,
        })?;

        let entries = fbs
            .iter()
            .zip(team_records)
            .zip(x)
            .map(|((team, record), performance)| {
                (team.id, SimultaneousValue::new(&team.name, record, performance))
            });
        let ranking = Ranking::new(entries)?;
        info!(
            "{}: ranked {} teams from {} games",
            Self::NAME,
            ranking.len(),
            games.len()
        );
        Ok(ranking)
    }
}
