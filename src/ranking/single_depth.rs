//! Single-depth wins: a team's win percentage times its opponents' aggregate
//! win percentage, looked up one level deep.
//!
//! For every completed game the winner's opponent tally absorbs the loser's
//! own wins and games, while the loser's tally absorbs only the winner's
//! games. Credit therefore flows only through wins: beating a good team helps,
//! losing to one does not.

use std::collections::HashMap;
use tracing::info;

use super::aggregate::AggregationRule;
use super::record::{TeamRecord, TeamRecords};
use super::{fbs_teams, participant, PerformanceMethod, PerformanceValue, Ranking, RankingValue, TieBreak};
use crate::data::models::{Game, Team, TeamId};
use crate::error::Result;

pub struct SingleDepthWins;

#[derive(Debug, Clone, PartialEq)]
pub struct SingleDepthValue {
    name: String,
    record: TeamRecord,
    opponent_wins: u32,
    opponent_games: u32,
}

impl SingleDepthValue {
    pub fn new(
        name: impl Into<String>,
        record: TeamRecord,
        opponent_wins: u32,
        opponent_games: u32,
    ) -> Self {
        SingleDepthValue {
            name: name.into(),
            record,
            opponent_wins,
            opponent_games,
        }
    }

    pub fn opponent_wins(&self) -> u32 {
        self.opponent_wins
    }

    pub fn opponent_games(&self) -> u32 {
        self.opponent_games
    }

    pub fn team_win_pct(&self) -> f64 {
        self.record.win_pct()
    }

    pub fn opponent_win_pct(&self) -> f64 {
        TeamRecord {
            games: self.opponent_games,
            wins: self.opponent_wins,
        }
        .win_pct()
    }
}

impl RankingValue for SingleDepthValue {
    fn scores(&self) -> Vec<f64> {
        vec![self.performance(), self.team_win_pct(), self.opponent_win_pct()]
    }

    fn tie_breakers(&self) -> Vec<TieBreak> {
        vec![self.name.as_str().into()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        format!(
            "{}-{} ({:.3}), opponents {}/{} ({:.3})",
            self.record.wins,
            self.record.losses(),
            self.team_win_pct(),
            self.opponent_wins,
            self.opponent_games,
            self.opponent_win_pct()
        )
    }
}

impl PerformanceValue for SingleDepthValue {
    const AGGREGATION: AggregationRule = AggregationRule::PooledRecord;

    fn performance(&self) -> f64 {
        self.team_win_pct() * self.opponent_win_pct()
    }

    fn team_value(&self) -> f64 {
        self.team_win_pct()
    }

    fn opponent_value(&self) -> f64 {
        self.opponent_win_pct()
    }

    fn record(&self) -> TeamRecord {
        self.record
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Opponent wins/games gathered while walking the games
#[derive(Debug, Clone, Copy, Default)]
struct OpponentTally {
    wins: u32,
    games: u32,
}

impl PerformanceMethod for SingleDepthWins {
    const NAME: &'static str = "SingleDepthWins";
    type Value = SingleDepthValue;

    fn rank(
        teams: &HashMap<TeamId, Team>,
        games: &[&Game],
        records: &TeamRecords,
    ) -> Result<Ranking<TeamId, SingleDepthValue>> {
        let fbs = fbs_teams(teams);
        let mut tallies: HashMap<TeamId, OpponentTally> =
            fbs.iter().map(|t| (t.id, OpponentTally::default())).collect();

        for game in games {
            let result = game.result()?;
            participant(teams, result.winner, game)?;
            participant(teams, result.loser, game)?;
            let winner_record = records.get(result.winner)?;
            let loser_record = records.get(result.loser)?;

            if let Some(tally) = tallies.get_mut(&result.winner) {
                tally.wins += loser_record.wins;
                tally.games += loser_record.games;
            }
            if let Some(tally) = tallies.get_mut(&result.loser) {
                tally.games += winner_record.games;
            }
        }

        let entries = fbs
            .into_iter()
            .map(|team| -> Result<(TeamId, SingleDepthValue)> {
                let tally = tallies.get(&team.id).copied().unwrap_or_default();
                let value =
                    SingleDepthValue::new(&team.name, records.get(team.id)?, tally.wins, tally.games);
                Ok((team.id, value))
            })
            .collect::<Result<Vec<_>>>()?;

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
