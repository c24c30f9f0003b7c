//! Rankings derived from an already-built performance ranking.
//!
//! None of these look at game scores: they only re-read or fold performance
//! entries, using the aggregation rule of the performance family.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::aggregate::{aggregate, Aggregate, AggregateValue};
use super::record::TeamRecord;
use super::{PerformanceValue, Ranking, RankingValue, TieBreak};
use crate::data::models::{Conference, ConferenceId, Game, GameId, TeamId};
use crate::error::Result;

// ── Win strength ─────────────────────────────────────────────────────────────

/// Opponent value first, team value second
#[derive(Debug, Clone, PartialEq)]
pub struct WinStrengthValue {
    name: String,
    record: TeamRecord,
    team_value: f64,
    opponent_value: f64,
}

impl WinStrengthValue {
    pub fn team_value(&self) -> f64 {
        self.team_value
    }

    pub fn opponent_value(&self) -> f64 {
        self.opponent_value
    }
}

impl RankingValue for WinStrengthValue {
    fn scores(&self) -> Vec<f64> {
        vec![self.opponent_value, self.team_value]
    }

    fn tie_breakers(&self) -> Vec<TieBreak> {
        vec![self.name.as_str().into()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        format!(
            "{}-{}, opponents {:.4}, team {:.4}",
            self.record.wins,
            self.record.losses(),
            self.opponent_value,
            self.team_value
        )
    }
}

pub fn win_strength<V: PerformanceValue>(
    performance: &Ranking<TeamId, V>,
) -> Result<Ranking<TeamId, WinStrengthValue>> {
    Ranking::new(performance.iter().map(|(id, v)| {
        (
            *id,
            WinStrengthValue {
                name: v.name().to_string(),
                record: v.record(),
                team_value: v.team_value(),
                opponent_value: v.opponent_value(),
            },
        )
    }))
}

// ── Schedule and conference strength ─────────────────────────────────────────

/// One aggregated number for a team or conference
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthValue {
    name: String,
    aggregate: AggregateValue,
}

impl StrengthValue {
    pub fn value(&self) -> f64 {
        self.aggregate.value
    }

    pub fn aggregate(&self) -> &AggregateValue {
        &self.aggregate
    }
}

impl RankingValue for StrengthValue {
    fn scores(&self) -> Vec<f64> {
        vec![self.aggregate.value]
    }

    fn tie_breakers(&self) -> Vec<TieBreak> {
        vec![self.name.as_str().into()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        self.aggregate.describe()
    }
}

/// Strength of each ranked team's opponents over `games`.
///
/// Opponents without a performance entry (FCS teams) contribute nothing; a
/// team with no ranked opponents in `games` gets 0.
pub fn schedule_strength<V: PerformanceValue>(
    performance: &Ranking<TeamId, V>,
    games: &[&Game],
) -> Result<Ranking<TeamId, StrengthValue>> {
    let mut folds: HashMap<TeamId, Aggregate> =
        performance.keys().map(|id| (*id, Aggregate::new())).collect();
    let mut unranked = 0usize;

    for game in games {
        for team in [game.home, game.away] {
            let (Some(fold), Some(opponent)) = (folds.get_mut(&team), game.opponent(team)) else {
                continue;
            };
            match performance.get(&opponent) {
                Some(entry) => fold.add(entry),
                None => unranked += 1,
            }
        }
    }
    debug!(
        "Schedule strength: {} games, {} unranked opponents skipped",
        games.len(),
        unranked
    );

    Ranking::new(performance.iter().map(|(id, v)| {
        let fold = folds.remove(id).unwrap_or_default();
        (
            *id,
            StrengthValue {
                name: v.name().to_string(),
                aggregate: fold.finish(V::AGGREGATION),
            },
        )
    }))
}

/// Strength of each conference from its members' performance entries.
///
/// Every member must be in `performance`.
pub fn conference_strength<V: PerformanceValue>(
    performance: &Ranking<TeamId, V>,
    conferences: &[Conference],
) -> Result<Ranking<ConferenceId, StrengthValue>> {
    let entries = conferences
        .iter()
        .map(|conference| -> Result<(ConferenceId, StrengthValue)> {
            let members = conference
                .members
                .iter()
                .map(|id| performance.value(id))
                .collect::<Result<Vec<_>>>()?;
            Ok((
                conference.id,
                StrengthValue {
                    name: conference.name.clone(),
                    aggregate: aggregate(members),
                },
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ranking::new(entries)
}

// ── Game strength ────────────────────────────────────────────────────────────

/// Combined strength of both participants of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameStrengthValue {
    week: u32,
    home: String,
    away: String,
    aggregate: AggregateValue,
}

impl GameStrengthValue {
    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn value(&self) -> f64 {
        self.aggregate.value
    }
}

impl RankingValue for GameStrengthValue {
    fn scores(&self) -> Vec<f64> {
        vec![self.aggregate.value]
    }

    fn tie_breakers(&self) -> Vec<TieBreak> {
        vec![
            TieBreak::Number(self.week as i64),
            self.home.as_str().into(),
            self.away.as_str().into(),
        ]
    }

    fn label(&self) -> String {
        format!("{} @ {}", self.away, self.home)
    }

    fn summary(&self) -> String {
        format!("week {}, {}", self.week, self.aggregate.describe())
    }
}

/// Strength of every game in `games` whose participants are both ranked
pub fn game_strength<V: PerformanceValue>(
    performance: &Ranking<TeamId, V>,
    games: &[&Game],
) -> Result<Ranking<GameId, GameStrengthValue>> {
    let entries = games.iter().filter_map(|game| {
        let home = performance.get(&game.home)?;
        let away = performance.get(&game.away)?;
        Some((
            game.id,
            GameStrengthValue {
                week: game.week,
                home: home.name().to_string(),
                away: away.name().to_string(),
                aggregate: aggregate([home, away]),
            },
        ))
    });
    Ranking::new(entries)
}

/// [`game_strength`] split into one independently ordered ranking per week
pub fn game_strength_by_week<V: PerformanceValue>(
    performance: &Ranking<TeamId, V>,
    games: &[&Game],
) -> Result<BTreeMap<u32, Ranking<GameId, GameStrengthValue>>> {
    let all = game_strength(performance, games)?;
    let mut weeks: BTreeMap<u32, Vec<GameId>> = BTreeMap::new();
    for (id, value) in all.iter() {
        weeks.entry(value.week).or_default().push(*id);
    }
    weeks
        .into_iter()
        .map(|(week, ids)| -> Result<(u32, Ranking<GameId, GameStrengthValue>)> {
            Ok((week, all.for_subset(&ids)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GameSelection, Scope, Season};
    use crate::ranking::{PerformanceMethod, SimultaneousWins, SingleDepthWins};
    use crate::error::RankingError;
    use crate::testing::{self, A, B, C, EAST, WEST};
    use approx::assert_relative_eq;

    fn performance<M: PerformanceMethod>(season: &Season) -> Ranking<TeamId, M::Value> {
        season.performance::<M>(Scope::Overall, 3).unwrap()
    }

    fn keys<K: Copy, V>(ranking: &Ranking<K, V>) -> Vec<K>
    where
        K: Eq + std::hash::Hash + Ord + std::fmt::Debug,
        V: RankingValue,
    {
        ranking.keys().copied().collect()
    }

    #[test]
    fn test_win_strength_reorders_by_opponent_value() {
        let season = testing::season();
        let perf = performance::<SimultaneousWins>(&season);
        let ranking = win_strength(&perf).unwrap();
        assert_eq!(keys(&ranking), vec![C, A, B]);
        let a = ranking.value(&A).unwrap();
        assert_relative_eq!(a.opponent_value(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(a.team_value(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_single_depth_win_strength_breaks_ties_on_team_value() {
        let season = testing::season();
        let perf = performance::<SingleDepthWins>(&season);
        let ranking = win_strength(&perf).unwrap();
        // Alpha and Charlie both face .250 opposition; Charlie is 2-0
        assert_eq!(keys(&ranking), vec![C, A, B]);
    }

    #[test]
    fn test_simultaneous_schedule_strength_overall() {
        let season = testing::season();
        let perf = performance::<SimultaneousWins>(&season);
        let games = season.schedule(GameSelection::Overall, 2);
        let ranking = schedule_strength(&perf, &games).unwrap();
        // Alpha: Bravo (0.5, 2 games) and Charlie (1.375, 2 games)
        assert_relative_eq!(ranking.value(&A).unwrap().value(), 0.9375, epsilon = 1e-12);
        // Bravo: Alpha (0.75) and Charlie (1.375); Delta is unranked
        assert_relative_eq!(ranking.value(&B).unwrap().value(), 1.0625, epsilon = 1e-12);
        assert_relative_eq!(ranking.value(&C).unwrap().value(), 0.625, epsilon = 1e-12);
        assert_eq!(keys(&ranking), vec![B, A, C]);
        assert_eq!(ranking.value(&B).unwrap().aggregate().contributors, 2);
    }

    #[test]
    fn test_schedule_strength_completed_and_future() {
        let season = testing::season();
        let perf = performance::<SimultaneousWins>(&season);

        let completed = schedule_strength(&perf, &season.schedule(GameSelection::Completed, 2)).unwrap();
        assert_relative_eq!(completed.value(&A).unwrap().value(), 0.9375, epsilon = 1e-12);
        assert_relative_eq!(completed.value(&B).unwrap().value(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(completed.value(&C).unwrap().value(), 0.75, epsilon = 1e-12);
        // Bravo and Charlie tie; names decide
        assert_eq!(keys(&completed), vec![A, B, C]);

        let future = schedule_strength(&perf, &season.schedule(GameSelection::Future, 2)).unwrap();
        assert_eq!(future.value(&A).unwrap().value(), 0.0);
        assert_relative_eq!(future.value(&B).unwrap().value(), 1.375, epsilon = 1e-12);
        assert_relative_eq!(future.value(&C).unwrap().value(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_single_depth_schedule_strength_pools_records() {
        let season = testing::season();
        let perf = performance::<SingleDepthWins>(&season);
        let games = season.schedule(GameSelection::Overall, 3);
        let ranking = schedule_strength(&perf, &games).unwrap();
        // Alpha: Bravo 1-1 + Charlie 2-0 = 3/4
        assert_relative_eq!(ranking.value(&A).unwrap().value(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(ranking.value(&B).unwrap().value(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(ranking.value(&C).unwrap().value(), 0.5, epsilon = 1e-12);
        assert_eq!(ranking.value(&A).unwrap().summary(), "3-1 (0.750) over 2 entries");
    }

    #[test]
    fn test_conference_strength() {
        let season = testing::season();
        let simultaneous = performance::<SimultaneousWins>(&season);
        let ranking = conference_strength(&simultaneous, season.conferences()).unwrap();
        assert_relative_eq!(ranking.value(&EAST).unwrap().value(), 0.625, epsilon = 1e-12);
        assert_relative_eq!(ranking.value(&WEST).unwrap().value(), 1.375, epsilon = 1e-12);
        assert_eq!(keys(&ranking), vec![WEST, EAST]);

        let single_depth = performance::<SingleDepthWins>(&season);
        let ranking = conference_strength(&single_depth, season.conferences()).unwrap();
        assert_relative_eq!(ranking.value(&EAST).unwrap().value(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(ranking.value(&WEST).unwrap().value(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_conference_with_unranked_member_fails() {
        let season = testing::season();
        let perf = performance::<SimultaneousWins>(&season);
        let mut conferences = season.conferences().to_vec();
        conferences[0].members.push(testing::D);
        assert!(matches!(
            conference_strength(&perf, &conferences),
            Err(RankingError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_game_strength() {
        let season = testing::season();
        let perf = performance::<SimultaneousWins>(&season);
        let games = season.schedule(GameSelection::Overall, 3);
        let ranking = game_strength(&perf, &games).unwrap();
        // Games against Delta are dropped
        assert_eq!(keys(&ranking), vec![GameId(3), GameId(5), GameId(1)]);
        assert_relative_eq!(ranking.value(&GameId(3)).unwrap().value(), 1.0625, epsilon = 1e-12);
        assert_relative_eq!(ranking.value(&GameId(5)).unwrap().value(), 0.9375, epsilon = 1e-12);
        assert_relative_eq!(ranking.value(&GameId(1)).unwrap().value(), 0.625, epsilon = 1e-12);
        assert_eq!(ranking.value(&GameId(5)).unwrap().label(), "Charlie @ Bravo");
    }

    #[test]
    fn test_game_strength_by_week() {
        let season = testing::season();
        let perf = performance::<SingleDepthWins>(&season);
        let games = season.schedule(GameSelection::Overall, 3);
        let weeks = game_strength_by_week(&perf, &games).unwrap();
        assert_eq!(weeks.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        for (week, ranking) in &weeks {
            assert_eq!(ranking.len(), 1);
            for (_, value) in ranking.iter() {
                assert_eq!(value.week(), *week);
            }
        }
        // Alpha 1-1 + Charlie 2-0
        assert_relative_eq!(weeks[&2].value(&GameId(3)).unwrap().value(), 0.75, epsilon = 1e-12);
    }
}
