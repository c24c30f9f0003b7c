use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

pub mod models;
use models::*;

use crate::error::{RankingError, Result};
use crate::ranking::record::TeamRecords;
use crate::ranking::{PerformanceMethod, Ranking};

/// Which completed games feed a performance ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Scope {
    /// Every completed game, FCS opponents included
    Overall,
    /// Only games where both participants are FBS
    Fbs,
}

/// Which games a schedule-strength ranking looks at, relative to a target week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSelection {
    /// Every game on the schedule
    Overall,
    /// Games completed in or before the target week
    Completed,
    /// Everything else: games after the target week or not yet played
    Future,
}

impl GameSelection {
    pub fn includes(self, game: &Game, week: u32) -> bool {
        let played = game.is_completed() && game.week <= week;
        match self {
            GameSelection::Overall => true,
            GameSelection::Completed => played,
            GameSelection::Future => !played,
        }
    }
}

// ── Snapshot format ──────────────────────────────────────────────────────────

/// On-disk season snapshot as produced by the ingestion step.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonSnapshot {
    pub season: i32,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub conferences: Vec<Conference>,
    pub games: Vec<GameEntry>,
}

/// A game row in the snapshot; scores are flat and optional.
#[derive(Debug, Clone, Deserialize)]
pub struct GameEntry {
    pub id: GameId,
    pub week: u32,
    pub date: chrono::NaiveDate,
    pub home: TeamId,
    pub away: TeamId,
    #[serde(default = "regular_phase")]
    pub phase: SeasonPhase,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
}

fn regular_phase() -> SeasonPhase {
    SeasonPhase::Regular
}

impl TryFrom<GameEntry> for Game {
    type Error = RankingError;

    fn try_from(entry: GameEntry) -> Result<Self> {
        let score = match (entry.home_score, entry.away_score) {
            (Some(home), Some(away)) => Some(FinalScore { home, away }),
            (None, None) => None,
            _ => return Err(RankingError::PartialScore { game: entry.id }),
        };
        Ok(Game {
            id: entry.id,
            week: entry.week,
            date: entry.date,
            home: entry.home,
            away: entry.away,
            phase: entry.phase,
            score,
        })
    }
}

// ── Season ───────────────────────────────────────────────────────────────────

/// Validated, read-only snapshot of one season's teams, conferences and games.
#[derive(Debug, Clone)]
pub struct Season {
    pub year: i32,
    teams: HashMap<TeamId, Team>,
    conferences: Vec<Conference>,
    games: Vec<Game>,
}

impl Season {
    /// Load and validate a JSON season snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let season = Self::from_json(&content)?;
        info!("Season snapshot loaded: {}", path.as_ref().display());
        Ok(season)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: SeasonSnapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: SeasonSnapshot) -> Result<Self> {
        let games = snapshot
            .games
            .into_iter()
            .map(Game::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(snapshot.season, snapshot.teams, snapshot.conferences, games)
    }

    /// Validate references and build the season.
    ///
    /// Conference membership is derived from the FBS teams' `conference`
    /// field; any members listed on the input conferences are replaced.
    pub fn new(
        year: i32,
        teams: Vec<Team>,
        mut conferences: Vec<Conference>,
        games: Vec<Game>,
    ) -> Result<Self> {
        let mut team_map = HashMap::with_capacity(teams.len());
        for team in teams {
            let id = team.id;
            if team_map.insert(id, team).is_some() {
                return Err(RankingError::DuplicateId {
                    kind: "team",
                    id: id.0,
                });
            }
        }

        let mut conference_index = HashMap::with_capacity(conferences.len());
        for (i, conference) in conferences.iter_mut().enumerate() {
            if conference_index.insert(conference.id, i).is_some() {
                return Err(RankingError::DuplicateId {
                    kind: "conference",
                    id: conference.id.0,
                });
            }
            conference.members.clear();
        }

        let mut team_ids: Vec<TeamId> = team_map.keys().copied().collect();
        team_ids.sort();
        let mut fbs_count = 0usize;
        for id in &team_ids {
            let team = &team_map[id];
            if team.is_fbs() {
                fbs_count += 1;
            }
            let Some(conference_id) = team.conference else {
                continue;
            };
            let index = conference_index.get(&conference_id).copied().ok_or(
                RankingError::UnknownConference {
                    conference: conference_id,
                    team: team.id,
                },
            )?;
            if team.is_fbs() {
                conferences[index].members.push(team.id);
            }
        }

        let mut game_ids = HashSet::with_capacity(games.len());
        for game in &games {
            if !game_ids.insert(game.id) {
                return Err(RankingError::DuplicateId {
                    kind: "game",
                    id: game.id.0,
                });
            }
            for team in [game.home, game.away] {
                if !team_map.contains_key(&team) {
                    return Err(RankingError::UnknownTeam {
                        team,
                        context: format!("game {}", game.id),
                    });
                }
            }
            if game.home == game.away {
                return Err(RankingError::SelfMatch {
                    game: game.id,
                    team: game.home,
                });
            }
            if game.is_completed() {
                game.result()?;
            }
        }

        info!(
            "Season {}: {} teams ({} FBS), {} conferences, {} games ({} completed)",
            year,
            team_map.len(),
            fbs_count,
            conferences.len(),
            games.len(),
            games.iter().filter(|g| g.is_completed()).count()
        );

        Ok(Season {
            year,
            teams: team_map,
            conferences,
            games,
        })
    }

    pub fn teams(&self) -> &HashMap<TeamId, Team> {
        &self.teams
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn conferences(&self) -> &[Conference] {
        &self.conferences
    }

    pub fn conference_by_name(&self, name: &str) -> Option<&Conference> {
        let name = name.to_lowercase();
        self.conferences
            .iter()
            .find(|c| c.name.to_lowercase() == name)
    }

    /// Highest week number among regular-season games
    pub fn last_regular_week(&self) -> Option<u32> {
        self.games
            .iter()
            .filter(|g| g.phase == SeasonPhase::Regular)
            .map(|g| g.week)
            .max()
    }

    fn in_scope(&self, game: &Game, scope: Scope) -> bool {
        match scope {
            Scope::Overall => true,
            Scope::Fbs => [game.home, game.away]
                .iter()
                .all(|id| self.teams.get(id).is_some_and(Team::is_fbs)),
        }
    }

    /// Completed games played in or before `week`, restricted to `scope`
    pub fn completed_through(&self, week: u32, scope: Scope) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| g.is_completed() && g.week <= week && self.in_scope(g, scope))
            .collect()
    }

    /// Games picked by `selection` relative to `week`
    pub fn schedule(&self, selection: GameSelection, week: u32) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| selection.includes(g, week))
            .collect()
    }

    /// Every game scheduled for the week after `week`; none once weeks run out
    pub fn next_week_games(&self, week: u32) -> Vec<&Game> {
        let Some(next) = week.checked_add(1) else {
            return Vec::new();
        };
        self.games.iter().filter(|g| g.week == next).collect()
    }

    /// Completed postseason games played after `week`.
    ///
    /// A ranking for `week` has seen none of these, so they measure prediction
    /// rather than retrodiction.
    pub fn postseason_after(&self, week: u32) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| g.phase == SeasonPhase::Postseason && g.is_completed() && g.week > week)
            .collect()
    }

    /// Team records over the completed games a ranking for `week` would see
    pub fn records_through(&self, week: u32, scope: Scope) -> Result<TeamRecords> {
        TeamRecords::build(self.teams.keys().copied(), self.completed_through(week, scope))
    }

    /// Run performance method `M` over the completed games through `week`
    pub fn performance<M: PerformanceMethod>(
        &self,
        scope: Scope,
        week: u32,
    ) -> Result<Ranking<TeamId, M::Value>> {
        let games = self.completed_through(week, scope);
        debug!(
            "{} ({:?}) through week {}: {} completed games",
            M::NAME,
            scope,
            week,
            games.len()
        );
        let records = TeamRecords::build(self.teams.keys().copied(), games.iter().copied())?;
        M::rank(&self.teams, &games, &records)
    }
}
