//! Ranking container and the ranking families built on it.
//!
//! Every ranking is a [`Ranking`] sorted once at construction: score vectors
//! compared element by element, higher first; then tie-breakers compared
//! element by element, lower first; then the key itself.

pub mod aggregate;
pub mod record;
pub mod simultaneous;
pub mod single_depth;
pub mod strength;
pub mod validation;

pub use aggregate::{Aggregate, AggregateValue, AggregationRule};
pub use record::{TeamRecord, TeamRecords};
pub use simultaneous::{SimultaneousValue, SimultaneousWins};
pub use single_depth::{SingleDepthValue, SingleDepthWins};
pub use validation::{GameOutcome, PredictionReport};

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

use crate::data::models::{Game, Team, TeamId};
use crate::error::{RankingError, Result};

/// Secondary sort key, compared ascending
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TieBreak {
    Number(i64),
    Text(String),
}

impl From<&str> for TieBreak {
    fn from(s: &str) -> Self {
        TieBreak::Text(s.to_string())
    }
}

/// Anything that can sit in a [`Ranking`].
///
/// All values in one ranking must return score and tie-break vectors of the
/// same length.
pub trait RankingValue {
    /// Score components, most significant first. Higher ranks first.
    fn scores(&self) -> Vec<f64>;

    /// Compared ascending when every score component is equal.
    fn tie_breakers(&self) -> Vec<TieBreak>;

    /// Display name of the ranked entity
    fn label(&self) -> String;

    fn summary(&self) -> String;
}

/// Ordered, immutable `(key, value)` sequence with key lookup.
#[derive(Debug, Clone)]
pub struct Ranking<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

struct SortEntry<K, V> {
    key: K,
    value: V,
    scores: Vec<f64>,
    tie_breakers: Vec<TieBreak>,
}

fn compare_scores(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        // Finite by construction, so partial_cmp never fails
        match y.partial_cmp(x).unwrap_or(Ordering::Equal) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl<K, V> Ranking<K, V>
where
    K: Clone + Eq + Hash + Ord + Debug,
    V: RankingValue,
{
    /// Sort `entries` into a ranking.
    ///
    /// Fails on duplicate keys, on vectors whose length differs from the first
    /// entry's, and on non-finite scores.
    pub fn new(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self> {
        let mut sortable: Vec<SortEntry<K, V>> = Vec::new();
        let mut shape: Option<(usize, usize)> = None;

        for (key, value) in entries {
            let scores = value.scores();
            let tie_breakers = value.tie_breakers();
            let (score_len, tie_len) = *shape.get_or_insert((scores.len(), tie_breakers.len()));
            if scores.len() != score_len {
                return Err(RankingError::ScoreLengthMismatch {
                    key: format!("{:?}", key),
                    expected: score_len,
                    found: scores.len(),
                });
            }
            if tie_breakers.len() != tie_len {
                return Err(RankingError::TieBreakLengthMismatch {
                    key: format!("{:?}", key),
                    expected: tie_len,
                    found: tie_breakers.len(),
                });
            }
            if let Some((index, &bad)) = scores.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(RankingError::NonFiniteScore {
                    key: format!("{:?}", key),
                    index,
                    value: bad,
                });
            }
            sortable.push(SortEntry {
                key,
                value,
                scores,
                tie_breakers,
            });
        }

        sortable.sort_by(|a, b| {
            compare_scores(&a.scores, &b.scores)
                .then_with(|| a.tie_breakers.cmp(&b.tie_breakers))
                .then_with(|| a.key.cmp(&b.key))
        });

        let mut index = HashMap::with_capacity(sortable.len());
        let mut ordered = Vec::with_capacity(sortable.len());
        for (position, entry) in sortable.into_iter().enumerate() {
            if index.insert(entry.key.clone(), position).is_some() {
                return Err(RankingError::DuplicateKey {
                    key: format!("{:?}", entry.key),
                });
            }
            ordered.push((entry.key, entry.value));
        }

        Ok(Ranking {
            entries: ordered,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Value for a key that must be in the ranking
    pub fn value(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or_else(|| RankingError::UnknownKey {
            key: format!("{:?}", key),
        })
    }

    /// Zero-based position of `key`
    pub fn position(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Order-preserving restriction to `keys`.
    ///
    /// Every key must belong to this ranking; duplicates are ignored.
    pub fn for_subset<'a>(&self, keys: impl IntoIterator<Item = &'a K>) -> Result<Self>
    where
        K: 'a,
        V: Clone,
    {
        let mut positions = Vec::new();
        for key in keys {
            let position = self.position(key).ok_or_else(|| RankingError::UnknownKey {
                key: format!("{:?}", key),
            })?;
            positions.push(position);
        }
        positions.sort_unstable();
        positions.dedup();

        let entries: Vec<(K, V)> = positions
            .into_iter()
            .map(|i| self.entries[i].clone())
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (k, _))| (k.clone(), i))
            .collect();
        Ok(Ranking { entries, index })
    }

    /// The first `n` entries
    pub fn top(&self, n: usize) -> Self
    where
        V: Clone,
    {
        let entries: Vec<(K, V)> = self.entries.iter().take(n).cloned().collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (k, _))| (k.clone(), i))
            .collect();
        Ranking { entries, index }
    }
}

// ── Performance rankings ─────────────────────────────────────────────────────

/// A per-team value produced by a performance method.
pub trait PerformanceValue: RankingValue + Clone {
    /// How derived rankings fold several of these together
    const AGGREGATION: AggregationRule;

    fn performance(&self) -> f64;
    fn team_value(&self) -> f64;
    fn opponent_value(&self) -> f64;
    fn record(&self) -> TeamRecord;
    fn name(&self) -> &str;
}

/// A way of turning completed games into a per-team performance ranking.
pub trait PerformanceMethod {
    const NAME: &'static str;
    type Value: PerformanceValue;

    /// Rank every FBS team in `teams` from the completed `games`.
    ///
    /// `records` must cover every team referenced by `games`.
    fn rank(
        teams: &HashMap<TeamId, Team>,
        games: &[&Game],
        records: &TeamRecords,
    ) -> Result<Ranking<TeamId, Self::Value>>;
}

/// Every FBS team in `teams`, in id order
pub(crate) fn fbs_teams(teams: &HashMap<TeamId, Team>) -> Vec<&Team> {
    let mut fbs: Vec<&Team> = teams.values().filter(|t| t.is_fbs()).collect();
    fbs.sort_by_key(|t| t.id);
    debug!("{} FBS teams of {}", fbs.len(), teams.len());
    fbs
}

/// Team lookup for a game participant
pub(crate) fn participant<'a>(
    teams: &'a HashMap<TeamId, Team>,
    id: TeamId,
    game: &Game,
) -> Result<&'a Team> {
    teams.get(&id).ok_or_else(|| RankingError::UnknownTeam {
        team: id,
        context: format!("game {}", game.id),
    })
}
