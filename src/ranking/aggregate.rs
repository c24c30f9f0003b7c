//! The "fold a set of performance entries into one number" step shared by
//! schedule, conference and game strength.

use super::PerformanceValue;

/// How a family combines several performance entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationRule {
    /// Performance values averaged with each entry weighted by its game count
    WeightedPerformance,
    /// Wins and games summed across entries, then divided
    PooledRecord,
}

/// Accumulates performance entries; finished into an [`AggregateValue`].
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    weighted_sum: f64,
    wins: u32,
    games: u32,
    contributors: usize,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<V: PerformanceValue>(&mut self, entry: &V) {
        let record = entry.record();
        self.weighted_sum += entry.performance() * record.games as f64;
        self.wins += record.wins;
        self.games += record.games;
        self.contributors += 1;
    }

    pub fn finish(self, rule: AggregationRule) -> AggregateValue {
        let value = if self.games == 0 {
            0.0
        } else {
            match rule {
                AggregationRule::WeightedPerformance => self.weighted_sum / self.games as f64,
                AggregationRule::PooledRecord => self.wins as f64 / self.games as f64,
            }
        };
        AggregateValue {
            rule,
            value,
            wins: self.wins,
            games: self.games,
            contributors: self.contributors,
        }
    }
}

/// Result of folding entries under one rule. An empty fold has value 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateValue {
    pub rule: AggregationRule,
    pub value: f64,
    pub wins: u32,
    pub games: u32,
    pub contributors: usize,
}

impl AggregateValue {
    pub fn describe(&self) -> String {
        match self.rule {
            AggregationRule::WeightedPerformance => format!(
                "avg {:.4} over {} entries ({} games)",
                self.value, self.contributors, self.games
            ),
            AggregationRule::PooledRecord => format!(
                "{}-{} ({:.3}) over {} entries",
                self.wins,
                self.games - self.wins,
                self.value,
                self.contributors
            ),
        }
    }
}

/// Fold `entries` with the rule their family prescribes
pub fn aggregate<'a, V>(entries: impl IntoIterator<Item = &'a V>) -> AggregateValue
where
    V: PerformanceValue + 'a,
{
    entries
        .into_iter()
        .fold(Aggregate::new(), |mut acc, entry| {
            acc.add(entry);
            acc
        })
        .finish(V::AGGREGATION)
}
