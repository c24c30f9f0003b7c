//! College football power rankings computed from game results.
//!
//! A [`data::Season`] holds the teams, conferences and games of one season.
//! Performance methods ([`ranking::SingleDepthWins`],
//! [`ranking::SimultaneousWins`]) turn its completed games into a per-team
//! [`ranking::Ranking`]; [`ranking::strength`] derives schedule, conference and
//! game strength from that, and [`ranking::validation`] scores it against
//! actual results.

pub mod data;
pub mod error;
pub mod linalg;
pub mod ranking;
pub mod report;

#[cfg(test)]
mod testing;

pub use data::{GameSelection, Scope, Season};
pub use error::{RankingError, Result};
pub use ranking::{PerformanceMethod, PerformanceValue, Ranking, RankingValue};
