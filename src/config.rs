use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use cfb_rankings::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankingMethod {
    /// Win percentage times opponents' win percentage
    SingleDepth,
    /// Linear system over every FBS-vs-FBS win
    Simultaneous,
}

/// College football rankings from a season snapshot
#[derive(Parser, Debug, Clone)]
#[command(name = "cfb-rankings", version, about)]
pub struct Config {
    /// Season snapshot (JSON)
    #[arg(long, env = "SEASON_FILE")]
    pub season_file: PathBuf,

    /// Rank using games through this week (defaults to the last regular-season week)
    #[arg(long, env = "TARGET_WEEK")]
    pub week: Option<u32>,

    /// Performance method
    #[arg(long, env = "RANKING_METHOD", value_enum, default_value = "simultaneous")]
    pub method: RankingMethod,

    /// Which completed games feed the performance ranking
    #[arg(long, env = "RANKING_SCOPE", value_enum, default_value = "overall")]
    pub scope: Scope,

    /// Number of rows printed per table
    #[arg(long, env = "TOP_N", default_value = "25")]
    pub top: usize,

    /// Also print the performance ranking restricted to this conference
    #[arg(long, env = "CONFERENCE")]
    pub conference: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.top == 0 {
            anyhow::bail!("top must be at least 1");
        }
        if self.week == Some(0) {
            anyhow::bail!("week must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["cfb-rankings", "--season-file", "s.json"]).unwrap();
        assert_eq!(config.method, RankingMethod::Simultaneous);
        assert_eq!(config.scope, Scope::Overall);
        assert_eq!(config.top, 25);
        assert!(config.week.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_value_enums() {
        let config = Config::try_parse_from([
            "cfb-rankings",
            "--season-file",
            "s.json",
            "--method",
            "single-depth",
            "--scope",
            "fbs",
        ])
        .unwrap();
        assert_eq!(config.method, RankingMethod::SingleDepth);
        assert_eq!(config.scope, Scope::Fbs);
    }

    #[test]
    fn test_rejects_zero_top_and_week() {
        let config =
            Config::try_parse_from(["cfb-rankings", "--season-file", "s.json", "--top", "0"]).unwrap();
        assert!(config.validate().is_err());
        let config =
            Config::try_parse_from(["cfb-rankings", "--season-file", "s.json", "--week", "0"]).unwrap();
        assert!(config.validate().is_err());
    }
}
