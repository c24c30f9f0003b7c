//! Plain-text tables for the CLI.

use std::fmt::Debug;
use std::hash::Hash;

use crate::ranking::{PredictionReport, Ranking, RankingValue};

/// Render the first `top` entries of `ranking` under `title`.
///
/// Columns are rank, label, every score component, and the value's summary.
pub fn render<K, V>(title: &str, ranking: &Ranking<K, V>, top: usize) -> String
where
    K: Clone + Eq + Hash + Ord + Debug,
    V: RankingValue,
{
    let rows: Vec<(String, String, String)> = ranking
        .iter()
        .take(top)
        .map(|(_, v)| {
            let scores = v
                .scores()
                .iter()
                .map(|s| format!("{:>9.4}", s))
                .collect::<Vec<_>>()
                .join(" ");
            (v.label(), scores, v.summary())
        })
        .collect();
    let width = rows.iter().map(|(label, _, _)| label.len()).max().unwrap_or(0).max(4);
    let score_width = rows.iter().map(|(_, s, _)| s.len()).max().unwrap_or(0).max(9);

    let mut out = format!("{} ({} of {})\n", title, rows.len(), ranking.len());
    out.push_str(&format!(
        "{:>4}  {:<width$}  {:>score_width$}  {}\n",
        "#", "Name", "Scores", "Detail"
    ));
    for (i, (label, scores, summary)) in rows.iter().enumerate() {
        out.push_str(&format!("{:>4}  {:<width$}  {}  {}\n", i + 1, label, scores, summary));
    }
    out
}

/// One-block summary of a retrodiction or prediction run
pub fn render_validation(title: &str, report: &PredictionReport) -> String {
    format!(
        "{}\n  games {}  correct {}  incorrect {}  skipped {}\n  accuracy {:.1}%\n",
        title,
        report.total(),
        report.correct,
        report.incorrect,
        report.skipped,
        report.accuracy() * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Scope;
    use crate::ranking::{validation, SimultaneousWins};
    use crate::testing;

    #[test]
    fn test_render_truncates_to_top() {
        let season = testing::season();
        let ranking = season.performance::<SimultaneousWins>(Scope::Overall, 3).unwrap();
        let text = render("Performance", &ranking, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Performance (2 of 3)");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("Charlie"));
        assert!(lines[2].contains("1.3750"));
        assert!(lines[3].contains("Alpha"));
        assert!(!text.contains("Bravo"));
    }

    #[test]
    fn test_render_empty_ranking() {
        let season = testing::season();
        let ranking = season.performance::<SimultaneousWins>(Scope::Overall, 3).unwrap();
        let text = render("Nothing", &ranking.top(0), 25);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("Nothing (0 of 0)"));
    }

    #[test]
    fn test_render_layout() {
        let season = testing::season();
        let ranking = season.performance::<SimultaneousWins>(Scope::Overall, 3).unwrap();
        let text = render("Top", &ranking, 1);
        let expected = format!(
            "Top (1 of 3)\n{:>4}  {:<7}  {:>29}  {}\n{:>4}  {:<7}  {:>9.4} {:>9.4} {:>9.4}  {}\n",
            "#",
            "Name",
            "Scores",
            "Detail",
            1,
            "Charlie",
            1.375,
            1.0,
            0.375,
            "2-0, team 1.0000 + opponents 0.3750"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_validation_layout() {
        let report = PredictionReport::default();
        assert_eq!(
            render_validation("Prediction", &report),
            "Prediction\n  games 0  correct 0  incorrect 0  skipped 0\n  accuracy 0.0%\n"
        );
    }

    #[test]
    fn test_render_validation() {
        let season = testing::season();
        let ranking = season.performance::<SimultaneousWins>(Scope::Overall, 3).unwrap();
        let games = season.completed_through(3, Scope::Overall);
        let report = validation::validate(&ranking, &games).unwrap();
        let text = render_validation("Retrodiction", &report);
        assert!(text.contains("games 4  correct 2  incorrect 0  skipped 2"));
        assert!(text.contains("accuracy 100.0%"));
    }
}
