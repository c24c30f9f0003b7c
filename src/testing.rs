//! Shared season fixture for unit tests.
//!
//! Alpha, Bravo (East) and Charlie (West) are FBS; Delta is FCS.
//!
//! | game | week | home    | away    | score  |
//! |------|------|---------|---------|--------|
//! | 1    | 1    | Alpha   | Bravo   | 30-20  |
//! | 2    | 1    | Charlie | Delta   | 24-10  |
//! | 3    | 2    | Alpha   | Charlie | 14-21  |
//! | 4    | 2    | Bravo   | Delta   | 28-7   |
//! | 5    | 3    | Bravo   | Charlie |        |

use chrono::NaiveDate;

use crate::data::models::*;
use crate::data::Season;

pub const A: TeamId = TeamId(1);
pub const B: TeamId = TeamId(2);
pub const C: TeamId = TeamId(3);
pub const D: TeamId = TeamId(4);

pub const EAST: ConferenceId = ConferenceId(1);
pub const WEST: ConferenceId = ConferenceId(2);

pub fn team(id: TeamId, name: &str, conference: Option<ConferenceId>, tier: Tier) -> Team {
    Team {
        id,
        name: name.into(),
        conference,
        division: None,
        tier,
    }
}

pub fn game(id: i64, week: u32, home: TeamId, away: TeamId, score: Option<(u32, u32)>) -> Game {
    Game {
        id: GameId(id),
        week,
        date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap() + chrono::Duration::weeks(week as i64),
        home,
        away,
        phase: SeasonPhase::Regular,
        score: score.map(|(home, away)| FinalScore { home, away }),
    }
}

pub fn teams() -> Vec<Team> {
    vec![
        team(A, "Alpha", Some(EAST), Tier::Fbs),
        team(B, "Bravo", Some(EAST), Tier::Fbs),
        team(C, "Charlie", Some(WEST), Tier::Fbs),
        team(D, "Delta", None, Tier::Fcs),
    ]
}

pub fn conferences() -> Vec<Conference> {
    vec![
        Conference {
            id: EAST,
            name: "East".into(),
            members: vec![],
        },
        Conference {
            id: WEST,
            name: "West".into(),
            members: vec![],
        },
    ]
}

pub fn games() -> Vec<Game> {
    vec![
        game(1, 1, A, B, Some((30, 20))),
        game(2, 1, C, D, Some((24, 10))),
        game(3, 2, A, C, Some((14, 21))),
        game(4, 2, B, D, Some((28, 7))),
        game(5, 3, B, C, None),
    ]
}

pub fn season() -> Season {
    Season::new(2023, teams(), conferences(), games()).unwrap()
}
