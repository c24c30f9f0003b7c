use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use cfb_rankings::ranking::{strength, validation, SimultaneousWins, SingleDepthWins};
use cfb_rankings::{report, GameSelection, PerformanceMethod, Season};

mod config;

use config::{Config, RankingMethod};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let season = Season::load(&config.season_file)
        .with_context(|| format!("Failed to load season from {}", config.season_file.display()))?;

    let week = match config.week {
        Some(week) => week,
        None => season
            .last_regular_week()
            .context("Season has no regular-season games")?,
    };
    info!(
        "Ranking season {} through week {} ({:?}, {:?} scope)",
        season.year, week, config.method, config.scope
    );

    match config.method {
        RankingMethod::SingleDepth => run::<SingleDepthWins>(&season, &config, week),
        RankingMethod::Simultaneous => run::<SimultaneousWins>(&season, &config, week),
    }
}

fn run<M: PerformanceMethod>(season: &Season, config: &Config, week: u32) -> Result<()> {
    let top = config.top;
    let performance = season.performance::<M>(config.scope, week)?;
    let title = |what: &str| format!("{} {} - week {}", M::NAME, what, week);

    println!("{}", report::render(&title("performance"), &performance, top));

    if let Some(name) = &config.conference {
        match season.conference_by_name(name) {
            Some(conference) => {
                let members = performance.for_subset(&conference.members)?;
                println!("{}", report::render(&title(&conference.name), &members, top));
            }
            None => warn!("No conference named {:?}", name),
        }
    }

    let wins = strength::win_strength(&performance)?;
    println!("{}", report::render(&title("win strength"), &wins, top));

    for (label, selection) in [
        ("completed schedule strength", GameSelection::Completed),
        ("future schedule strength", GameSelection::Future),
        ("overall schedule strength", GameSelection::Overall),
    ] {
        let games = season.schedule(selection, week);
        let ranking = strength::schedule_strength(&performance, &games)?;
        println!("{}", report::render(&title(label), &ranking, top));
    }

    let conferences = strength::conference_strength(&performance, season.conferences())?;
    println!("{}", report::render(&title("conference strength"), &conferences, top));

    let next_week = season.next_week_games(week);
    if next_week.is_empty() {
        info!("No games scheduled after week {}", week);
    } else {
        let games = strength::game_strength(&performance, &next_week)?;
        let label = format!("game strength for week {}", next_week[0].week);
        println!("{}", report::render(&title(&label), &games, top));
    }

    let played = season.completed_through(week, config.scope);
    let retrodiction = validation::validate(&performance, &played)?;
    println!("{}", report::render_validation(&title("retrodiction"), &retrodiction));

    let postseason = season.postseason_after(week);
    if postseason.is_empty() {
        info!("No completed postseason games after week {} to predict", week);
    } else {
        let prediction = validation::validate(&performance, &postseason)?;
        println!("{}", report::render_validation(&title("postseason prediction"), &prediction));
    }

    Ok(())
}
