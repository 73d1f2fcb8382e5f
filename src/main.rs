use crate::algos::Greedy;
use crate::config::Config;
use crate::loaders::{CsvLoader, DatabaseLoader};
use clap::{Parser, ValueEnum};
use eyre::{Result, bail};
use std::path::PathBuf;
use tracing::{Level, info, warn};

mod algos;
mod checks;
mod config;
mod display;
mod loaders;
mod model;
mod stats;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Use FILE instead of vcmatch.toml
    #[arg(short, long, value_name = "FILE", default_value = "vcmatch.toml")]
    config: PathBuf,
    /// Session date (YYYY-MM-DD) used to select available volunteers
    #[arg(short, long, value_parser = parse_date)]
    date: Option<String>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Set verbosity level (repeat for more)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Accept an existing calendar date written as `YYYY-MM-DD`.
fn parse_date(s: &str) -> Result<String, String> {
    let invalid = || format!("{s} is not a valid YYYY-MM-DD date");
    let parts = s.split('-').collect::<Vec<_>>();
    let [y, m, d] = parts.as_slice() else {
        return Err(invalid());
    };
    if y.len() != 4
        || m.len() != 2
        || d.len() != 2
        || !parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid());
    }
    let (year, month, day) = match (y.parse::<u32>(), m.parse::<u32>(), d.parse::<u32>()) {
        (Ok(year), Ok(month), Ok(day)) => (year, month, day),
        _ => return Err(invalid()),
    };
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(invalid());
    }
    Ok(s.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = Config::load(&options.config)?;
    let date = options.date.as_deref();
    let roster = match config.loader.as_str() {
        "database" => {
            let mut loader = DatabaseLoader::new(&config.database.url).await?;
            let roster = loader.load(date).await?;
            loader.close().await?;
            roster
        }
        "csv" => CsvLoader::new(&config.csv.directory).load(date)?,
        other => bail!("unknown loader: {}", other),
    };
    let matching = roster.assign(&mut Greedy::new(config.scoring, rand::rng()));
    if matching.is_empty() {
        warn!("no student to match");
    }
    info!(
        assigned = matching.len() - matching.unassigned_students().len(),
        unassigned = matching.unassigned_students().len(),
        "matching done"
    );
    match options.format {
        Format::Text => {
            display::display_details(&roster, &matching);
            display::display_stats(&roster, &matching);
            display::display_idle(&roster, &matching);
            display::display_unassigned(&roster, &matching);
        }
        Format::Json => println!("{}", display::to_json(&roster, &matching)?),
    }
    checks::check_lost_affinity(&roster, &matching);
    Ok(())
}

#[test]
fn test_parse_date() {
    assert!(parse_date("2024-03-01").is_ok());
    assert!(parse_date("2024-3-1").is_err());
    assert!(parse_date("2024-03-0a").is_err());
    assert!(parse_date("20240301").is_err());
    assert!(parse_date("2024-13-45").is_err());
    assert!(parse_date("2024-00-10").is_err());
    assert!(parse_date("2024-04-31").is_err());
    assert!(parse_date("2024-02-29").is_ok());
    assert!(parse_date("2023-02-29").is_err());
    assert!(parse_date("2000-02-29").is_ok());
    assert!(parse_date("1900-02-29").is_err());
}

#[test]
fn test_options() {
    use clap::CommandFactory;
    Options::command().debug_assert();
    let options = Options::parse_from(["vcmatch", "-vv", "-d", "2024-03-01", "-f", "json"]);
    assert_eq!(options.verbose, 2);
    assert_eq!(options.date.as_deref(), Some("2024-03-01"));
    assert!(matches!(options.format, Format::Json));
    assert_eq!(options.config, PathBuf::from("vcmatch.toml"));
}
