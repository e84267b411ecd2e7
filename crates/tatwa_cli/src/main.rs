//! tatwametro: which tatwa is active for a place and time.
//!
//! ```bash
//! tatwametro --lat 40.4168 --lon -3.7038
//! tatwametro --address "Madrid" --time 07:30:00 --schedule
//! tatwametro --lat 40.4168 --lon -3.7038 --event salida=2024-06-21T06:00:00+02:00 \
//!     --date 21-06-2024 --time 06:25:00
//! ```
//!
//! Keys and defaults come from `--config` and `TATWA_*` variables; logging
//! is controlled with `RUST_LOG`.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use tatwa_api::providers_from_config;
use tatwa_base::{SolarEvent, TatwaError};
use tatwa_config::{ConfigError, TatwaConfig, TimeMode};
use tatwa_engine::{EnvironmentError, EventTime, LookupError, TatwaEnvironment};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tatwametro", about = "Tatwa active at a place and time", version)]
struct Cli {
    /// Latitude in degrees (north positive)
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,
    /// Longitude in degrees (east positive)
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,
    /// Address to geocode instead of coordinates
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    address: Option<String>,
    /// Do not look up an address for --lat/--lon
    #[arg(long)]
    no_address: bool,
    /// Date of the reference sunrise [DD-MM-YYYY] (most recent by default)
    #[arg(long, value_parser = parse_date)]
    solar_date: Option<NaiveDate>,
    /// Date to compute the tatwa for [DD-MM-YYYY] (today by default)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Time to compute the tatwa for [HH:MM:SS] (now by default)
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,
    /// Manual solar event, e.g. salida=2024-06-21T06:00:00+02:00 (repeatable)
    #[arg(long = "event", value_parser = parse_event)]
    events: Vec<(SolarEvent, String)>,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where "now" comes from: ntp, api or local
    #[arg(long)]
    time_mode: Option<TimeMode>,
    /// Also print the full five-tatwa cycle of every anchor event
    #[arg(long)]
    schedule: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("services: {0}")]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%d-%m-%Y")
        .map_err(|e| format!("expected DD-MM-YYYY: {e}"))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M:%S").map_err(|e| format!("expected HH:MM:SS: {e}"))
}

fn parse_event(s: &str) -> Result<(SolarEvent, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=DATETIME, got {s:?}"))?;
    let event: SolarEvent = name.parse().map_err(|e: TatwaError| e.to_string())?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("missing time for {event}"));
    }
    Ok((event, value.to_string()))
}

fn load_config(cli: &Cli) -> Result<TatwaConfig, CliError> {
    let mut config = TatwaConfig::load_or_default(cli.config.as_deref())?;
    config.apply_process_env()?;
    if let Some(mode) = cli.time_mode {
        config.time.mode = mode;
    }
    debug!(time = ?config.time, anchors = ?config.anchors, "configuration loaded");
    Ok(config)
}

fn locate(env: &mut TatwaEnvironment, cli: &Cli) -> Result<(), CliError> {
    match (&cli.address, cli.lat, cli.lon) {
        (Some(address), _, _) => env.set_address(address, true)?,
        (None, Some(lat), Some(lon)) => env.set_coordinates(lat, lon, !cli.no_address)?,
        _ => {
            return Err(CliError::Usage(
                "give either --address or both --lat and --lon".into(),
            ));
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let providers = providers_from_config(&config)?;
    let mut env = TatwaEnvironment::new(providers).with_anchors(config.anchors.iter().copied());

    print!("{}", report::banner());
    locate(&mut env, &cli)?;
    if let Some(location) = env.coordinates() {
        println!(
            "Location: {location} => {} [{}]",
            env.address().unwrap_or("-"),
            env.timezone_id().unwrap_or("-")
        );
    }

    if cli.events.is_empty() {
        env.set_solar_date(cli.solar_date);
        println!("\nFetching solar events...\n");
        env.refresh_solar_events()?;
    } else {
        let events = cli
            .events
            .iter()
            .map(|(event, text)| (*event, EventTime::from(text.as_str())));
        env.set_manual_solar_events(events)?;
    }
    for (event, instant) in env.solar_events() {
        println!("{:<22} {}", event.description(), report::format_stamp(instant));
    }
    if let Some(length) = env.day_length() {
        println!("{:<22} {}", "day length", report::format_duration(length));
    }

    env.set_query_date(cli.date);
    env.set_query_time(cli.time);
    println!("\nComputing tatwas...\n");
    let computed = env.compute_tatwas().map(|_| ());
    match computed {
        Ok(()) => {
            if let Some(query) = env.query_instant() {
                let title = format!("TATWA AT {}", report::format_stamp(&query));
                println!("{}", report::heading(&title));
            }
            for event in env.anchors() {
                if env.solar_event(*event).is_some() {
                    print!("{}", report::tatwa_block(*event, env.tatwa(*event)));
                }
            }
        }
        Err(EnvironmentError::AllEventsIncoherent) => {
            println!("{}", report::heading("TATWA"));
            for event in env.anchors() {
                if env.solar_event(*event).is_some() {
                    print!("{}", report::tatwa_block(*event, None));
                }
            }
        }
        Err(e) => return Err(e.into()),
    }

    if cli.schedule {
        println!();
        println!("{}", report::heading("CYCLES"));
        for event in env.anchors() {
            match env.schedule(*event) {
                Ok(slots) => print!("{}", report::schedule_block(*event, &slots)),
                Err(EnvironmentError::EventNotAvailable(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_coordinates_and_pins() {
        let cli = Cli::try_parse_from([
            "tatwametro",
            "--lat",
            "40.4168",
            "--lon",
            "-3.7038",
            "--date",
            "21-06-2024",
            "--time",
            "06:25:00",
            "--time-mode",
            "local",
        ])
        .unwrap();
        assert_eq!(cli.lon, Some(-3.7038));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 6, 21));
        assert_eq!(cli.time, NaiveTime::from_hms_opt(6, 25, 0));
        assert_eq!(cli.time_mode, Some(TimeMode::Local));
    }

    #[test]
    fn repeated_events() {
        let cli = Cli::try_parse_from([
            "tatwametro",
            "--lat",
            "40.4",
            "--lon",
            "-3.7",
            "--event",
            "salida=2024-06-21T06:00:00+02:00",
            "--event",
            "civil_twilight_begin=2024-06-21 05:30:00",
        ])
        .unwrap();
        assert_eq!(cli.events.len(), 2);
        assert_eq!(cli.events[0].0, SolarEvent::Sunrise);
        assert_eq!(cli.events[1].1, "2024-06-21 05:30:00");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_event("salida").is_err());
        assert!(parse_event("midnight=2024-06-21T00:00:00Z").is_err());
        assert!(parse_event("salida= ").is_err());
        assert!(parse_date("2024-06-21").is_err());
        assert!(parse_time("25:00:00").is_err());
        assert!(
            Cli::try_parse_from(["tatwametro", "--address", "Madrid", "--lat", "1", "--lon", "2"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["tatwametro", "--lat", "1"]).is_err());
    }
}
