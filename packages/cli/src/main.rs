#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the safety core.
//!
//! ```text
//! safeguard assess --lat 40.7128 --lng -74.006 [--time 2024-01-20T23:30:00] [--alone] ...
//! safeguard nearest --lat 40.7128 --lng -74.006 [--radius 5000] [--limit 5] [--type police]
//! safeguard distance --from-lat .. --from-lng .. --to-lat .. --to-lng ..
//! safeguard places [--type mall]
//! ```
//!
//! Every command accepts `--json` to print machine-readable output.

mod config;

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use safeguard_location_models::Coordinate;
use safeguard_places::{distance_meters, format_distance};
use safeguard_places_models::{PlaceType, RankedSafePlace, SafePlace};
use safeguard_risk_models::{RiskAssessment, RiskFactors, Weather};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "safeguard",
    about = "Personal safety risk assessment and safe place lookup"
)]
struct Cli {
    /// Safe place dataset file (.toml, .json or .geojson). Overrides
    /// `SAFEGUARD_PLACES`.
    #[arg(long, global = true)]
    places: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess the risk at a location
    Assess {
        #[command(flatten)]
        at: CoordinateArgs,
        /// Local time to assess (e.g. 2024-01-20T23:30:00). Defaults to now.
        #[arg(long)]
        time: Option<NaiveDateTime>,
        /// Fixed location risk instead of the random placeholder
        #[arg(long)]
        location_risk: Option<f64>,
        #[command(flatten)]
        factors: FactorArgs,
    },
    /// List the nearest safe places
    Nearest {
        #[command(flatten)]
        at: CoordinateArgs,
        /// Search radius in meters
        #[arg(long, default_value = "5000")]
        radius: f64,
        /// Maximum number of results
        #[arg(long, default_value = "5")]
        limit: usize,
        /// Only this kind of place (police, hospital, mall)
        #[arg(long = "type")]
        place_type: Option<PlaceType>,
    },
    /// Great-circle distance between two coordinates
    Distance {
        #[arg(long, allow_negative_numbers = true)]
        from_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        from_lng: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_lng: f64,
    },
    /// List the safe place dataset
    Places {
        /// Only this kind of place (police, hospital, mall)
        #[arg(long = "type")]
        place_type: Option<PlaceType>,
    },
}

#[derive(Args)]
struct CoordinateArgs {
    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,
}

impl CoordinateArgs {
    fn coordinate(&self) -> Result<Coordinate, safeguard_location_models::CoordinateError> {
        Coordinate::new(self.lat, self.lng)
    }
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct FactorArgs {
    /// The user is alone
    #[arg(long)]
    alone: bool,
    /// The area is dark
    #[arg(long)]
    dark: bool,
    /// Street lighting is poor
    #[arg(long)]
    poor_lighting: bool,
    /// Incidents were recently reported nearby
    #[arg(long)]
    incidents: bool,
    /// Treat as a weekend regardless of the date
    #[arg(long)]
    weekend: bool,
    /// The user is distracted
    #[arg(long)]
    distracted: bool,
    /// Speed in km/h
    #[arg(long)]
    speed: Option<f64>,
    /// Milliseconds spent stationary
    #[arg(long)]
    stationary_ms: Option<u64>,
    /// Visibility in meters
    #[arg(long)]
    visibility: Option<f64>,
    /// Precipitation in mm/h
    #[arg(long)]
    precipitation: Option<f64>,
    /// Temperature in degrees Celsius
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,
}

impl From<FactorArgs> for RiskFactors {
    fn from(args: FactorArgs) -> Self {
        let weather = (args.visibility.is_some()
            || args.precipitation.is_some()
            || args.temperature.is_some())
        .then_some(Weather {
            visibility: args.visibility,
            precipitation: args.precipitation,
            temperature: args.temperature,
        });

        Self {
            is_alone: args.alone,
            is_dark_area: args.dark,
            is_poor_lighting: args.poor_lighting,
            has_recent_incidents: args.incidents,
            is_weekend: args.weekend,
            weather,
            is_stationary: args.stationary_ms.is_some(),
            stationary_time_ms: args.stationary_ms,
            speed: args.speed,
            is_distracted: args.distracted,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    run(Cli::parse(), &mut std::io::stdout().lock())
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Assess {
            at,
            time,
            location_risk,
            factors,
        } => {
            let coordinate = at.coordinate()?;
            let scorer = config::scorer(location_risk)?;
            let factors = RiskFactors::from(factors);
            let assessment = match time {
                Some(time) => scorer.assess(&coordinate, &factors, time),
                None => scorer.assess_now(&coordinate, &factors),
            };

            if cli.json {
                write_json(out, &assessment)?;
            } else {
                write_assessment(out, &assessment)?;
            }
        }
        Commands::Nearest {
            at,
            radius,
            limit,
            place_type,
        } => {
            let origin = at.coordinate()?;
            let finder = config::finder(cli.places)?;
            let results = finder.find_nearest(&origin, radius, limit, place_type);

            if cli.json {
                write_json(out, &results)?;
            } else if results.is_empty() {
                writeln!(out, "No safe places within {}.", format_distance(radius))?;
            } else {
                for (rank, ranked) in results.iter().enumerate() {
                    write_ranked(out, rank + 1, ranked)?;
                }
            }
        }
        Commands::Distance {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
        } => {
            let from = Coordinate::new(from_lat, from_lng)?;
            let to = Coordinate::new(to_lat, to_lng)?;
            let meters = distance_meters(&from, &to);

            if cli.json {
                write_json(out, &serde_json::json!({ "distanceMeters": meters }))?;
            } else {
                writeln!(out, "{} ({meters:.1} m)", format_distance(meters))?;
            }
        }
        Commands::Places { place_type } => {
            let finder = config::finder(cli.places)?;
            let places: Vec<&SafePlace> = finder
                .places()
                .iter()
                .filter(|place| place_type.is_none_or(|t| place.place_type == t))
                .collect();

            if cli.json {
                write_json(out, &places)?;
            } else {
                for place in places {
                    writeln!(
                        out,
                        "{:<24} {:<16} {:<34} {}",
                        place.id,
                        place.place_type.label(),
                        place.name,
                        place.coordinate
                    )?;
                }
            }
        }
    }

    Ok(())
}

fn write_json(
    out: &mut impl Write,
    value: &impl Serialize,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_assessment(out: &mut impl Write, assessment: &RiskAssessment) -> std::io::Result<()> {
    writeln!(
        out,
        "{} ({:.0}/100)",
        assessment.level.label(),
        assessment.score
    )?;

    if let Some(factors) = &assessment.factors {
        writeln!(out)?;
        writeln!(out, "  time           {:>5.1}", factors.time)?;
        writeln!(out, "  location       {:>5.1}", factors.location)?;
        writeln!(out, "  environmental  {:>5.1}", factors.environmental)?;
        writeln!(out, "  behavioral     {:>5.1}", factors.behavioral)?;
    }

    writeln!(out)?;
    for recommendation in &assessment.recommendations {
        writeln!(out, "- {recommendation}")?;
    }
    Ok(())
}

fn write_ranked(
    out: &mut impl Write,
    rank: usize,
    ranked: &RankedSafePlace,
) -> std::io::Result<()> {
    let place = &ranked.place;
    writeln!(
        out,
        "{rank}. {} [{}] {}",
        place.name,
        place.place_type.label(),
        format_distance(ranked.distance_meters)
    )?;
    if !place.address.is_empty() {
        writeln!(out, "   {}", place.address)?;
    }
    if !place.phone.is_empty() || !place.hours.is_empty() {
        writeln!(out, "   {} {}", place.phone, place.hours)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_longitude() {
        let cli = Cli::try_parse_from([
            "safeguard",
            "nearest",
            "--lat",
            "40.7128",
            "--lng",
            "-74.006",
            "--type",
            "police",
        ])
        .unwrap();
        let Commands::Nearest { at, place_type, .. } = cli.command else {
            panic!("expected nearest");
        };
        assert!((at.lng - -74.006).abs() < f64::EPSILON);
        assert_eq!(place_type, Some(PlaceType::Police));
    }

    fn run_args(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn nearest_police_as_json() {
        let output = run_args(&[
            "safeguard",
            "nearest",
            "--lat",
            "40.7128",
            "--lng",
            "-74.006",
            "--type",
            "police",
            "--json",
        ]);
        let results: Vec<RankedSafePlace> = serde_json::from_str(&output).unwrap();

        assert!(!results.is_empty());
        assert_eq!(results[0].place.id, "police-central");
        assert!(results[0].distance_meters.abs() < 1e-6);
        assert!(
            results
                .iter()
                .all(|r| r.place.place_type == PlaceType::Police)
        );
    }

    #[test]
    fn nearest_police_as_text() {
        let output = run_args(&[
            "safeguard",
            "nearest",
            "--lat",
            "40.7128",
            "--lng",
            "-74.006",
            "--type",
            "police",
        ]);
        assert!(output.starts_with("1. Central Police Station [Police Station] 0 m\n"));
    }

    #[test]
    fn places_filters_by_type() {
        let output = run_args(&["safeguard", "places", "--type", "mall", "--json"]);
        let places: Vec<SafePlace> = serde_json::from_str(&output).unwrap();
        assert!(!places.is_empty());
        assert!(places.iter().all(|p| p.place_type == PlaceType::Mall));
    }

    #[test]
    fn rejects_unknown_place_type() {
        assert!(Cli::try_parse_from(["safeguard", "places", "--type", "library"]).is_err());
    }

    #[test]
    fn factor_flags_map_to_risk_factors() {
        let cli = Cli::try_parse_from([
            "safeguard",
            "assess",
            "--lat",
            "0",
            "--lng",
            "0",
            "--time",
            "2024-01-20T23:30:00",
            "--alone",
            "--dark",
            "--stationary-ms",
            "600000",
            "--temperature",
            "-3",
        ])
        .unwrap();
        let Commands::Assess { factors, time, .. } = cli.command else {
            panic!("expected assess");
        };
        assert!(time.is_some());

        let factors = RiskFactors::from(factors);
        assert!(factors.is_alone);
        assert!(factors.is_dark_area);
        assert!(!factors.has_recent_incidents);
        assert!(factors.is_stationary);
        assert_eq!(factors.stationary_time_ms, Some(600_000));
        assert_eq!(
            factors.weather,
            Some(Weather {
                temperature: Some(-3.0),
                ..Weather::default()
            })
        );
    }

    #[test]
    fn no_weather_flags_means_no_weather() {
        let cli = Cli::try_parse_from(["safeguard", "assess", "--lat", "0", "--lng", "0"]).unwrap();
        let Commands::Assess { factors, .. } = cli.command else {
            panic!("expected assess");
        };
        assert!(RiskFactors::from(factors).weather.is_none());
    }
}
