use std::convert::Infallible;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config;
use crate::models::{PatientObservation, VitalsIntake};
use crate::risk::{DefaultRiskEngine, RiskError, RiskEstimator};
use crate::scenarios;

#[derive(Debug, Parser)]
#[command(name = config::APP_NAME, version = config::APP_VERSION)]
#[command(about = "Covid-19 / Pneumonia risk from vitals and symptoms", long_about = None)]
pub struct Cli {
    /// Defaults to `scenarios`
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Scenarios)
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the reference patient scenarios
    Scenarios,
    /// Assess one observation (JSON) and print the explained report
    Assess {
        /// JSON file, or `-` for stdin
        source: Source,
    },
    /// Assess intake-form vitals (JSON, with birthdate)
    Intake {
        /// JSON file, or `-` for stdin
        source: Source,
        /// Date the age is taken at (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the knowledge base tables
    Knowledge,
}

/// Where JSON input comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl FromStr for Source {
    type Err = Infallible;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        Ok(if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        })
    }
}

impl Source {
    fn read_to_string(&self) -> Result<String, RiskError> {
        match self {
            Source::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            Source::File(path) => std::fs::read_to_string(path)
                .map_err(|e| RiskError::Io(format!("{}: {e}", path.display()))),
        }
    }
}

pub fn execute<W: Write>(
    command: &Command,
    engine: &DefaultRiskEngine,
    out: &mut W,
) -> Result<(), RiskError> {
    match command {
        Command::Scenarios => scenarios::run_all(engine, out),
        Command::Assess { source } => {
            let observation: PatientObservation = serde_json::from_str(&source.read_to_string()?)?;
            print_json(out, &engine.assess(&observation)?)
        }
        Command::Intake { source, today } => {
            let intake: VitalsIntake = serde_json::from_str(&source.read_to_string()?)?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let observation = intake.to_observation(today)?;
            print_json(out, &engine.assess(&observation)?)
        }
        Command::Knowledge => print_json(out, &engine.knowledge().tables()),
    }
}

fn print_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<(), RiskError> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
