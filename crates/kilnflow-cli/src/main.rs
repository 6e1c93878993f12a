//! Collision checks for kiln timeslot rules from the command line.
//!
//! Stands in for the booking layer: reads a candidate rule and the stored
//! rule set as JSON, runs the collision engine, and reports the result as
//! text or JSON. Exit status encodes the outcome: 0 = no collisions,
//! 1 = collisions reported, 2 = invalid input.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kilnflow_engine::{detect_collisions, Collision, TimeslotRule};

#[derive(Parser)]
#[command(name = "kilnflow", version, about = "Collision checks for kiln timeslot rules")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a candidate rule against a kiln's existing rules
    Check {
        /// Candidate rule JSON file, or '-' to read from stdin
        #[arg(default_value = "-")]
        candidate: PathBuf,
        /// JSON array of existing rules (the stored snapshot)
        #[arg(long)]
        existing: PathBuf,
        /// Only consider existing rules for this kiln id
        #[arg(long)]
        kiln: Option<String>,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate a rule file against the data-model invariants
    Validate {
        /// Rule JSON file, or '-' to read from stdin
        #[arg(default_value = "-")]
        rule: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            candidate,
            existing,
            kiln,
            json,
        } => check(&candidate, &existing, kiln.as_deref(), json),
        Command::Validate { rule } => validate(&rule),
    }
}

fn check(candidate: &Path, existing: &Path, kiln: Option<&str>, json: bool) -> Result<ExitCode> {
    let candidate: TimeslotRule = serde_json::from_str(&read_input(candidate)?)
        .context("candidate rule is not a valid rule JSON object")?;
    let mut rules: Vec<TimeslotRule> = serde_json::from_str(&read_input(existing)?)
        .context("existing rules are not a valid JSON array of rules")?;
    if let Some(kiln) = kiln {
        rules.retain(|rule| rule.kiln_id == kiln);
    }

    let report = detect_collisions(&candidate, &rules)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(if report.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn validate(path: &Path) -> Result<ExitCode> {
    let rule: TimeslotRule = serde_json::from_str(&read_input(path)?)
        .context("input is not a valid rule JSON object")?;
    match rule.validate() {
        Ok(()) => {
            println!("ok");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("invalid: {err}");
            Ok(ExitCode::from(2))
        }
    }
}

fn print_report(report: &[Collision]) {
    if report.is_empty() {
        println!("no collisions");
        return;
    }
    for collision in report {
        println!(
            "collides with rule on kiln '{}' starting {}:",
            collision.rule.kiln_id, collision.rule.start_date
        );
        for warning in &collision.warnings {
            println!("  [{}] {}", warning.code(), warning);
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}
