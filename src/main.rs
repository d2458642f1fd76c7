use adinventory::{
    analyze::{
        analyze_disabled_accounts, analyze_group_complexity, analyze_ou_structure,
        analyze_stale_accounts, generate_migration_summary,
    },
    compare::{compare, ComparisonKind},
    config::Settings,
    load::load,
    logging::init_logging,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "adinventory",
    version,
    about = "Compare directory inventory exports and assess migration readiness"
)]
struct Args {
    /// YAML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Reference time for staleness (RFC 3339), defaults to now
    #[arg(long, global = true, value_parser = parse_as_of)]
    as_of: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare source and target exports: users | groups | ous
    Compare {
        kind: String,
        source: PathBuf,
        target: PathBuf,
    },
    /// Full pre-migration summary over a users and a groups export
    Summarize { users: PathBuf, groups: PathBuf },
    /// Accounts with no logon inside the threshold
    Stale {
        users: PathBuf,
        #[arg(long)]
        days: Option<i64>,
    },
    /// Accounts explicitly disabled
    Disabled { users: PathBuf },
    /// Group scope, category and membership breakdown
    Groups { groups: PathBuf },
    /// User counts per OU
    Ous { users: PathBuf },
}

fn parse_as_of(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp `{}`: {}", s, e))
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Unknown kinds are a usage error, rejected before any file is read.
    if let Command::Compare { kind, .. } = &args.command {
        if let Err(e) = kind.parse::<ComparisonKind>() {
            eprintln!("{}", e);
            eprintln!("  type: users | groups | ous");
            return ExitCode::from(2);
        }
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    init_logging(&settings.log_filter);
    let compact = args.compact || settings.compact;
    let now = args.as_of.unwrap_or_else(Utc::now);
    info!(%now, "startup");

    match args.command {
        Command::Compare {
            kind,
            source,
            target,
        } => {
            let result = compare(&kind, &source, &target)
                .with_context(|| format!("comparing {} exports", kind))?;
            emit(&result, compact)
        }
        Command::Summarize { users, groups } => {
            let summary = generate_migration_summary(&users, &groups, now)
                .context("building migration summary")?;
            emit(&summary, compact)
        }
        Command::Stale { users, days } => {
            let days = days.unwrap_or(settings.stale_threshold_days);
            let table = load(&users)?;
            emit(&analyze_stale_accounts(&table, days, now), compact)
        }
        Command::Disabled { users } => {
            let table = load(&users)?;
            emit(&analyze_disabled_accounts(&table), compact)
        }
        Command::Groups { groups } => {
            let table = load(&groups)?;
            emit(&analyze_group_complexity(&table), compact)
        }
        Command::Ous { users } => {
            let table = load(&users)?;
            emit(&analyze_ou_structure(&table), compact)
        }
    }
}

/// Write the report as JSON to stdout.
fn emit<T: Serialize>(report: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    let mut out = io::stdout().lock();
    writeln!(out, "{}", json).context("writing report")?;
    Ok(())
}
