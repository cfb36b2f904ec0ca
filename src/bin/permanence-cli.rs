#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use permanence::{
    io,
    scheduler::{SchedError, ScheduleOptions, Scheduler},
    storage::{JsonStorage, Storage},
    weekday_name,
};
use std::time::Duration;
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Planifie les gardes d'un horizon en semaines (deux personnes par jour).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (filtrables via RUST_LOG)
    #[arg(long)]
    log: bool,

    /// Date de départ, format YYYY-MM-DD
    #[arg(long)]
    start_date: String,

    /// Nombre de semaines à planifier
    #[arg(long)]
    weeks: u32,

    /// Fichier JSON d'effectif (personnes + dates imposées)
    #[arg(long, default_value = "roster.json")]
    roster: String,

    /// Fichier JSON de sortie des assignations
    #[arg(long, default_value = "assignments.json")]
    out: String,

    /// Tolérance autour du nombre de gardes attendu par personne
    #[arg(long, default_value_t = 2)]
    tolerance: u32,

    /// Tolérance autour du nombre de gardes de week-end attendu
    #[arg(long, default_value_t = 1)]
    weekend_tolerance: u32,

    /// Poids d'une paire de week-ends consécutifs travaillés
    #[arg(long, default_value_t = 10.0)]
    consecutive_weight: f64,

    /// Budget du solveur en secondes (informatif : microlp n'a pas de
    /// coupure dure, la valeur est rapportée dans les diagnostics)
    #[arg(long, default_value_t = 180)]
    time_budget_secs: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let start_date = NaiveDate::parse_from_str(&cli.start_date, "%Y-%m-%d")
        .with_context(|| format!("invalid start date: {}", cli.start_date))?;

    let (people, holidays) = io::load_roster(&cli.roster)?;
    let options = ScheduleOptions {
        tolerance: cli.tolerance,
        weekend_tolerance: cli.weekend_tolerance,
        consecutive_weekend_weight: cli.consecutive_weight,
        time_budget: Duration::from_secs(cli.time_budget_secs),
        ..ScheduleOptions::default()
    };

    let scheduler = Scheduler::new(people, start_date, cli.weeks)
        .with_holidays(holidays)
        .with_options(options);

    let code = match scheduler.assign_days() {
        Ok(result) => {
            let storage = JsonStorage::open(&cli.out)?;
            storage.save(&result.people)?;

            // impression compacte
            for person in &result.people {
                let dates: Vec<String> = person
                    .assigned_shifts
                    .iter()
                    .map(|d| d.to_string())
                    .collect();
                println!(
                    "{} ({}) | {} garde(s) | ven {} sam {} dim {} | {}",
                    person.name,
                    weekday_name(person.working_day),
                    person.assigned_shifts.len(),
                    person.fridays_count,
                    person.saturdays_count,
                    person.sundays_count,
                    dates.join(", ")
                );
            }
            println!("{}", result.diagnostics);
            0
        }
        Err(SchedError::NoFeasibleSolution(diagnostics)) => {
            eprintln!("no feasible assignment: {diagnostics}");
            // Code 2 = WARNING/INCOMPLETE
            2
        }
        Err(err) => return Err(err.into()),
    };

    std::process::exit(code);
}
