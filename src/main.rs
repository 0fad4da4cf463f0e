// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use sdvm_planner::io::{ledger, reporting, settings, synthetic};
use sdvm_planner::model::{FleetSegment, TargetBook, Weekday};
use sdvm_planner::simulation::config::DataFiles;
use sdvm_planner::{GoalSeekConfig, PlannerResult, PlanningSession};

/// Weekday delivery planner: day assignment, feasibility and SDVM goal-seek
#[derive(Parser)]
#[command(name = "sdvm-planner")]
#[command(
    about = "Plans store delivery days against fleet limits and a target visit-frequency mix"
)]
struct Cli {
    /// Directory holding stores.csv, constraints.json and targets.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print mix, drop points and fleet load per day
    Summary,
    /// Re-assign delivery days from frequencies and save
    Distribute,
    /// Check the current plan against the constraints
    Check,
    /// Adjust frequencies toward a planning year's target mix
    GoalSeek {
        #[arg(long, default_value = "2026")]
        year: String,
        #[arg(long, default_value_t = 1500)]
        max_iterations: usize,
        /// Save the result even when it breaks a constraint
        #[arg(long)]
        save_infeasible: bool,
    },
    /// Set one store's weekly frequency (clipped to 2..=5) and save
    SetFreq {
        store_code: String,
        #[arg(allow_negative_numbers = true)]
        freq: i64,
    },
    /// Set one store's delivery days by hand and save
    SetDays {
        store_code: String,
        #[arg(num_args = 0..)]
        days: Vec<Weekday>,
    },
    /// Show or update the constraint set
    Constraints(ConstraintArgs),
    /// Export the scenario sheet and, optionally, daily metrics
    Export {
        path: PathBuf,
        #[arg(long)]
        daily: Option<PathBuf>,
    },
    /// Write a random demo stores.csv
    Generate {
        #[arg(long, default_value_t = 60)]
        stores: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Args)]
struct ConstraintArgs {
    #[arg(long)]
    drop_points_limit: Option<u32>,
    #[arg(long)]
    local_trucks: Option<u32>,
    #[arg(long)]
    local_rte_capacity: Option<f64>,
    #[arg(long)]
    mthatha_trucks: Option<u32>,
    #[arg(long)]
    mthatha_rte_capacity: Option<f64>,
    #[arg(long)]
    country_trucks: Option<u32>,
    #[arg(long)]
    country_rte_capacity: Option<f64>,
}

impl ConstraintArgs {
    fn is_empty(&self) -> bool {
        self.drop_points_limit.is_none()
            && self.local_trucks.is_none()
            && self.local_rte_capacity.is_none()
            && self.mthatha_trucks.is_none()
            && self.mthatha_rte_capacity.is_none()
            && self.country_trucks.is_none()
            && self.country_rte_capacity.is_none()
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_session(files: &DataFiles) -> PlannerResult<PlanningSession> {
    let stores = ledger::read_ledger(&files.stores)?;
    let constraints = settings::read_constraints(&files.constraints)?;
    let targets = if files.targets.exists() {
        settings::read_targets(&files.targets)?
    } else {
        TargetBook::new()
    };
    Ok(PlanningSession::new(stores, constraints, targets))
}

fn save_session(files: &DataFiles, session: &PlanningSession) -> PlannerResult<()> {
    ledger::write_ledger(&files.stores, session.ledger())?;
    settings::write_constraints(&files.constraints, session.constraints())
}

fn run(cli: Cli) -> PlannerResult<ExitCode> {
    let files = DataFiles::in_dir(&cli.data_dir);

    match cli.command {
        Command::Generate { stores, seed } => {
            let params = synthetic::SyntheticParams {
                stores,
                ..synthetic::SyntheticParams::default()
            };
            let generated = synthetic::generate_ledger(&params, &mut StdRng::seed_from_u64(seed))?;
            std::fs::create_dir_all(&cli.data_dir)?;
            ledger::write_ledger(&files.stores, &generated)?;
            println!("Wrote {} stores to {}", generated.len(), files.stores.display());
        }
        Command::Summary => {
            let session = load_session(&files)?;
            print!("{}", reporting::render_summary(&session.metrics()));
            print!("{}", reporting::render_feasibility(&session.check()));
        }
        Command::Distribute => {
            let mut session = load_session(&files)?;
            session.auto_distribute();
            save_session(&files, &session)?;
            print!("{}", reporting::render_summary(&session.metrics()));
        }
        Command::Check => {
            let session = load_session(&files)?;
            let report = session.check();
            print!("{}", reporting::render_feasibility(&report));
            if !report.is_feasible() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GoalSeek {
            year,
            max_iterations,
            save_infeasible,
        } => {
            let mut session = load_session(&files)?;
            let config = GoalSeekConfig {
                max_iterations,
                ..GoalSeekConfig::default()
            };
            let outcome = session.goal_seek(&year, &config)?;
            println!(
                "Penalty={:.6} after {} passes ({} moves accepted)",
                outcome.penalty, outcome.passes, outcome.accepted_moves
            );
            print!("{}", reporting::render_summary(&session.metrics()));
            print!("{}", reporting::render_feasibility(&session.check()));

            if outcome.feasible || save_infeasible {
                save_session(&files, &session)?;
            } else {
                warn!("Result is not feasible; not saved (pass --save-infeasible to keep it)");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::SetFreq { store_code, freq } => {
            let mut session = load_session(&files)?;
            let applied = session.set_frequency(&store_code, freq)?;
            save_session(&files, &session)?;
            println!("{store_code}: ScenarioFreq = {applied}");
        }
        Command::SetDays { store_code, days } => {
            let mut session = load_session(&files)?;
            session.set_days(&store_code, &days)?;
            save_session(&files, &session)?;
            let labels: Vec<&str> = days.iter().map(|d| d.label()).collect();
            println!("{store_code}: days = [{}]", labels.join(", "));
        }
        Command::Constraints(args) => {
            let mut session = load_session(&files)?;
            if !args.is_empty() {
                let mut updated = session.constraints().clone();
                if let Some(v) = args.drop_points_limit {
                    updated.drop_points_limit = v;
                }
                let segment_updates = [
                    (FleetSegment::Local, args.local_trucks, args.local_rte_capacity),
                    (FleetSegment::Mthatha, args.mthatha_trucks, args.mthatha_rte_capacity),
                    (FleetSegment::OtherCountry, args.country_trucks, args.country_rte_capacity),
                ];
                for (segment, trucks, rte_per_truck) in segment_updates {
                    let capacity = updated.capacity_mut(segment);
                    if let Some(v) = trucks {
                        capacity.trucks = v;
                    }
                    if let Some(v) = rte_per_truck {
                        capacity.rte_per_truck = v;
                    }
                }
                session.set_constraints(updated)?;
                settings::write_constraints(&files.constraints, session.constraints())?;
                println!("Saved.");
            }
            let c = session.constraints();
            println!("Drop-points limit: {}", c.drop_points_limit);
            for segment in FleetSegment::ALL {
                let cap = c.capacity(segment);
                println!(
                    "{segment}: {} trucks x {:.1} RTE = {:.1} RTE/day",
                    cap.trucks,
                    cap.rte_per_truck,
                    cap.daily_capacity()
                );
            }
        }
        Command::Export { path, daily } => {
            let session = load_session(&files)?;
            ledger::write_ledger(&path, session.ledger())?;
            println!("Exported scenario to {}", path.display());
            if let Some(daily) = daily {
                reporting::write_daily_metrics(&daily, &session.metrics())?;
                println!("Exported daily metrics to {}", daily.display());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
