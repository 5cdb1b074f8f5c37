use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use importer::{Result, parse_roster};
use storage::Database;
use storage::dto::CreateEventRequest;
use storage::repository::EventRepository;
use storage::services::{aggregator, import, lifecycle};

#[derive(Parser)]
#[command(name = "points-import")]
#[command(about = "Membership points roster importer and ledger maintenance", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a roster file, crediting each row against an event.
    Roster {
        /// JSON roster file (array of {Name, Computing ID} objects).
        file: PathBuf,

        #[command(flatten)]
        target: EventTarget,

        /// Parse and report without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Rebuild member counters from the attendance ledger.
    Recompute {
        /// Computing id of a single member; omit to rebuild everyone.
        #[arg(long)]
        member: Option<String>,
    },
    /// Report members whose counters have drifted from the ledger.
    Audit,
}

#[derive(clap::Args)]
struct EventTarget {
    /// Credit an existing event by id.
    #[arg(long, conflicts_with_all = ["event_name", "date"])]
    event_id: Option<Uuid>,

    /// Create a new event named NAME (requires --date; --points optional).
    #[arg(long, requires = "date")]
    event_name: Option<String>,

    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, default_value_t = 2)]
    points: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={log_level},importer={log_level},storage={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;

    match cli.command {
        Commands::Roster {
            file,
            target,
            dry_run,
        } => handle_roster(&db, &file, target, dry_run).await?,
        Commands::Recompute { member } => handle_recompute(&db, member.as_deref()).await?,
        Commands::Audit => handle_audit(&db).await?,
    }

    Ok(())
}

async fn handle_roster(
    db: &Database,
    file: &PathBuf,
    target: EventTarget,
    dry_run: bool,
) -> Result<()> {
    let json = std::fs::read_to_string(file)?;
    let rows = parse_roster(&json)?;
    tracing::info!(rows = rows.len(), file = %file.display(), "roster parsed");

    if dry_run {
        println!("{} rows parsed; nothing written (--dry-run)", rows.len());
        return Ok(());
    }

    let event = match (target.event_id, target.event_name) {
        (Some(id), _) => EventRepository::new(db.pool()).find_by_id(id).await?,
        (None, None) => {
            return Err(importer::ImporterError::Validation(
                "either --event-id or --event-name is required".to_string(),
            ));
        }
        (None, Some(name)) => {
            let date = target.date.expect("--date is required (enforced by clap)");
            lifecycle::create_event(
                db.pool(),
                &CreateEventRequest {
                    name,
                    date,
                    points: target.points,
                    roster: Vec::new(),
                },
            )
            .await?
        }
    };

    let summary = import::import_roster(db.pool(), &event, &rows).await?;
    println!(
        "event '{}': {} members created, {} records credited, {} rows skipped",
        event.name, summary.members_created, summary.records_created, summary.rows_skipped
    );

    Ok(())
}

async fn handle_recompute(db: &Database, member: Option<&str>) -> Result<()> {
    match member {
        Some(computing_id) => {
            let member = storage::repository::MemberRepository::new(db.pool())
                .find_by_computing_id(computing_id)
                .await?;
            let repaired = aggregator::recompute_from_ledger(db.pool(), member.id).await?;
            println!(
                "{}: total={} spring2025={} fall2025={}",
                repaired.computing_id,
                repaired.total_points,
                repaired.spring_2025_total,
                repaired.fall_2025_total
            );
        }
        None => {
            let count = aggregator::recompute_all(db.pool()).await?;
            println!("recomputed {count} members");
        }
    }

    Ok(())
}

async fn handle_audit(db: &Database) -> Result<()> {
    let drifted = aggregator::audit(db.pool()).await?;
    if drifted.is_empty() {
        println!("all counters match the ledger");
        return Ok(());
    }

    for drift in &drifted {
        println!(
            "{}: stored total/spring/fall = {:?}, ledger says {:?}",
            drift.computing_id, drift.stored, drift.derived
        );
    }
    println!("{} members drifted; run `recompute` to repair", drifted.len());

    Ok(())
}
