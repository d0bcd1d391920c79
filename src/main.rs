use clap::{Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use vote_tally::db::{Database, RedisStore};
use vote_tally::{Config, Result, TallyService};

#[derive(Parser)]
#[command(name = "vote-tally", about = "Election vote tallies by party and department")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ranked vote totals, nationally or for one department
    Votes {
        /// Department name, or "all"
        #[arg(long, short)]
        department: Option<String>,
    },
    /// Plurality winner of every department with votes
    Winners,
    /// Earliest audit log entries
    Audit,
    /// Ranked live counts of a single precinct
    Precinct {
        /// Precinct (mesa) id
        id: String,
    },
}

// Same envelope the HTTP API answers with
#[derive(Serialize)]
struct Envelope<'a, T> {
    data: &'a T,
}

fn render<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Envelope { data })?)
}

async fn run(cli: Cli) -> Result<String> {
    let config = Config::from_env()?;

    let database = Database::connect(&config.database_url, config.database_max_connections).await?;
    let cache = RedisStore::connect(&config.redis_url).await?;
    info!("Connected to {} and {}", config.database_url, config.redis_url);

    let service = TallyService::new(Arc::new(database), Arc::new(cache));

    match cli.command {
        Command::Votes { department } => render(&service.vote_totals(department.as_deref()).await?),
        Command::Winners => render(&service.department_winners().await?),
        Command::Audit => render(&service.audit_log().await?),
        Command::Precinct { id } => render(&service.precinct_totals(&id).await?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Query failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
