//! todo - terminal front end for the to-do widget
//!
//! Usage:
//!   todo [--storage PATH] [--seed-url URL] [--seed-limit N] <COMMAND>

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use todo_widget::seed::{DEFAULT_SEED_LIMIT, DEFAULT_SEED_URL};
use todo_widget::{
    ClockIdGenerator, FileStorage, Filter, PersistenceBridge, PlaceholderSeedSource, TaskId,
    TodoApp, render_text,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "To-do list persisted to local storage")]
struct Cli {
    /// Storage file holding the task list
    #[arg(long, env = "TODO_STORAGE_PATH", default_value = "todo-storage.json")]
    storage: PathBuf,

    /// Base URL of the placeholder feed used to seed an empty list
    #[arg(long, env = "TODO_SEED_URL", default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// Maximum number of seeded tasks
    #[arg(long, default_value_t = DEFAULT_SEED_LIMIT)]
    seed_limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the tasks
    List {
        #[arg(long, default_value = "all")]
        filter: Filter,
    },
    /// Add a task
    Add { title: String },
    /// Flip a task between pending and completed
    Toggle { id: TaskId },
    /// Remove a task
    Delete { id: TaskId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let bridge = PersistenceBridge::new(Box::new(FileStorage::new(&cli.storage)));
    let seed = PlaceholderSeedSource::new(&cli.seed_url)?;
    let mut app = TodoApp::start(
        bridge,
        &seed,
        cli.seed_limit,
        Box::new(ClockIdGenerator::new()),
    )
    .await?;

    match cli.command {
        Commands::List { filter } => app.set_filter(filter),
        Commands::Add { title } => {
            if app.add(title)?.is_none() {
                tracing::warn!("Ignoring blank task title");
            }
        }
        Commands::Toggle { id } => {
            if !app.toggle(id)? {
                tracing::warn!(%id, "No task with that id");
            }
        }
        Commands::Delete { id } => {
            if !app.delete(id)? {
                tracing::warn!(%id, "No task with that id");
            }
        }
    }

    print!("{}", render_text(&app.view()));
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo=info,todo_widget=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
