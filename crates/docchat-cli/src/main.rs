use anyhow::Result;
use clap::{Parser, Subcommand};
use docchat_infrastructure::ConfigService;
use docchat_infrastructure::paths::DocchatPaths;
use std::path::PathBuf;

mod bootstrap;
mod commands;
mod confirm;
mod logging;
mod picker;
mod render;
mod repl;

use bootstrap::AppContext;

#[derive(Parser)]
#[command(name = "docchat")]
#[command(about = "Ask questions about a PDF through a retrieval backend", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend origin, e.g. http://localhost:8000 (overrides config and DOCCHAT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory for config, session, notebooks and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep session and notebooks in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF and make it the active session
    Upload {
        file: PathBuf,
        /// Reuse an existing backend session
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Ask a question about the active PDF
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Show the active session
    Status,
    /// Forget the active session
    Clear {
        /// Also delete the session on the server
        #[arg(long)]
        remote: bool,
    },
    /// Check that the backend is up
    Health,
    /// Manage notebooks
    Notebook {
        #[command(subcommand)]
        action: NotebookAction,
    },
    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Interactive notebook shell (default)
    Repl,
}

#[derive(Subcommand)]
enum NotebookAction {
    /// List notebooks, newest first
    List,
    /// Upload a PDF into a new notebook
    Create {
        file: PathBuf,
        /// Defaults to the filename without .pdf
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a notebook by list number or id
    Delete {
        notebook: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a notebook in the interactive shell
    Open { notebook: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Store a new backend origin
    SetBaseUrl { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DocchatPaths::new(cli.data_dir.clone());
    let _log_guard = logging::init(&paths.logs_dir()?, cli.verbose)?;

    let config_service = ConfigService::from_paths(&paths)?;
    let config = config_service.resolve(cli.base_url.as_deref());

    let command = cli.command.unwrap_or(Commands::Repl);
    if let Commands::Config { action } = &command {
        return match action {
            ConfigAction::Show => commands::config::show(&config_service, &config),
            ConfigAction::SetBaseUrl { url } => commands::config::set_base_url(&config_service, url),
        };
    }

    // An explicit --data-dir relocates everything; otherwise config may move the slots.
    let data_paths = match (&cli.data_dir, &config.data_dir) {
        (None, Some(dir)) => DocchatPaths::new(Some(dir.clone())),
        _ => paths,
    };
    let ctx = AppContext::bootstrap(config, &data_paths, cli.ephemeral).await?;

    match command {
        Commands::Upload { file, session_id } => {
            commands::upload::run(&ctx, &file, session_id.as_deref()).await?
        }
        Commands::Ask { question } => commands::ask::run(&ctx, &question.join(" ")).await?,
        Commands::Status => commands::session::status(&ctx).await?,
        Commands::Clear { remote } => commands::session::clear(&ctx, remote).await?,
        Commands::Health => commands::session::health(&ctx).await?,
        Commands::Notebook { action } => match action {
            NotebookAction::List => commands::notebook::list(&ctx).await?,
            NotebookAction::Create { file, name } => {
                commands::notebook::create(&ctx, &file, name.as_deref()).await?;
            }
            NotebookAction::Delete { notebook, yes } => {
                commands::notebook::delete(&ctx, &notebook, |found| {
                    if yes {
                        Ok(true)
                    } else {
                        confirm::confirm_once(&confirm::delete_question(&found.name))
                    }
                })
                .await?
            }
            NotebookAction::Open { notebook } => repl::run(&ctx, Some(&notebook)).await?,
        },
        Commands::Repl => repl::run(&ctx, None).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}
