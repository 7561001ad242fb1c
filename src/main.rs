use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repolens")]
#[command(
    version,
    about = "Analyze public repositories and generate architectural insights"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP analysis service
    Serve {
        #[arg(long, help = "Socket address to bind (overrides config)")]
        bind: Option<String>,
    },

    /// Analyze one repository and print the result
    Analyze {
        #[arg(help = "Repository URL (github.com) or local path")]
        locator: String,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run_cli().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { bind } => {
            repolens::cli::commands::serve::run(bind).await?;
        }
        Commands::Analyze { locator, format } => {
            repolens::cli::commands::analyze::run(&locator, &format).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                repolens::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                repolens::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    repolens::cli::commands::config::init_global(force)?;
                } else {
                    repolens::cli::commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
