use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use work_hours::api::{AppState, create_router};
use work_hours::config::{ConfigLoader, DEFAULT_CONFIG_FILE};
use work_hours::daily_log::DEFAULT_LOG_FILE;
use work_hours::error::{EngineError, EngineResult};
use work_hours::report::generate_csv_reports;

#[derive(Parser, Debug)]
#[command(name = "work-hours")]
#[command(version, about = "Worked hours and overtime from daily activity logs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate every day of a log and write per-month CSV reports
    Report {
        /// Work schedule file (.json, .yaml or .yml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Daily log with one `date, first, last` line per day
        #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
        input: PathBuf,

        /// Directory receiving `<year>/<month>.csv`
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,
    },

    /// Serve the calculation over HTTP
    Serve {
        /// Work schedule file (.json, .yaml or .yml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: String,
    },

    /// Write the default work schedule
    InitConfig {
        /// Destination file (.json, .yaml or .yml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(EngineError::NoRecords { .. }) => {
            println!("no records to process");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> EngineResult<()> {
    match cli.command {
        Commands::Report {
            config,
            input,
            output,
        } => {
            let loader = ConfigLoader::load(&config)?;
            let summary = generate_csv_reports(loader.schedule(), &input, &output)?;
            println!(
                "{} days written to {} month reports under {}",
                summary.days,
                summary.sections,
                output.display()
            );
            Ok(())
        }
        Commands::Serve { config, bind } => {
            let loader = ConfigLoader::load(&config)?;
            serve(AppState::new(loader), &bind)
        }
        Commands::InitConfig { config } => {
            ConfigLoader::write_default(&config)?;
            println!("Default schedule written to {}", config.display());
            Ok(())
        }
    }
}

fn serve(state: AppState, bind: &str) -> EngineResult<()> {
    let server_error = |message: String| EngineError::ServerError {
        address: bind.to_string(),
        message,
    };

    let runtime = tokio::runtime::Runtime::new().map_err(|e| server_error(e.to_string()))?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(bind)
            .await
            .map_err(|e| server_error(e.to_string()))?;
        info!(address = %bind, "Listening");
        axum::serve(listener, create_router(state))
            .await
            .map_err(|e| server_error(e.to_string()))
    })
}
