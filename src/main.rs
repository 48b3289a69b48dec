use std::fs::File;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use learnctl::api::{HttpTransport, Transport};
use learnctl::cli::prompt::StdinConfirmer;
use learnctl::cli::{self, Command, CommandContext};
use learnctl::core::config::{self, CliOverrides, LearnConfig};
use learnctl::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "learnctl", about = "Client for the adaptive learning platform")]
struct Args {
    /// Backend base URL (overrides LEARNCTL_BASE_URL and the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Run one action and exit; without a command the dashboard opens
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to learnctl.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("learnctl.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}; using defaults");
            log::warn!("{e}");
            LearnConfig::default()
        }
    };
    let overrides = CliOverrides {
        base_url: args.base_url.clone(),
        export_dir: match &args.command {
            Some(Command::Export { dir }) => dir.clone(),
            _ => None,
        },
    };
    let resolved = config::resolve(&file_config, &overrides);
    log::info!("learnctl starting up against {}", resolved.base_url);

    let transport: Arc<dyn Transport> = match HttpTransport::from_config(&resolved) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            eprintln!("could not build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(command) = args.command else {
        return match tui::run(&resolved, transport) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("terminal error: {e}");
                ExitCode::FAILURE
            }
        };
    };

    let mut confirmer = StdinConfirmer;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let interactive = stderr.is_terminal();
    let mut ctx = CommandContext {
        config: &resolved,
        transport,
        confirmer: &mut confirmer,
        out: &mut stdout,
        err: &mut stderr,
        interactive,
    };

    match cli::execute(command, &mut ctx).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::warn!("output error: {e}");
            ExitCode::FAILURE
        }
    }
}
