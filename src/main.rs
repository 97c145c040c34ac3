use clap::Parser;
use console::Term;
use precache::app::{self, Options};
use precache::config::settings::{LOCAL_CONFIG_FILE_NAME, SERVER_CONFIG_FILE_NAME};
use precache::report::{ConsoleReporter, Reporter};
use precache::StyleOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Pre-cache the files of a server playlist into a local directory.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The server source configuration.
    #[arg(default_value = SERVER_CONFIG_FILE_NAME)]
    server_config: PathBuf,

    /// The local configuration, created with defaults when missing.
    #[arg(long, default_value = LOCAL_CONFIG_FILE_NAME)]
    local_config: PathBuf,

    /// Do not wait for enter before exiting.
    #[arg(long)]
    no_wait: bool,

    /// Hide the progress bars.
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn wait_for_enter() {
    let term = Term::stdout();
    if !term.is_term() {
        return;
    }
    if term.write_line("Press enter to exit.").is_ok() {
        let _ = term.read_line();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = Options {
        server_config: args.server_config,
        local_config: args.local_config,
        style_options: if args.quiet {
            StyleOptions::hidden()
        } else {
            StyleOptions::default()
        },
        ..Options::default()
    };
    let reporter = Arc::new(ConsoleReporter::new());

    let code = match app::run(&options, reporter.clone()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.error("Failed to precache items");
            reporter.error(&e.chain());
            ExitCode::FAILURE
        }
    };

    if !args.no_wait {
        wait_for_enter();
    }
    code
}
