use clap::Parser;

mod cli;
pub mod exit_codes;
mod logging;

use cli::args::Cli;
use cli::commands::dispatch;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_file = logging::log_file_for(&cli, std::env::var_os(logging::LOG_FILE_ENV));
    if let Err(e) = logging::init(log_file.as_deref()) {
        // No subscriber is installed at this point.
        eprintln!("fatal: {e:?}");
        std::process::exit(exit_codes::EXIT_INTERNAL_ERROR);
    }

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = ?e, "fatal");
            exit_codes::EXIT_INTERNAL_ERROR
        }
    };
    std::process::exit(code);
}
