mod app;

use std::io;
use std::process::ExitCode;

use tracing::{error, info};

use app::bootstrap::init_tracing;
use app::cli::parse_command;
use app::commands::run_command;

fn main() -> ExitCode {
    init_tracing();
    info!("=== Traverse Startup ===");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let result = parse_command(&args).and_then(|command| {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();
        run_command(command, &mut stdout)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command_failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
