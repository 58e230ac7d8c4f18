mod app;

use clap::Parser;
use std::process::ExitCode;

use app::cli::Cli;
use app::error::{exit_code, ExtractError};

fn main() -> ExitCode {
    let args = Cli::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();

    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            let code = err.downcast_ref::<ExtractError>().map_or(1, exit_code);
            ExitCode::from(code as u8)
        }
    }
}
