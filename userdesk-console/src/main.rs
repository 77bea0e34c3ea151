use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use userdesk_console::cli::{self, Cli};

fn init_logger(level: LevelFilter) {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::Builder::from_env(Env::default())
            .target(Target::Stderr)
            .init();
        return;
    }
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("userdesk_console", level)
        .filter_module("userdesk", level)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::run(cli)) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
