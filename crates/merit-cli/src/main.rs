use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use merit_cli::{
    build_cli_command, exit_code, load_merit_config, Cli, Commands, DispatchOverrides,
    MeritConfig,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;

/// Log to stderr so stdout stays machine-readable; RUST_LOG directives still apply.
fn init_tracing(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, config: &MeritConfig) -> Result<()> {
    match &cli.command {
        Some(Commands::Dispatch {
            payload,
            format,
            out,
            tolerance,
            max_depth,
            time_budget_ms,
        }) => {
            let dispatch = config.dispatch_config(DispatchOverrides {
                tolerance: *tolerance,
                max_depth: *max_depth,
                time_budget_ms: *time_budget_ms,
            })?;
            commands::dispatch::handle(payload, &dispatch, *format, out.as_deref())
        }
        Some(Commands::Validate { payload }) => commands::validate::handle(payload),
        Some(Commands::Batch {
            payloads,
            out,
            threads,
        }) => {
            let dispatch = config.dispatch_config(DispatchOverrides::default())?;
            let threads = threads.unwrap_or(config.batch.threads);
            commands::batch::handle(payloads, out, dispatch, threads)
        }
        Some(Commands::Completions { shell, out }) => {
            commands::completions::handle(*shell, out.as_deref())
        }
        None => {
            build_cli_command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_merit_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing(cli.log_level.unwrap_or(tracing::Level::INFO));
            error!("{err:#}");
            return ExitCode::from(1);
        }
    };
    let level = cli
        .log_level
        .or_else(|| config.log_level())
        .unwrap_or(tracing::Level::INFO);
    init_tracing(level);
    debug!(?config, "loaded configuration");

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
