mod cli;
mod cmd;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, CycleAction};
use cyclepredict::error::CoreError;
use cyclepredict::models::config::Config;
use cyclepredict::output;
use serde_json::{Value, json};
use std::process;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout is reserved for the JSON envelope.
fn init_tracing() {
    let fallback = Config::load()
        .map(|c| c.logging.filter)
        .unwrap_or_else(|_| "warn".to_string());
    let filter =
        EnvFilter::try_from_env("CYCLEPREDICT_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let command = cli.command.name();
    let result = match cli.command {
        Commands::Init { skip } => cmd::init::run(skip, cli.date),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(cli.human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Analyze {
            file,
            text,
            last_period,
            no_save,
        } => cmd::analyze::run(
            file.as_deref(),
            text.as_deref(),
            last_period,
            cli.date,
            !no_save,
            cli.human,
        ),
        Commands::Bills { last } => cmd::analyze::run_list(last, cli.human),
        Commands::Cycle { action } => match action {
            CycleAction::Log {
                start,
                flow,
                symptoms,
            } => cmd::cycle::run_log(start, &flow, symptoms.as_deref(), cli.human),
            CycleAction::List { last } => cmd::cycle::run_list(last, cli.human),
            CycleAction::Remove { id } => cmd::cycle::run_remove(&id, cli.human),
        },
        Commands::Predict { no_save } => cmd::predict::run(cli.date, !no_save, cli.human),
        Commands::Predictions { last } => cmd::predict::run_list(last, cli.human),
        Commands::Status => cmd::status::run(cli.date, cli.human),
        Commands::Insights => cmd::insights::run(cli.human),
        Commands::Recommend => cmd::recommend::run(cli.date, cli.human),
        Commands::Completions { shell } => cmd::completions::run(shell),
    };

    if let Err(e) = result {
        let (code, data) = match e.downcast_ref::<CoreError>() {
            Some(err) => {
                let data = if matches!(err, CoreError::GenerationFailed(_)) {
                    json!({ "recommendations": [] })
                } else {
                    Value::Null
                };
                (err.code(), data)
            }
            None => ("general_error", Value::Null),
        };
        let err = output::failure(command, code, &e.to_string(), data);
        eprintln!("{}", err);
        process::exit(1);
    }
}
