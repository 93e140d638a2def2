use crate::{
    commands::{Backend, Commands},
    config::Config,
    error::CliError,
};
use clap::Parser;
use connectors::{
    memory::{MemoryStore, MemoryTranslator},
    sql::{SqlTranslator, dialect_for},
};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use translator::{FilterTranslator, normalize};

mod commands;
mod config;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "pushdown",
    version = "0.1.0",
    about = "Translate boolean filters into backend queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.report());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Translate {
            filter,
            backend,
            dialect,
            table,
            config,
            records,
            id,
            json,
        } => {
            let config = match config {
                Some(path) => Config::from_file(&path)?,
                None => Config::default(),
            };
            let filter = filter_syntax::parse_optional(filter.as_deref().unwrap_or_default())?;
            debug!(?backend, capabilities = ?config.capabilities, "translating");

            match backend {
                Backend::Sql => {
                    let translator = SqlTranslator::new(dialect_for(&dialect)?, config.capabilities)
                        .with_config(config.translator);
                    let statements = translator.select_statements(&table, filter.as_ref())?;
                    info!(
                        dialect = translator.dialect().name(),
                        statements = statements.len(),
                        "translated filter"
                    );
                    output::print_statements(&statements, json)?;
                }
                Backend::Memory => {
                    let translator = MemoryTranslator::new(config.capabilities);
                    match records {
                        Some(path) => {
                            let store = MemoryStore::from_json(id, &std::fs::read_to_string(path)?)?;
                            let found = store.search(filter.as_ref(), &translator, config.translator)?;
                            info!(records = store.len(), matched = found.len(), "searched records");
                            output::print_records(&found, json)?;
                        }
                        None => {
                            let queries = FilterTranslator::with_config(&translator, config.translator)
                                .translate(filter.as_ref())?;
                            output::print_predicates(&queries, json)?;
                        }
                    }
                }
            }
        }
        Commands::Normalize { filter, json } => {
            let parsed = filter_syntax::parse(&filter)?;
            output::print_filter(&normalize(parsed), json)?;
        }
        Commands::Check { filter } => {
            let parsed = filter_syntax::parse(&filter)?;
            info!(depth = parsed.depth(), conditions = parsed.conditions().len(), "filter is valid");
            println!("ok: {parsed}");
        }
    }

    Ok(())
}
