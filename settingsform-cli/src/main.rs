//! settingsform CLI - validate, inspect and preview settings form schemas.
//!
//! Commands:
//! - `settingsform validate <schema>`: Build the schema and report what it declares
//! - `settingsform fields <schema>`: List every field, as a table or JSON
//! - `settingsform render <schema> --page <slug>`: Print a settings page bound to stored options
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use settingsform::FormConfig;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn configure_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("settingsform=debug,settingsform_fields=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("settingsform=info,settingsform_fields=info"))
    };
    registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = FormConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { schema } => {
            let form = commands::load_form(&schema, config)?;
            commands::validate(&form)
        }
        Commands::Fields { schema, page, json } => {
            let form = commands::load_form(&schema, config)?;
            commands::fields(&form, page.as_deref(), json)
        }
        Commands::Render {
            schema,
            page,
            options,
            pages,
            nonce,
        } => {
            let form = commands::load_form(&schema, config)?;
            commands::render(form, &page, options.as_deref(), pages.as_deref(), &nonce)
        }
    }
}
