use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "settingsform")]
#[command(version)]
#[command(about = "Validate, inspect and preview settings form schemas")]
#[command(
    long_about = "settingsform works on YAML schema files declaring option groups and the \
    sections and fields that edit them.\n\n\
    Callbacks and sanitizers named in a schema are bound to placeholders, so any schema \
    can be previewed without the application that normally provides them.\n\n\
    Environment variables:\n  \
    SETTINGSFORM_*  Override form configuration keys (e.g. SETTINGSFORM_SUBMIT_LABEL)\n  \
    RUST_LOG        Override the log filter"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory holding settingsform.{toml,yaml,json}
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a schema file builds
    Validate {
        /// Schema file (YAML)
        schema: PathBuf,
    },

    /// List the fields a schema declares
    Fields {
        /// Schema file (YAML)
        schema: PathBuf,

        /// Only fields shown on this page
        #[arg(long, value_name = "SLUG")]
        page: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a settings page to stdout
    Render {
        /// Schema file (YAML)
        schema: PathBuf,

        /// Page slug to render
        #[arg(long, value_name = "SLUG")]
        page: String,

        /// JSON file mapping option name to stored bundle
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// JSON list of pages offered by page dropdowns
        #[arg(long, value_name = "FILE")]
        pages: Option<PathBuf>,

        /// Token placed in the form's nonce field
        #[arg(long, default_value = "")]
        nonce: String,
    },
}
