use clap::{
    Parser,
    Subcommand,
};
use std::path::PathBuf;

/// Swxtch API poller
#[derive(Parser, Debug, Clone)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    #[clap(flatten)]
    pub config: swxtch_poller_config::ConfigArgs,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[clap(short, long, action, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Poll all endpoints once and print the documents as JSON (default).
    Collect {
        /// Also write the documents to this file.
        #[arg(long, value_name = "FILE")]
        output_file: Option<PathBuf>,
    },
    /// Write `db.json` and `routes.json` for scaffolding a mock server.
    Export {
        /// Target directory, defaults to the configured `export_dir`.
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Collect { output_file: None }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let version = clap::crate_version!();
    let config_dir_path = swxtch_poller_config::get_config_dir().display().to_string();

    format!(
        "\
{version}

Authors: {author}

Config directory: {config_dir_path}"
    )
}
