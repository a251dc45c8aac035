use clap::{Parser, Subcommand};
use lexgate_core::Language;
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "lexgate", version, about = "Lexgate privilege gate CLI")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "lexgate.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate configuration, corpus, and policy.
    Check,

    /// Scan a payload and print the verdict.
    ///
    /// Reads the payload from FILE, or from stdin when omitted. Exit code
    /// 0 for ALLOW/WARN, 2 for BLOCK.
    Scan {
        /// Payload file; reads stdin when omitted.
        file: Option<PathBuf>,

        /// Destination identifier used for per-destination policy.
        #[arg(long, default_value = "default")]
        destination: String,

        /// Declared payload language (de|fr|it|en).
        #[arg(long)]
        language: Option<Language>,

        /// Print the verdict as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show recent audit records (file backend only).
    Audit {
        /// Number of records to show.
        #[arg(long, default_value_t = 20)]
        tail: usize,

        /// Print records as JSON Lines.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let cli = Cli::parse();

    let code = match cli.cmd {
        Command::Check => commands::check::run(&cli.config)?,
        Command::Scan {
            file,
            destination,
            language,
            json,
        } => commands::scan::run(&cli.config, file.as_deref(), &destination, language, json).await?,
        Command::Audit { tail, json } => commands::audit::run(&cli.config, tail, json).await?,
    };

    std::process::exit(code);
}
