//! ltx-addons CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "ltx-addons")]
#[command(version)]
#[command(about = "Accessibility decoration for LaTeXML HTML pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decorate a LaTeXML page, or every .html file under a directory
    Decorate {
        /// Input file or directory
        input: PathBuf,

        /// Write output to FILE (or DIR for directory input); defaults to stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Use this config file instead of searching for _addons.yml
        #[arg(long)]
        config: Option<PathBuf>,

        /// arXiv identifier (defaults to the input's parent directory name)
        #[arg(long, conflicts_with = "submission")]
        id: Option<String>,

        /// Decorate as a paper under submission
        #[arg(long)]
        submission: bool,

        /// Suppress diagnostics and progress output
        #[arg(long)]
        quiet: bool,

        /// Print diagnostics as JSON lines on stderr
        #[arg(long)]
        diagnostics_json: bool,
    },

    /// Compress citation labels into ranges, e.g. `5 3 4 9` -> `[3-5,9]`
    Ranges {
        /// Citation labels, as they appear in the marker
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Replay citation modal events against a page
    Modal {
        /// Input file
        input: PathBuf,

        /// Event to apply, in order: open:<RANGE>, tab, shift-tab, escape,
        /// close, dismiss, click-inside, click-outside
        #[arg(short = 'e', long = "event", required = true)]
        events: Vec<String>,

        /// Use this config file instead of searching for _addons.yml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the resulting page to FILE
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ltx_addons=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decorate {
            input,
            output,
            config,
            id,
            submission,
            quiet,
            diagnostics_json,
        } => commands::decorate::execute(commands::decorate::DecorateArgs {
            input,
            output,
            config,
            id,
            submission,
            quiet,
            diagnostics_json,
        }),
        Commands::Ranges { labels } => commands::ranges::execute(&labels),
        Commands::Modal {
            input,
            events,
            config,
            output,
        } => commands::modal::execute(commands::modal::ModalArgs {
            input,
            events,
            config,
            output,
        }),
    }
}
