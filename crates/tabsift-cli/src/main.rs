mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tabsift",
    version,
    about = "Recover spreadsheet tables from PDF text"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a table from a PDF or text file and print it (nothing is stored)
    Extract {
        /// Path to a PDF or plain-text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// JSON options file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Use pdftotext layout text only, without word-grid table detection
        #[arg(long)]
        layout_only: bool,
    },
    /// Analyze a document and keep the result for a later `generate`
    Analyze {
        /// Path to a PDF or plain-text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// JSON options file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Session directory (default: <tmp>/tabsift-sessions)
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,

        /// Use pdftotext layout text only, without word-grid table detection
        #[arg(long)]
        layout_only: bool,
    },
    /// Build a spreadsheet from a stored analysis
    Generate {
        /// Analysis id printed by `analyze`
        analysis_id: String,

        /// Column to include, in output order (repeatable)
        #[arg(short, long = "column", value_name = "NAME", required = true)]
        columns: Vec<String>,

        /// Sheet format: xlsx (default) or tsv
        #[arg(short, long, default_value = "xlsx", value_parser = ["xlsx", "tsv"])]
        format: String,

        /// Session directory (default: <tmp>/tabsift-sessions)
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,

        /// Where to write the sheet (default: generated name in the current directory)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Delete expired analyses
    Sweep {
        /// Session directory (default: <tmp>/tabsift-sessions)
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            config,
            layout_only,
        } => commands::extract::run(input_file, &output, config, layout_only),
        Commands::Analyze {
            input_file,
            output,
            config,
            store,
            layout_only,
        } => commands::analyze::run(input_file, &output, config, store, layout_only),
        Commands::Generate {
            analysis_id,
            columns,
            format,
            store,
            out,
        } => commands::generate::run(&analysis_id, columns, &format, store, out),
        Commands::Sweep { store } => commands::sweep::run(store),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
