use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::cast::cmd_cast;
use cli::dtypes::cmd_dtypes;
use cli::init_logging;

#[derive(Parser)]
#[command(
    name = "safe-asarray",
    version,
    about = "Convert array-like values into arrays of a guaranteed element type"
)]
struct Cli {
    /// Log config resolution to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a JSON value and print the resulting array as JSON
    Cast {
        /// Array-like JSON value, e.g. "[[1, 2], [3, 4]]"
        input: String,
        /// Element type name or alias, or "floatX" for the configured default
        #[arg(short, long, default_value = "floatX")]
        dtype: String,
        /// Memory order hint (C or F)
        #[arg(long)]
        order: Option<String>,
        /// TOML config file providing `floatX`
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Override floatX (float32 or float64)
        #[arg(long)]
        floatx: Option<String>,
    },
    /// List element types with their canonical ids and widths
    Dtypes,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Cast {
            input,
            dtype,
            order,
            config,
            floatx,
        } => cmd_cast(
            &input,
            &dtype,
            order.as_deref(),
            config,
            floatx.as_deref(),
        ),
        Command::Dtypes => cmd_dtypes(),
    }
}
