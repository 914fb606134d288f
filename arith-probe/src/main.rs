use clap::{Parser, Subcommand};
use colored::Colorize;
use arith_probe::cases::DEFAULT_CASES_FILE;
use arith_probe::commands;

#[derive(Parser)]
#[command(name = "arith-probe")]
#[command(about = "Probe the arith shared library's exported entry points", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template case file with the reference expectations
    Init {
        /// Path of the case file to create
        #[arg(default_value = DEFAULT_CASES_FILE)]
        path: String,
    },
    /// Run every case in a case file against the exported functions
    Run {
        /// Path to the case file
        #[arg(default_value = DEFAULT_CASES_FILE)]
        path: String,
        /// Built shared library to load the functions from (default: linked in)
        #[arg(long)]
        lib: Option<String>,
    },
    /// Call a single exported function (Add, Subtract, Multiply, Divide)
    Eval {
        /// Operation name (case-insensitive)
        op: String,
        /// First operand
        #[arg(allow_negative_numbers = true)]
        a: f64,
        /// Second operand
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },
    /// List #[ffi] exports in Rust sources and check the export surface
    Surface {
        /// Rust file or directory to scan
        #[arg(default_value = "src")]
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { path } => {
            commands::init::execute(&path)
        }
        Commands::Run { path, lib } => {
            commands::run::execute(&path, lib.as_deref())
        }
        Commands::Eval { op, a, b } => {
            commands::eval::execute(&op, a, b)
        }
        Commands::Surface { path } => {
            commands::surface::execute(&path)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
