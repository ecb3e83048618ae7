#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lineage: single-rooted family tree on the command line",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Tree file to operate on (defaults to the configured data
    /// directory, then ./family.dat).
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Create a tree with its root person",
        long_about = "Create a new family tree file seeded with its root person.",
        after_help = "EXAMPLES:\n    # Start a tree\n    lin new --gender female --given-name Jane --surname Doe \\\n        --street-number 12 --street-name \"High St\" --suburb Carlton --postcode 3053\n\n    # Emit machine-readable output\n    lin new --gender female --given-name Jane --surname Doe \\\n        --street-number 12 --street-name \"High St\" --suburb Carlton --postcode 3053 --json"
    )]
    New(cmd::new::NewArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Add a relative to a person",
        long_about = "Attach a new father, mother, spouse or child to an existing person.",
        after_help = "EXAMPLES:\n    # Marry the root\n    lin add 0 --relation spouse --gender male --given-name John --surname Doe \\\n        --street-number 12 --street-name \"High St\" --suburb Carlton --postcode 3053\n\n    # Emit machine-readable output\n    lin add 0 --relation child --gender female --given-name Amy --surname Doe \\\n        --street-number 12 --street-name \"High St\" --suburb Carlton --postcode 3053 --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Edit a person's details",
        long_about = "Replace the descriptive details of an existing person. Gender and relationships cannot change.",
        after_help = "EXAMPLES:\n    # Fix a surname\n    lin edit 1 --given-name John --surname Doe --street-number 12 \\\n        --street-name \"High St\" --suburb Carlton --postcode 3053"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Read",
        about = "Render the family hierarchy",
        long_about = "Render the whole family hierarchy as an indented outline.",
        after_help = "EXAMPLES:\n    # Show the tree\n    lin show\n\n    # Emit machine-readable output\n    lin show --json"
    )]
    Show,

    #[command(
        next_help_heading = "Read",
        about = "Show one person in full",
        long_about = "Show full details, relatives and addable relations for one person.",
        after_help = "EXAMPLES:\n    # Describe the root person\n    lin info 0\n\n    # Emit machine-readable output\n    lin info 0 --json"
    )]
    Info(cmd::info::InfoArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    lin completions bash\n\n    # Generate zsh completions\n    lin completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINEAGE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "lineage=debug,info"
        } else {
            "lineage=info,warn"
        })
    });

    let format = env::var("LINEAGE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Handlers that went through `output::fail` already wrote the
            // failure to stderr; everything else is printed here, once.
            if !err.is::<output::Reported>() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let user_config = config::load_user_config()?;
    let output = output::resolve_output_mode(cli.json, user_config.output.as_deref());
    let path = config::resolve_tree_path(cli.file.clone(), &user_config);

    match cli.command {
        Commands::New(ref args) => cmd::new::run_new(args, output, &path),
        Commands::Add(ref args) => cmd::add::run_add(args, output, &path),
        Commands::Edit(ref args) => cmd::edit::run_edit(args, output, &path),
        Commands::Show => cmd::show::run_show(output, &path),
        Commands::Info(ref args) => cmd::info::run_info(args, output, &path),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
