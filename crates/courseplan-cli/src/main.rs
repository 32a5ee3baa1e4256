#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use courseplan_core::config::resolve_config;
use courseplan_core::error::ErrorCode;
use output::{CliError, OutputMode, render_error};
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "cplan",
    author,
    version,
    about = "cplan: course catalog planner",
    long_about = "Load a course catalog file and explore it: list courses, show a course \
                  with its prerequisites, or compute a study order that respects every \
                  prerequisite. With no subcommand an interactive menu is started."
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Start the interactive menu",
        after_help = "EXAMPLES:\n    # Start the menu with a catalog already loaded\n    cplan menu --file courses.csv"
    )]
    Menu(cmd::menu::MenuArgs),

    #[command(
        about = "List every course in code order",
        after_help = "EXAMPLES:\n    cplan list --file courses.csv\n\n    # Emit machine-readable output\n    cplan list --file courses.csv --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Show one course and its prerequisites",
        after_help = "EXAMPLES:\n    # Codes are matched case-insensitively\n    cplan show csci200 --file courses.csv"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        about = "Print a study order that respects every prerequisite",
        after_help = "EXAMPLES:\n    cplan order --file courses.csv"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        name = "check-store",
        about = "Check that the local SQLite store can be opened",
        after_help = "EXAMPLES:\n    # Uses [store] path from courseplan.toml (default courses.db)\n    cplan check-store"
    )]
    CheckStore(cmd::store::CheckStoreArgs),

    #[command(about = "Generate shell completion scripts")]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("COURSEPLAN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "courseplan=debug,cplan=debug"
        } else {
            "courseplan=error,cplan=error"
        })
    });

    let format = env::var("COURSEPLAN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Some(Commands::Completions(args)) = &cli.command {
        return cmd::completions::run_completions(args.shell, &mut Cli::command());
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.json) {
        Ok(config) => config,
        Err(err) => {
            let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
            render_error(
                mode,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            return Err(err);
        }
    };
    let output = OutputMode::from_resolved(&config.resolved_output);
    debug!(?output, root = %project_root.display(), "configuration resolved");

    match cli.command {
        None => cmd::menu::run_menu(&cmd::menu::MenuArgs::default(), &project_root, config),
        Some(Commands::Menu(args)) => cmd::menu::run_menu(&args, &project_root, config),
        Some(Commands::List(args)) => cmd::list::run_list(&args, output, &project_root, &config),
        Some(Commands::Show(args)) => cmd::show::run_show(&args, output, &project_root, &config),
        Some(Commands::Order(args)) => {
            cmd::order::run_order(&args, output, &project_root, &config)
        }
        Some(Commands::CheckStore(args)) => {
            cmd::store::run_check_store(&args, output, &project_root, &config)
        }
        Some(Commands::Completions(_)) => Ok(()),
    }
}
