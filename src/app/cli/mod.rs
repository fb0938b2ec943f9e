//! CLI Adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Confirm;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::adapters::{Command, JujuScript};
use crate::app::api::{self, DeployOutcome, PlanFormat};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "stack")]
#[command(version)]
#[command(
    about = "Compose charms into nested, reusable stacks and plan their deployment",
    long_about = None
)]
struct Cli {
    /// Log resolution passes at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for PlanFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => PlanFormat::Yaml,
            OutputFormat::Json => PlanFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a stack into a flat deployment plan
    #[clap(visible_alias = "p")]
    Plan {
        /// Stack document or directory containing stack.yaml
        spec: String,
        /// Overlay file (defaults to config.yaml beside the stack)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
        /// Model for units the overlay leaves unassigned
        #[arg(short, long, env = "STACK_MODEL")]
        model: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Record a stack instance and print the juju commands that create it
    #[clap(visible_alias = "d")]
    Deploy {
        /// Stack document or directory containing stack.yaml
        spec: String,
        /// Instance name
        instance: String,
        /// Overlay file (defaults to config.yaml beside the stack)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
        /// Model for units the overlay leaves unassigned
        #[arg(short, long, env = "STACK_MODEL")]
        model: Option<String>,
    },
    /// Show the recorded plan of an instance
    #[clap(visible_alias = "s")]
    Status {
        /// Instance name
        instance: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Forget an instance and print the juju commands that remove it
    Destroy {
        /// Instance name
        instance: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List recorded instances
    #[clap(visible_alias = "ls")]
    List,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Plan { spec, config, model, format } => {
            run_plan(&spec, config, model, format.into())
        }
        Commands::Deploy { spec, instance, config, model } => {
            run_deploy(&spec, &instance, config, model)
        }
        Commands::Status { instance, format } => run_status(&instance, format.into()),
        Commands::Destroy { instance, yes } => run_destroy(&instance, yes),
        Commands::List => run_list(),
    };

    if let Err(e) = result {
        tracing::debug!(kind = ?e.kind(), "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn print_commands(commands: &[Command]) {
    for command in commands {
        println!("{}", JujuScript::format_command(command));
    }
}

fn run_plan(
    spec: &str,
    config: Option<PathBuf>,
    model: Option<String>,
    format: PlanFormat,
) -> Result<(), AppError> {
    let plan = api::plan(spec, config.as_deref(), model.as_deref())?;
    print!("{}", ensure_newline(format.render(&plan)?));
    Ok(())
}

fn run_deploy(
    spec: &str,
    instance: &str,
    config: Option<PathBuf>,
    model: Option<String>,
) -> Result<(), AppError> {
    match api::deploy(spec, instance, config.as_deref(), model.as_deref())? {
        DeployOutcome::Deployed { record, commands } => {
            eprintln!("✅ Recorded instance '{}' of stack '{}'", record.name, record.stack);
            print_commands(&commands);
        }
        DeployOutcome::Unchanged { record } => {
            eprintln!(
                "ℹ️ Instance '{}' is already recorded with the same plan (deployed {})",
                record.name, record.deployed_at
            );
        }
    }
    Ok(())
}

fn run_status(instance: &str, format: PlanFormat) -> Result<(), AppError> {
    let record = api::status(instance)?;
    if format == PlanFormat::Yaml {
        println!("# instance: {}", record.name);
        println!("# stack: {}", record.stack);
        println!("# deployed-at: {}", record.deployed_at);
        println!("# fingerprint: {}", record.fingerprint);
    }
    print!("{}", ensure_newline(format.render(&record.plan)?));
    Ok(())
}

fn run_destroy(instance: &str, yes: bool) -> Result<(), AppError> {
    let record = api::status(instance)?;
    if !yes && !confirm_destroy(&record.name)? {
        eprintln!("Aborted.");
        return Ok(());
    }

    let outcome = api::destroy(instance)?;
    eprintln!("✅ Removed instance '{}'", outcome.record.name);
    print_commands(&outcome.commands);
    Ok(())
}

fn run_list() -> Result<(), AppError> {
    let records = api::list()?;
    if records.is_empty() {
        eprintln!("ℹ️ No instances recorded");
        return Ok(());
    }
    for record in records {
        println!("{}\t{}\t{}", record.name, record.stack, record.deployed_at);
    }
    Ok(())
}

fn confirm_destroy(name: &str) -> Result<bool, AppError> {
    Confirm::new()
        .with_prompt(format!("Destroy instance '{}'?", name))
        .default(false)
        .interact()
        .map_err(|e| AppError::config_error(format!("Confirmation failed: {}", e)))
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
