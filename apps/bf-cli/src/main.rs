use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use bf_app::{AppError, AppResult, BlockForm, FinalizedBlock, SubmitOutcome};
use bf_block::{Clock, Crop, FarmStatus, FieldError, FixedClock, SystemClock, load_draft, validate_record};
use chrono::NaiveDateTime;

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "BlockForm CLI - register planted field blocks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a draft without deriving anything
    Validate {
        /// Path to the draft YAML or JSON file
        draft_path: PathBuf,
    },
    /// Validate a draft, derive its metrics and print the finalized block
    Submit {
        /// Path to the draft YAML or JSON file
        draft_path: PathBuf,
        /// Reference moment for the planting age (e.g. 2026-10-19T00:00:00)
        #[arg(long)]
        now: Option<String>,
        /// Output format for the finalized block
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// List the crop catalog and farm status options
    Options,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { draft_path } => cmd_validate(&draft_path),
        Commands::Submit {
            draft_path,
            now,
            format,
        } => cmd_submit(&draft_path, now.as_deref(), format),
        Commands::Options => cmd_options(),
    }
}

fn load_form(draft_path: &Path) -> AppResult<BlockForm> {
    let draft = load_draft(draft_path)?;
    let mut form = BlockForm::new();
    form.apply_draft(&draft)?;
    Ok(form)
}

fn print_errors(errors: &[FieldError]) {
    for err in errors {
        println!("  ✗ {:<14} {}", err.field(), err);
    }
}

fn cmd_validate(draft_path: &Path) -> AppResult<()> {
    println!("Validating draft: {}", draft_path.display());
    let form = load_form(draft_path)?;
    let errors = validate_record(&form.snapshot());

    if errors.is_empty() {
        println!("✓ Block is valid");
        Ok(())
    } else {
        print_errors(&errors);
        Err(AppError::Rejected {
            count: errors.len(),
        })
    }
}

fn parse_now(text: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| AppError::InvalidInput(format!("--now {text:?}: {e}")))
}

fn cmd_submit(draft_path: &Path, now: Option<&str>, format: OutputFormat) -> AppResult<()> {
    let mut form = load_form(draft_path)?;

    let clock: Box<dyn Clock> = match now {
        Some(text) => Box::new(FixedClock(parse_now(text)?)),
        None => Box::new(SystemClock),
    };

    match form.submit(clock.as_ref())? {
        SubmitOutcome::Accepted(block) => print_block(&block, format),
        SubmitOutcome::Rejected(errors) => {
            println!("Block was not submitted:");
            print_errors(&errors);
            Err(AppError::Rejected {
                count: errors.len(),
            })
        }
    }
}

fn print_block(block: &FinalizedBlock, format: OutputFormat) -> AppResult<()> {
    let payload = block.to_payload()?;
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&payload)?,
        OutputFormat::Yaml => serde_yaml::to_string(&payload)
            .map_err(|e| AppError::Serialization(e.to_string()))?,
    };
    println!("{text}");
    Ok(())
}

fn cmd_options() -> AppResult<()> {
    println!("Crops:");
    for crop in Crop::ALL {
        println!("  {crop}");
    }
    println!("Farm status:");
    for status in FarmStatus::ALL {
        println!("  {:<10} {}", status.value(), status.text());
    }
    Ok(())
}
