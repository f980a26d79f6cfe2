//! lfdraft - Logical Framework drafting pipeline
//!
//! CLI entry point for the draft, resume and refine operations.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use lfdraft::cli::{Cli, Command, OutputFormat, get_log_path, read_input_text, read_request_json};
use lfdraft::config::Config;
use lfdraft::drafting::DraftEngine;
use lfdraft::pipeline::{self, DraftRequest, Orchestrator, RefineRequest, ResumeRequest};
use lfdraft::prompts::PromptLoader;

fn setup_logging(verbose: bool, config_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lfdraft")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        config_level
            .and_then(|l| l.parse().ok())
            .unwrap_or(tracing::Level::INFO)
    };
    let log_file = fs::File::create(log_dir.join("lfdraft.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Peek at the configured log level before logging exists
    let config_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.verbose, config_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "lfdraft loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    // Dispatch command
    match cli.command {
        Command::Draft { text, file, format } => cmd_draft(&config, text, file.as_ref(), format).await,
        Command::Resume { request, format } => cmd_resume(&config, &request, format),
        Command::Refine { request, format } => cmd_refine(&config, &request, format).await,
        Command::Logs { lines } => cmd_logs(lines),
    }
}

/// Build the orchestrator for operations that call the generation service
fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    // Validate API key early
    config.validate()?;

    let llm = lfdraft::llm::create_client(&config.llm).context("Failed to create LLM client")?;
    let prompts = PromptLoader::new(std::env::current_dir()?);
    let engine = DraftEngine::new(llm, prompts, config.llm.max_tokens);

    Ok(Orchestrator::new(engine, config.clarification.default_policy()))
}

/// Draft a fresh Logical Framework from free text
async fn cmd_draft(config: &Config, text: Option<String>, file: Option<&PathBuf>, format: OutputFormat) -> Result<()> {
    let text = read_input_text(text, file)?;
    if text.trim().is_empty() {
        return Err(eyre::eyre!("Input text is empty"));
    }

    let orchestrator = build_orchestrator(config)?;
    let response = orchestrator.draft(DraftRequest { text }).await?;

    print_response(&response, format)
}

/// Merge answers into an existing draft; no generation call
fn cmd_resume(config: &Config, request: &str, format: OutputFormat) -> Result<()> {
    let payload = read_request_json(request)?;
    let request: ResumeRequest = serde_json::from_str(&payload).context("Failed to parse resume request")?;

    let response = pipeline::resume_with_answers(request, &config.clarification.default_policy())?;

    print_response(&response, format)
}

/// Re-draft with answers folded into the prompt
async fn cmd_refine(config: &Config, request: &str, format: OutputFormat) -> Result<()> {
    let payload = read_request_json(request)?;
    let request: RefineRequest = serde_json::from_str(&payload).context("Failed to parse refine request")?;

    let orchestrator = build_orchestrator(config)?;
    let response = orchestrator.refine(request).await?;

    print_response(&response, format)
}

/// Show the last N log lines
fn cmd_logs(lines: usize) -> Result<()> {
    let log_path = get_log_path();

    if !log_path.exists() {
        println!("No log file found at: {}", log_path.display());
        return Ok(());
    }

    let file = fs::File::open(&log_path).context("Failed to open log file")?;
    let reader = BufReader::new(file);
    let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

    let start = all_lines.len().saturating_sub(lines);
    for line in &all_lines[start..] {
        println!("{}", line);
    }

    Ok(())
}

fn print_response<T: serde::Serialize>(response: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Json => println!("{}", serde_json::to_string(response)?),
    }
    Ok(())
}
