//! CLI command definitions and subcommands

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Context, Result};

/// lfdraft - Logical Framework drafting pipeline
#[derive(Parser)]
#[command(
    name = "lfd",
    about = "Draft, resume and refine Logical Framework objects from free text",
    version,
    after_help = "Logs are written to: ~/.local/share/lfdraft/logs/lfdraft.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Draft a Logical Framework from a free-text project description
    Draft {
        /// Project description (reads stdin when omitted)
        text: Option<String>,

        /// Read the description from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Merge clarification answers into a draft without a new generation call
    Resume {
        /// Path to a resume request JSON file ("-" for stdin)
        request: String,

        /// Output format
        #[arg(long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Re-draft with clarification answers folded into the prompt
    Refine {
        /// Path to a refine request JSON file ("-" for stdin)
        request: String,

        /// Output format
        #[arg(long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Show pipeline logs
    Logs {
        /// Number of lines to show
        #[arg(short, long, default_value = "50")]
        lines: usize,
    },
}

/// Output format for pipeline responses
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact single-line JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" | "compact" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: pretty or json", s)),
        }
    }
}

/// Get the path to the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lfdraft")
        .join("logs")
        .join("lfdraft.log")
}

/// Read input text from an argument, a file, or stdin (in that order)
pub fn read_input_text(text: Option<String>, file: Option<&PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path).context(format!("Failed to read input from {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read input from stdin")?;
    Ok(buf)
}

/// Read a JSON request payload from a file path or stdin ("-")
pub fn read_request_json(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).context(format!("Failed to read request from {}", source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert!(matches!("pretty".parse::<OutputFormat>(), Ok(OutputFormat::Pretty)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_read_input_prefers_argument() {
        let text = read_input_text(Some("inline".to_string()), Some(&PathBuf::from("/nope"))).unwrap();
        assert_eq!(text, "inline");
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "from file").unwrap();

        let text = read_input_text(None, Some(&path)).unwrap();
        assert_eq!(text, "from file");
    }

    #[test]
    fn test_cli_parses_draft_command() {
        let cli = Cli::try_parse_from(["lfd", "draft", "build a STEM event", "--format", "json"]).unwrap();
        match cli.command {
            Command::Draft { text, format, .. } => {
                assert_eq!(text.as_deref(), Some("build a STEM event"));
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("expected draft command"),
        }
    }
}
