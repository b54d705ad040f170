//! CLI interface for the resume relevance checker

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-relevance")]
#[command(about = "Score how well a resume matches a job description")]
#[command(long_about = "Compare a resume PDF against a job description PDF using skill keyword overlap and sentence-embedding similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Check {
        /// Path to resume PDF
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description PDF
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// List the recognized skill vocabulary
    Skills,

    /// Embedding model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// Download the embedding model into the cache
    Download {
        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,
    },

    /// Show embedding model information
    Info,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the default configuration as TOML
    Default,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_check_command_parses() {
        let cli = Cli::try_parse_from([
            "resume-relevance", "-v", "check", "-r", "resume.pdf", "-j", "job.pdf", "-o", "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Check { resume, job, output, save, no_color } => {
                assert_eq!(resume, PathBuf::from("resume.pdf"));
                assert_eq!(job, PathBuf::from("job.pdf"));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(save.is_none());
                assert!(!no_color);
            }
            _ => panic!("expected check command"),
        }
    }
}
