use clap::{Parser, Subcommand};
use oxidized_provenance::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "oxidized-provenance",
    version,
    about = "Validate AI-generated code annotations in a repository"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every annotation block under a directory
    Validate {
        /// Root path of the repository to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "text", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Comma-separated file patterns to scan (e.g. "*.py,*.ts")
        #[arg(long, value_delimiter = ',')]
        file_patterns: Option<Vec<String>>,

        /// Comma-separated directory or file names to skip (e.g. ".git,node_modules")
        #[arg(long, value_delimiter = ',')]
        exclude_patterns: Option<Vec<String>>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Log scan progress and per-file errors to stderr
        #[arg(long, short)]
        verbose: bool,
    },

    /// Wrap code in a file with an annotation block
    Annotate {
        /// Source file to annotate
        file: PathBuf,

        /// Name of the AI tool that produced the code
        #[arg(long)]
        tool_name: String,

        /// Version of the AI tool (omitted from the block when not given)
        #[arg(long)]
        tool_version: Option<String>,

        /// Identifier of the developer responsible for the code
        #[arg(long)]
        author_id: String,

        /// ISO 8601 date (defaults to the current UTC time)
        #[arg(long)]
        date: Option<String>,

        /// Lines to wrap, "N" or "START-END" (defaults to the whole file)
        #[arg(long)]
        lines: Option<String>,

        /// Comment prefix to use instead of the one implied by the extension
        #[arg(long)]
        comment_prefix: Option<String>,

        /// Rewrite the file instead of printing the result
        #[arg(long)]
        in_place: bool,

        /// Log annotation details to stderr
        #[arg(long, short)]
        verbose: bool,
    },

    /// List all built-in rules with descriptions
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule ID (e.g., "annotation/invalid-date")
        rule_id: String,
    },
}
