//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "verity",
    bin_name = "verity",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2714} Declarative value validation",
    long_about = "Verity checks values against declared constraints and reports \
                  machine-stable error codes such as NOT_BLANK or FILE_TOO_LARGE.",
    after_help = "EXAMPLES:\n\
        \x20 verity validate signup.json\n\
        \x20 verity validate product.json --composite --format json\n\
        \x20 verity codes --family file\n\
        \x20 verity completions bash > /usr/share/bash-completion/completions/verity",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the values of a JSON document.
    #[command(
        visible_alias = "v",
        about = "Validate a document of values",
        after_help = "DOCUMENT FORMAT:\n\
            \x20 {\n\
            \x20   \"email\": {\n\
            \x20     \"value\": \"ada@example.com\",\n\
            \x20     \"constraints\": [{\"kind\": \"notBlank\"}, {\"kind\": \"email\"}]\n\
            \x20   },\n\
            \x20   \"avatar\": {\n\
            \x20     \"value\": {\"path\": \"avatar.png\"},\n\
            \x20     \"constraints\": [{\"kind\": \"image\", \"maxWidth\": 512}]\n\
            \x20   }\n\
            \x20 }\n\n\
            A top-level array validates each entry by position. Entries may carry\n\
            nested \"fields\" (an object of entries or arrays of entries), which are\n\
            visited with --composite.\n\n\
            EXAMPLES:\n\
            \x20 verity validate signup.json\n\
            \x20 verity validate product.json --composite\n\
            \x20 cat values.json | verity validate - --format json"
    )]
    Validate(ValidateArgs),

    /// List the error code vocabulary.
    #[command(
        about = "List error codes",
        after_help = "EXAMPLES:\n\
            \x20 verity codes\n\
            \x20 verity codes --family image"
    )]
    Codes(CodesArgs),

    /// List the constraint kinds.
    #[command(
        about = "List constraint kinds",
        after_help = "EXAMPLES:\n\
            \x20 verity kinds\n\
            \x20 verity kinds --output-format json"
    )]
    Kinds,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 verity completions bash > ~/.local/share/bash-completion/completions/verity\n\
            \x20 verity completions zsh  > ~/.zfunc/_verity\n\
            \x20 verity completions fish > ~/.config/fish/completions/verity.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Verity configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 verity config list\n\
            \x20 verity config path"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `verity validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Document to validate; `-` reads standard input.
    #[arg(value_name = "FILE", help = "JSON document to validate ('-' for stdin)")]
    pub file: PathBuf,

    /// Report format; defaults to the global output format.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        help = "Report format (overrides --output-format)"
    )]
    pub format: Option<ReportFormat>,

    /// Visit nested `fields` and report per field path.
    #[arg(long = "composite", help = "Validate nested fields recursively")]
    pub composite: bool,

    /// Keep entries without errors in the report.
    #[arg(long = "preserve-empty", help = "Report valid entries too")]
    pub preserve_empty: bool,

    /// Directory relative file paths are resolved against.
    #[arg(
        long = "base-dir",
        value_name = "DIR",
        help = "Resolve relative file paths against DIR (default: the document's directory)"
    )]
    pub base_dir: Option<PathBuf>,
}

/// Output format of a validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per invalid entry.
    Human,
    /// The report as a JSON object.
    Json,
}

// ── codes ─────────────────────────────────────────────────────────────────────

/// Arguments for `verity codes`.
#[derive(Debug, Args)]
pub struct CodesArgs {
    /// Only list codes of this family.
    #[arg(
        long = "family",
        value_name = "FAMILY",
        help = "Filter by family (general, string, uuid, comparison, iterable, date-time, choice, file, image)"
    )]
    pub family: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `verity completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `verity config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from(["verity", "validate", "values.json", "--composite"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.file, PathBuf::from("values.json"));
        assert!(args.composite);
        assert_eq!(args.format, None);
    }

    #[test]
    fn validate_alias_and_format() {
        let cli = Cli::parse_from(["verity", "v", "-", "-f", "json"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.format, Some(ReportFormat::Json));
    }

    #[test]
    fn codes_family_filter() {
        let cli = Cli::parse_from(["verity", "codes", "--family", "image"]);
        assert!(matches!(
            cli.command,
            Commands::Codes(CodesArgs { family: Some(ref f) }) if f == "image"
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["verity", "--quiet", "--verbose", "kinds"]);
        assert!(result.is_err());
    }
}
