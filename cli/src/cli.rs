//! # CLI Interface
//!
//! Defines the command-line argument structure for `custody` using `clap`
//! derive. Four subcommands: `demo`, `record`, `verify`, and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use custody_ledger::config::{GENESIS_CONTENT, MAX_CONTENT_LEN};

use crate::logging::LogFormat;

/// Tamper-evident file metadata ledger.
///
/// Records file metadata into a hash-chained ledger, prints it, and verifies
/// that nothing already written has been altered.
#[derive(Parser, Debug)]
#[command(
    name = "custody",
    about = "Tamper-evident, hash-chained record ledger",
    version,
    propagate_version = true
)]
pub struct CustodyCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "CUSTODY_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "CUSTODY_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Maximum record content length in bytes. Longer content is truncated.
    /// Must be at least 13, the length of the genesis label.
    #[arg(
        long,
        global = true,
        env = "CUSTODY_MAX_CONTENT_LEN",
        default_value_t = MAX_CONTENT_LEN,
        value_parser = parse_max_content_len
    )]
    pub max_content_len: usize,
}

/// The genesis record's content must fit under the bound, so anything
/// shorter than the label can never produce a chain.
fn parse_max_content_len(s: &str) -> Result<usize, String> {
    let len: usize = s.parse().map_err(|e| format!("`{s}` is not a byte count: {e}"))?;
    if len < GENESIS_CONTENT.len() {
        return Err(format!(
            "must be at least {} bytes to hold the genesis label {GENESIS_CONTENT:?}",
            GENESIS_CONTENT.len()
        ));
    }
    Ok(len)
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a two-record chain, tamper with it, and show verification
    /// catching it.
    Demo(DemoArgs),
    /// Append one record per file (its metadata line) and verify the chain.
    Record(RecordArgs),
    /// Load a snapshot written by `record --output` and verify it.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Print records as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `record` subcommand.
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Files whose metadata becomes record content, in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print records as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write a JSON snapshot of the finished chain to this path.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Snapshot file to verify.
    pub snapshot: PathBuf,

    /// Print the verdict and faults as JSON.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        CustodyCli::command().debug_assert();
    }

    #[test]
    fn record_requires_files() {
        assert!(CustodyCli::try_parse_from(["custody", "record"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = CustodyCli::try_parse_from([
            "custody",
            "demo",
            "--max-content-len",
            "64",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.global.max_content_len, 64);
        assert_eq!(cli.global.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Demo(_)));
    }

    #[test]
    fn max_content_len_below_genesis_label_rejected() {
        let err = CustodyCli::try_parse_from(["custody", "demo", "--max-content-len", "5"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("genesis label"));
    }

    #[test]
    fn max_content_len_equal_to_genesis_label_accepted() {
        let bound = GENESIS_CONTENT.len().to_string();
        let cli = CustodyCli::try_parse_from(["custody", "demo", "--max-content-len", &bound])
            .unwrap();
        assert_eq!(cli.global.max_content_len, GENESIS_CONTENT.len());
    }

    #[test]
    fn max_content_len_must_be_a_number() {
        assert!(CustodyCli::try_parse_from(["custody", "demo", "--max-content-len", "lots"])
            .is_err());
    }

    #[test]
    fn record_parses_output() {
        let cli =
            CustodyCli::try_parse_from(["custody", "record", "a.txt", "b.txt", "-o", "chain.json"])
                .unwrap();
        match cli.command {
            Commands::Record(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.output, Some(PathBuf::from("chain.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
