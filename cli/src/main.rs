// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # custody
//!
//! Entry point for the `custody` binary. Parses CLI arguments, initializes
//! logging, and drives the ledger library.
//!
//! - `demo`   : build, print, verify, tamper, print, verify again
//! - `record` : one record per file's metadata line, optionally saved
//! - `verify` : re-verify a saved snapshot
//! - `version`: print build version information

mod cli;
mod logging;
mod metadata;
mod snapshot;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use custody_ledger::{Chain, Fault, LedgerConfig, Verdict};

use cli::{Commands, CustodyCli};
use snapshot::Snapshot;

/// Record contents used by `demo`.
const DEMO_RECORDS: [&str; 2] = [
    "File metadata: file1.txt, Size: 1KB, Created: 2024-10-01",
    "File metadata: file2.txt, Size: 2KB, Created: 2024-10-02",
];

/// What `demo` overwrites record #1 with.
const DEMO_TAMPERED_CONTENT: &str = "Tampered data";

fn main() -> Result<ExitCode> {
    let cli = CustodyCli::parse();
    logging::init_logging(&cli.global.log_level, cli.global.log_format);

    let config = LedgerConfig::with_max_content_len(cli.global.max_content_len);

    match cli.command {
        Commands::Demo(args) => run_demo(config, args),
        Commands::Record(args) => record_files(config, args),
        Commands::Verify(args) => verify_snapshot(args),
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Genesis → two records → verify → tamper #1 → verify. Fails unless the
/// verdict flips from valid to invalid.
fn run_demo(config: LedgerConfig, args: cli::DemoArgs) -> Result<ExitCode> {
    let mut chain = demo_chain(config)?;

    println!("Chain before tampering:\n");
    print_chain(&chain, args.json)?;
    let before = chain.verify();
    print_verdict(&before);

    println!("\nTampering with record #1...");
    chain.tamper(1, DEMO_TAMPERED_CONTENT)?;

    println!("\nChain after tampering:\n");
    print_chain(&chain, args.json)?;
    let after = chain.verify();
    print_verdict(&after);

    expect_detection(&before, &after)?;
    tracing::info!(verdict = %after, "tampering detected");
    Ok(ExitCode::SUCCESS)
}

/// Genesis plus the demo records.
fn demo_chain(config: LedgerConfig) -> Result<Chain> {
    let mut chain = Chain::with_config(config).context("invalid ledger config")?;
    for content in DEMO_RECORDS {
        chain.append(content);
    }
    Ok(chain)
}

fn expect_detection(before: &Verdict, after: &Verdict) -> Result<()> {
    if !before.is_valid() || after.is_valid() {
        bail!("expected verdict to go from valid to invalid, got {before} -> {after}");
    }
    Ok(())
}

/// Append each file's metadata line, print the chain, and optionally save a
/// snapshot.
fn record_files(config: LedgerConfig, args: cli::RecordArgs) -> Result<ExitCode> {
    let mut chain = Chain::with_config(config).context("invalid ledger config")?;

    for path in &args.files {
        let line = metadata::content_line(path)?;
        let record = chain.append(&line);
        tracing::info!(
            file = %path.display(),
            sequence_index = record.sequence_index(),
            "file recorded"
        );
    }

    print_chain(&chain, args.json)?;
    let verdict = chain.verify();
    print_verdict(&verdict);

    if let Some(output) = &args.output {
        Snapshot::from_chain(&chain).save(output)?;
        tracing::info!(path = %output.display(), records = chain.len(), "snapshot written");
    }

    Ok(exit_code(&verdict))
}

/// Load a snapshot and report every fault in it. Exit code 1 when invalid.
fn verify_snapshot(args: cli::VerifyArgs) -> Result<ExitCode> {
    let report = SnapshotReport::load(&args.snapshot)?;

    if args.json {
        let json = serde_json::json!({
            "records": report.records,
            "verdict": report.verdict,
            "faults": report.faults,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("Records: {}", report.records);
        print_verdict(&report.verdict);
        for fault in &report.faults {
            println!("  - {fault}");
        }
    }

    if report.verdict.is_valid() && !report.faults.is_empty() {
        tracing::warn!(count = report.faults.len(), "chain verifies but audit found faults");
    }
    Ok(report.exit_code())
}

/// What `verify` found in one snapshot.
#[derive(Debug)]
struct SnapshotReport {
    records: usize,
    verdict: Verdict,
    faults: Vec<Fault>,
}

impl SnapshotReport {
    fn load(path: &Path) -> Result<Self> {
        let chain = Snapshot::load(path)?.into_chain()?;
        Ok(Self::assess(&chain))
    }

    fn assess(chain: &Chain) -> Self {
        SnapshotReport {
            records: chain.len(),
            verdict: chain.verify(),
            faults: chain.audit(),
        }
    }

    /// `audit` also sees a tampered tail, which `verify` cannot, so both
    /// have to come back clean.
    fn passed(&self) -> bool {
        self.verdict.is_valid() && self.faults.is_empty()
    }

    fn exit_code(&self) -> ExitCode {
        if self.passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

fn print_chain(chain: &Chain, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(chain.records())?);
    } else {
        print!("{chain}");
    }
    Ok(())
}

fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Valid => println!("Chain is valid"),
        Verdict::Invalid(fault) => println!("Chain is invalid: {fault}"),
    }
}

fn exit_code(verdict: &Verdict) -> ExitCode {
    if verdict.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("custody {}", env!("CARGO_PKG_VERSION"));
    println!(
        "ledger  {} ({})",
        custody_ledger::config::LEDGER_VERSION,
        custody_ledger::config::DIGEST_ALGORITHM
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use tempfile::TempDir;

    const T0: i64 = 1_727_740_800;

    fn same_code(a: ExitCode, b: ExitCode) -> bool {
        format!("{a:?}") == format!("{b:?}")
    }

    fn three_record_chain() -> Chain {
        let mut chain = Chain::with_genesis_at(T0, LedgerConfig::default()).unwrap();
        for (i, content) in DEMO_RECORDS.iter().enumerate() {
            chain.append_at(content, T0 + i as i64 + 1);
        }
        chain
    }

    fn write_snapshot(dir: &TempDir, chain: &Chain) -> PathBuf {
        let path = dir.path().join("chain.json");
        Snapshot::from_chain(chain).save(&path).unwrap();
        path
    }

    #[test]
    fn clean_snapshot_exits_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, &three_record_chain());

        let report = SnapshotReport::load(&path).unwrap();
        assert_eq!(report.records, 3);
        assert!(report.verdict.is_valid());
        assert!(report.faults.is_empty());
        assert!(report.passed());
        assert!(same_code(report.exit_code(), ExitCode::SUCCESS));
    }

    #[test]
    fn middle_tampered_snapshot_exits_failure() {
        let mut chain = three_record_chain();
        chain.tamper(1, DEMO_TAMPERED_CONTENT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, &chain);

        let report = SnapshotReport::load(&path).unwrap();
        let fault = report.verdict.fault().unwrap();
        assert!(fault.is_digest_mismatch());
        assert_eq!(fault.sequence_index(), 1);
        assert!(!report.passed());
        assert!(same_code(report.exit_code(), ExitCode::FAILURE));
    }

    #[test]
    fn tail_only_tamper_exits_failure() {
        let mut chain = three_record_chain();
        chain.tamper(2, DEMO_TAMPERED_CONTENT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, &chain);

        let report = SnapshotReport::load(&path).unwrap();
        // The pairwise walk never re-digests the tail; only audit does.
        assert!(report.verdict.is_valid());
        assert_eq!(report.faults.len(), 1);
        assert!(report.faults[0].is_digest_mismatch());
        assert_eq!(report.faults[0].sequence_index(), 2);
        assert!(!report.passed());
        assert!(same_code(report.exit_code(), ExitCode::FAILURE));
    }

    #[test]
    fn verify_subcommand_uses_report_exit_code() {
        let mut chain = three_record_chain();
        chain.tamper(2, DEMO_TAMPERED_CONTENT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, &chain);

        let code = verify_snapshot(cli::VerifyArgs {
            snapshot: path,
            json: true,
        })
        .unwrap();
        assert!(same_code(code, ExitCode::FAILURE));
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SnapshotReport::load(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn demo_goes_from_valid_to_invalid() {
        let mut chain = demo_chain(LedgerConfig::default()).unwrap();
        assert_eq!(chain.len(), 3);
        let before = chain.verify();
        chain.tamper(1, DEMO_TAMPERED_CONTENT).unwrap();
        let after = chain.verify();

        assert!(expect_detection(&before, &after).is_ok());
        assert!(expect_detection(&before, &before).is_err());
    }

    #[test]
    fn demo_exits_success() {
        let code = run_demo(LedgerConfig::default(), cli::DemoArgs { json: false }).unwrap();
        assert!(same_code(code, ExitCode::SUCCESS));
    }
}
