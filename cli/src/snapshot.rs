//! JSON snapshots of a chain, for `record --output` and `verify`.
//!
//! The ledger itself has no on-disk format; this is the CLI's. A snapshot
//! is the chain's config plus its records in traversal order.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use custody_ledger::{Chain, LedgerConfig, Record};

#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: LedgerConfig,
    pub records: Vec<Record>,
}

impl Snapshot {
    pub fn from_chain(chain: &Chain) -> Self {
        Snapshot {
            config: chain.config().clone(),
            records: chain.records().to_vec(),
        }
    }

    pub fn into_chain(self) -> Result<Chain> {
        Chain::from_records(self.records, self.config).context("snapshot is not a well-formed chain")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_verifies() {
        let mut chain = Chain::new();
        chain.append("File metadata: a.txt, Size: 1KB, Created: 2024-10-01");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.json");
        Snapshot::from_chain(&chain).save(&path).unwrap();

        let restored = Snapshot::load(&path).unwrap().into_chain().unwrap();
        assert_eq!(restored, chain);
        assert!(restored.is_valid());
    }

    #[test]
    fn garbage_snapshot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(Snapshot::load(&path).is_err());
    }

    #[test]
    fn empty_snapshot_rejected() {
        let snapshot = Snapshot {
            config: LedgerConfig::default(),
            records: Vec::new(),
        };
        assert!(snapshot.into_chain().is_err());
    }
}
