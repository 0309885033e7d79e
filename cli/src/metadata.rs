//! # File Metadata Source
//!
//! Turns a file on disk into the one-line description the ledger records:
//!
//! ```text
//! File metadata: <name>, Size: <n>KB, Created: <YYYY-MM-DD>
//! ```
//!
//! Sizes are in KiB, rounded up, so any non-empty file is at least `1KB`.
//! Platforms that do not expose a birth time fall back to the modification
//! time.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};

/// The parts of a file's metadata that go into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    pub size_bytes: u64,
    pub created: DateTime<Utc>,
}

impl FileMetadata {
    /// Read metadata for a regular file.
    pub fn read(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("failed to read metadata for {}", path.display()))?;
        if !metadata.is_file() {
            bail!("{} is not a regular file", path.display());
        }

        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .with_context(|| format!("no creation or modification time for {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(FileMetadata {
            name,
            size_bytes: metadata.len(),
            created: DateTime::<Utc>::from(created),
        })
    }

    pub fn size_kb(&self) -> u64 {
        self.size_bytes.div_ceil(1024)
    }

    pub fn to_content_line(&self) -> String {
        format!(
            "File metadata: {}, Size: {}KB, Created: {}",
            self.name,
            self.size_kb(),
            self.created.format("%Y-%m-%d"),
        )
    }
}

/// Shorthand for `FileMetadata::read(path)?.to_content_line()`.
pub fn content_line(path: &Path) -> Result<String> {
    Ok(FileMetadata::read(path)?.to_content_line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn content_line_format() {
        let meta = FileMetadata {
            name: "file1.txt".to_string(),
            size_bytes: 1024,
            created: Utc.with_ymd_and_hms(2024, 10, 1, 12, 30, 0).unwrap(),
        };
        assert_eq!(
            meta.to_content_line(),
            "File metadata: file1.txt, Size: 1KB, Created: 2024-10-01"
        );
    }

    #[test]
    fn size_rounds_up() {
        let mut meta = FileMetadata {
            name: "f".to_string(),
            size_bytes: 0,
            created: Utc.with_ymd_and_hms(2024, 10, 2, 0, 0, 0).unwrap(),
        };
        assert_eq!(meta.size_kb(), 0);
        meta.size_bytes = 1;
        assert_eq!(meta.size_kb(), 1);
        meta.size_bytes = 2048;
        assert_eq!(meta.size_kb(), 2);
        meta.size_bytes = 2049;
        assert_eq!(meta.size_kb(), 3);
    }

    #[test]
    fn reads_real_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .expect("temp file");
        file.write_all(&[b'x'; 1500]).unwrap();
        file.flush().unwrap();

        let meta = FileMetadata::read(file.path()).unwrap();
        assert_eq!(meta.size_bytes, 1500);
        assert_eq!(meta.size_kb(), 2);
        assert!(meta.name.ends_with(".txt"));

        let line = content_line(file.path()).unwrap();
        assert!(line.starts_with("File metadata: "));
        assert!(line.contains(", Size: 2KB, Created: "));
    }

    #[test]
    fn directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileMetadata::read(dir.path()).is_err());
    }

    #[test]
    fn missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileMetadata::read(&dir.path().join("absent.txt")).is_err());
    }
}
