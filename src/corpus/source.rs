//! Corpus sources: where index builds read their records from.
//!
//! A source yields already-normalized [`MovieRecord`]s. Malformed input is a
//! [`SourceData`](crate::error::MarqueeError::SourceData) error carrying the
//! offending location, and a build that hits one aborts without touching the
//! active index artifact.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::corpus::record::MovieRecord;
use crate::error::{MarqueeError, Result};

/// A source of movie records for an index build.
pub trait CorpusSource {
    /// Read the full record set.
    fn records(&self) -> Result<Vec<MovieRecord>>;
}

/// A corpus stored as JSON Lines: one record object per line.
///
/// ```jsonl
/// {"id": 1, "title": "Alien", "year": 1979, "genres": ["science fiction"]}
/// {"id": 2, "title": "Aliens", "year": 1986, "genres": ["science fiction"]}
/// ```
///
/// Blank lines are skipped. A line that fails to deserialize aborts the read
/// with its line number.
#[derive(Debug, Clone)]
pub struct JsonlCorpus {
    path: PathBuf,
}

impl JsonlCorpus {
    /// Create a source reading from the given JSONL file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonlCorpus {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CorpusSource for JsonlCorpus {
    fn records(&self) -> Result<Vec<MovieRecord>> {
        let file = File::open(&self.path).map_err(|e| {
            MarqueeError::source_data(format!(
                "cannot open corpus file {}: {e}",
                self.path.display()
            ))
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: MovieRecord = serde_json::from_str(&line).map_err(|e| {
                MarqueeError::source_data(format!(
                    "{}:{}: malformed record: {e}",
                    self.path.display(),
                    line_no + 1
                ))
            })?;
            records.push(record);
        }

        debug!(
            path = %self.path.display(),
            count = records.len(),
            "read corpus records"
        );
        Ok(records)
    }
}

/// An in-memory corpus, for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    records: Vec<MovieRecord>,
}

impl MemoryCorpus {
    /// Create a source over the given records.
    pub fn new(records: Vec<MovieRecord>) -> Self {
        MemoryCorpus { records }
    }
}

impl CorpusSource for MemoryCorpus {
    fn records(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_jsonl_corpus_reads_records() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": 1, "title": "Alien", "year": 1979}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id": 2, "title": "Aliens", "year": 1986}}"#).unwrap();

        let source = JsonlCorpus::new(file.path());
        let records = source.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Alien");
        assert_eq!(records[1].year, Some(1986));
    }

    #[test]
    fn test_jsonl_corpus_reports_malformed_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": 1, "title": "Alien"}}"#).unwrap();
        writeln!(file, "not json at all").unwrap();

        let source = JsonlCorpus::new(file.path());
        let err = source.records().unwrap_err();
        match err {
            MarqueeError::SourceData(msg) => assert!(msg.contains(":2:"), "got: {msg}"),
            other => panic!("expected SourceData, got {other:?}"),
        }
    }

    #[test]
    fn test_jsonl_corpus_missing_file() {
        let source = JsonlCorpus::new("/nonexistent/corpus.jsonl");
        assert!(matches!(
            source.records(),
            Err(MarqueeError::SourceData(_))
        ));
    }
}
