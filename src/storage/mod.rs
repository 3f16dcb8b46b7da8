//! Durable index artifact: a versioned, checksummed binary blob.
//!
//! Layout: 4 magic bytes, a little-endian format version word, a CRC32 of
//! the payload, then the bincode payload (record snapshot + text index +
//! build timestamp). The artifact is replaced atomically: the new blob is
//! written to a sibling temp file and renamed over the old one, so a
//! failed build never leaves a partially written artifact as the active
//! one.
//!
//! A missing artifact and a corrupt artifact are distinct, reported
//! failures; neither is ever treated as an empty index.

use std::fs;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::corpus::MovieRecord;
use crate::error::{MarqueeError, Result};
use crate::index::TextIndex;

/// Artifact file signature.
const MAGIC: &[u8; 4] = b"MRQX";

/// Current artifact format version. Bumped on any layout change.
pub const FORMAT_VERSION: u32 = 1;

/// Header size: magic + version + checksum.
const HEADER_LEN: usize = 12;

/// Everything a search engine needs, snapshotted at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexArtifact {
    /// When the index build finished.
    pub built_at: DateTime<Utc>,
    /// The corpus snapshot the index was built from, in row order.
    pub records: Vec<MovieRecord>,
    /// The frozen text index over those records.
    pub index: TextIndex,
}

/// Write the artifact to `path`, replacing any existing artifact wholesale.
pub fn save(path: &Path, artifact: &IndexArtifact) -> Result<()> {
    let payload = bincode::serialize(artifact)
        .map_err(|e| MarqueeError::serialization(format!("artifact encode failed: {e}")))?;
    let checksum = crc32fast::hash(&payload);

    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    buf.write_u32::<LittleEndian>(checksum)?;
    buf.extend_from_slice(&payload);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Same-directory temp file so the rename is atomic.
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &buf)?;
    fs::rename(&tmp, path)?;

    info!(
        path = %path.display(),
        bytes = buf.len(),
        docs = artifact.records.len(),
        "index artifact saved"
    );
    Ok(())
}

/// Load the artifact from `path`.
///
/// Absence is [`IndexMissing`](MarqueeError::IndexMissing); any unreadable
/// or malformed content is [`IndexCorrupt`](MarqueeError::IndexCorrupt)
/// with the reason. No repair is attempted.
pub fn load(path: &Path) -> Result<IndexArtifact> {
    if !path.exists() {
        return Err(MarqueeError::index_missing(path));
    }

    let data = fs::read(path)?;
    if data.len() < HEADER_LEN {
        return Err(MarqueeError::index_corrupt(format!(
            "{}: truncated header ({} bytes)",
            path.display(),
            data.len()
        )));
    }

    if &data[0..4] != MAGIC {
        return Err(MarqueeError::index_corrupt(format!(
            "{}: bad magic bytes",
            path.display()
        )));
    }

    let version = (&data[4..8]).read_u32::<LittleEndian>()?;
    if version != FORMAT_VERSION {
        return Err(MarqueeError::index_corrupt(format!(
            "{}: unsupported format version {version} (expected {FORMAT_VERSION})",
            path.display()
        )));
    }

    let stored_checksum = (&data[8..12]).read_u32::<LittleEndian>()?;
    let payload = &data[HEADER_LEN..];
    let actual_checksum = crc32fast::hash(payload);
    if stored_checksum != actual_checksum {
        return Err(MarqueeError::index_corrupt(format!(
            "{}: checksum mismatch (stored {stored_checksum:#010x}, computed {actual_checksum:#010x})",
            path.display()
        )));
    }

    let artifact: IndexArtifact = bincode::deserialize(payload).map_err(|e| {
        MarqueeError::index_corrupt(format!("{}: undecodable payload: {e}", path.display()))
    })?;

    debug!(
        path = %path.display(),
        docs = artifact.records.len(),
        built_at = %artifact.built_at,
        "index artifact loaded"
    );
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::index::{IndexBuilder, IndexConfig};

    fn artifact() -> IndexArtifact {
        let records = vec![MovieRecord {
            id: 1,
            title: "Alien".to_string(),
            year: Some(1979),
            genres: vec!["science fiction".to_string()],
            director: Some("Ridley Scott".to_string()),
            cast: vec!["Sigourney Weaver".to_string()],
            synopsis: "A crew encounters a deadly creature.".to_string(),
            quality: Some(8.5),
        }];
        let index = IndexBuilder::new(IndexConfig::default())
            .build(&records)
            .unwrap();
        IndexArtifact {
            built_at: Utc::now(),
            records,
            index,
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");

        save(&path, &artifact()).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].title, "Alien");
        assert_eq!(loaded.index.doc_count(), 1);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.bin");
        assert!(matches!(
            load(&path),
            Err(MarqueeError::IndexMissing { .. })
        ));
    }

    #[test]
    fn test_corrupt_magic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        fs::write(&path, b"NOPE00000000garbage").unwrap();
        assert!(matches!(load(&path), Err(MarqueeError::IndexCorrupt(_))));
    }

    #[test]
    fn test_corrupt_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        fs::write(&path, b"MRQX").unwrap();
        assert!(matches!(load(&path), Err(MarqueeError::IndexCorrupt(_))));
    }

    #[test]
    fn test_corrupt_flipped_payload_byte() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        save(&path, &artifact()).unwrap();

        let mut data = fs::read(&path).unwrap();
        let last = data.len() - 1;
        data[last] ^= 0xFF;
        fs::write(&path, &data).unwrap();

        match load(&path) {
            Err(MarqueeError::IndexCorrupt(msg)) => assert!(msg.contains("checksum")),
            other => panic!("expected IndexCorrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_save_replaces_existing_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");

        save(&path, &artifact()).unwrap();
        let mut second = artifact();
        second.records[0].title = "Aliens".to_string();
        save(&path, &second).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.records[0].title, "Aliens");
        assert!(!path.with_extension("tmp").exists());
    }
}
