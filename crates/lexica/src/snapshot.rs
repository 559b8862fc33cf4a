// Lexicon snapshot format: header parsing, encoding, file I/O.
//
// Layout:
// - bytes 0..4:   cookie1 (magic number, little-endian)
// - bytes 4..8:   cookie2 (magic number, little-endian)
// - bytes 8..12:  format version (little-endian u32)
// - bytes 12..16: reserved (written as zero)
// - bytes 16..:   bincode body { language, name, description, lemmata }
//
// The index is not stored. Loading replays every lemma through the lexicon's
// regular insertion path, so the rebuilt index always matches the segmenter
// it is loaded with.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use lexica_model::Lemma;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::task::JoinHandle;

use crate::error::{LexiconError, Result};
use crate::language::LanguageProvider;
use crate::lexicon::Lexicon;

const COOKIE1: u32 = 0x4C58_4943;
const COOKIE2: u32 = 0x0A1E_5A7D;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Size of the snapshot header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Snapshot header and body failures.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("not a lexicon snapshot (invalid magic number)")]
    InvalidMagic,

    #[error("snapshot too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("malformed snapshot body: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("failed to write snapshot: {0}")]
    Write(#[source] std::io::Error),
}

/// Raw header as stored on disk. Fields hold little-endian values.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    cookie1: u32,
    cookie2: u32,
    version: u32,
    reserved: [u8; 4],
}

const _: () = assert!(size_of::<RawHeader>() == HEADER_SIZE);

/// Parsed snapshot header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u32,
}

/// Parse and validate the 16-byte snapshot header.
pub fn parse_header(data: &[u8]) -> Result<SnapshotHeader, SnapshotError> {
    if data.len() < HEADER_SIZE {
        return Err(SnapshotError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    // The input may not be aligned for a zero-copy cast.
    let raw: RawHeader = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);
    if u32::from_le(raw.cookie1) != COOKIE1 || u32::from_le(raw.cookie2) != COOKIE2 {
        return Err(SnapshotError::InvalidMagic);
    }

    let version = u32::from_le(raw.version);
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: version,
            supported: SNAPSHOT_VERSION,
        });
    }

    Ok(SnapshotHeader { version })
}

fn header_bytes() -> RawHeader {
    RawHeader {
        cookie1: COOKIE1.to_le(),
        cookie2: COOKIE2.to_le(),
        version: SNAPSHOT_VERSION.to_le(),
        reserved: [0; 4],
    }
}

#[derive(Serialize)]
struct BodyRef<'a> {
    language: &'a str,
    name: &'a str,
    description: &'a str,
    lemmata: &'a [Lemma],
}

#[derive(Deserialize)]
struct Body {
    language: String,
    name: String,
    description: String,
    lemmata: Vec<Lemma>,
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Write a lexicon's snapshot to `writer`.
pub fn write_snapshot<W: Write>(lexicon: &Lexicon, mut writer: W) -> Result<(), SnapshotError> {
    let body = BodyRef {
        language: lexicon.language().key(),
        name: lexicon.name(),
        description: lexicon.description(),
        lemmata: lexicon.lemmata(),
    };
    writer
        .write_all(bytemuck::bytes_of(&header_bytes()))
        .map_err(SnapshotError::Write)?;
    bincode::serialize_into(&mut writer, &body).map_err(|e| match *e {
        bincode::ErrorKind::Io(error) => SnapshotError::Write(error),
        other => SnapshotError::Encoding(Box::new(other)),
    })?;
    Ok(())
}

/// Encode a lexicon's snapshot in memory.
pub fn encode_snapshot(lexicon: &Lexicon) -> Result<Vec<u8>, SnapshotError> {
    let mut buf = Vec::new();
    write_snapshot(lexicon, &mut buf)?;
    Ok(buf)
}

/// Rebuild a lexicon from snapshot bytes, bound to `language`.
///
/// The language recorded in the snapshot is informational; a mismatch with
/// `language` is logged and otherwise ignored.
pub fn decode_snapshot(data: &[u8], language: Arc<LanguageProvider>) -> Result<Lexicon> {
    parse_header(data)?;
    let body: Body =
        bincode::deserialize(&data[HEADER_SIZE..]).map_err(SnapshotError::Encoding)?;

    if body.language != language.key() {
        tracing::warn!(
            stored = %body.language,
            requested = %language.key(),
            lexicon = %body.name,
            "snapshot language differs from the requested language",
        );
    }

    let mut lexicon = Lexicon::new(language, body.name, body.description);
    for lemma in body.lemmata {
        lexicon.add(lemma);
    }
    Ok(lexicon)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read a snapshot file and rebuild the lexicon it holds.
pub fn load_lexicon(path: impl AsRef<Path>, language: Arc<LanguageProvider>) -> Result<Lexicon> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| LexiconError::io(path, e))?;
    let lexicon = decode_snapshot(&data, language)?;
    tracing::info!(
        path = %path.display(),
        lexicon = lexicon.name(),
        lemmata = lexicon.len(),
        "loaded lexicon snapshot",
    );
    Ok(lexicon)
}

/// Write a lexicon snapshot to `path`.
///
/// The snapshot is written to a temporary file in the target directory and
/// renamed over `path`, so readers never observe a partial file.
pub fn save_lexicon(lexicon: &Lexicon, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| LexiconError::io(parent, e))?;

    let temp = NamedTempFile::new_in(parent).map_err(|e| LexiconError::io(parent, e))?;
    let mut writer = BufWriter::new(temp.as_file());
    write_snapshot(lexicon, &mut writer).map_err(|e| match e {
        SnapshotError::Write(error) => LexiconError::io(temp.path(), error),
        other => other.into(),
    })?;
    writer.flush().map_err(|e| LexiconError::io(temp.path(), e))?;
    drop(writer);

    temp.persist(path)
        .map_err(|e| LexiconError::io(path, e.error))?;
    tracing::info!(
        path = %path.display(),
        lexicon = lexicon.name(),
        lemmata = lexicon.len(),
        "saved lexicon snapshot",
    );
    Ok(())
}

/// [`load_lexicon`] on the blocking thread pool.
///
/// Must be called from within a tokio runtime.
pub fn spawn_load(path: PathBuf, language: Arc<LanguageProvider>) -> JoinHandle<Result<Lexicon>> {
    tokio::task::spawn_blocking(move || load_lexicon(path, language))
}

/// [`save_lexicon`] on the blocking thread pool.
///
/// Must be called from within a tokio runtime.
pub fn spawn_save(lexicon: Arc<Lexicon>, path: PathBuf) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || save_lexicon(&lexicon, path))
}
