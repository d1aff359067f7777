//! File-based store for durable state.

use crate::error::{StoreError, StoreResult};
use crate::iterator::StateIterator;
use crate::memory::snapshot_range;
use crate::store::StateStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Magic bytes at the start of every put frame.
const FRAME_MAGIC: &[u8; 4] = b"RLPT";

/// Frame header: magic, key length, value length, header checksum.
const HEADER_SIZE: usize = 16;

/// Trailing checksum over header, key and value.
const CRC_SIZE: usize = 4;

/// Options for opening a [`FileStore`].
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Whether to fsync the log after every put (safer but slower).
    pub sync_on_write: bool,

    /// Whether to create missing parent directories on open.
    pub create_dirs: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            sync_on_write: true,
            create_dirs: true,
        }
    }
}

impl FileStoreConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to fsync after every put.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub const fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }
}

/// A durable file-backed store.
///
/// Every put is appended to a log file as a framed record:
///
/// ```text
/// | "RLPT" | key_len: u32 LE | value_len: u32 LE | header_crc: u32 LE | key | value | crc: u32 LE |
/// ```
///
/// `header_crc` covers the first twelve bytes, so a damaged length field is
/// caught before it is trusted. `crc` covers everything before it.
///
/// On open the log is replayed into an ordered in-memory index; later frames
/// for a key replace earlier ones. Reads and scans are served from the index.
///
/// # Recovery
///
/// Only the last frame may be incomplete. A frame whose verified header
/// claims more bytes than the file holds (a torn write) is discarded and the
/// file is truncated back to the last complete frame. Bad magic, a checksum
/// mismatch, or a header that does not fit before the next frame is reported
/// as [`StoreError::Corrupted`] and nothing is truncated.
///
/// A put that fails part way removes its partial frame before returning. If
/// that cleanup fails too, the store refuses further writes with
/// [`StoreError::Closed`].
///
/// # Example
///
/// ```no_run
/// use recledger_store::{FileStore, StateStore};
/// use std::path::Path;
///
/// let mut store = FileStore::open(Path::new("state.log")).unwrap();
/// store.put("1", b"{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    config: FileStoreConfig,
    file: RwLock<File>,
    index: RwLock<BTreeMap<String, Vec<u8>>>,
    closed: bool,
}

impl FileStore {
    /// Opens or creates a store at the given path with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its log is corrupted.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_with_config(path, FileStoreConfig::default())
    }

    /// Opens or creates a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created, the file cannot be
    /// opened, or its log is corrupted.
    pub fn open_with_config(path: &Path, config: FileStoreConfig) -> StoreResult<Self> {
        if config.create_dirs {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let mut contents = Vec::new();
        file.seek(SeekFrom::Start(0))?;
        file.read_to_end(&mut contents)?;

        let (index, valid_len) = replay(&contents)?;
        if valid_len < contents.len() as u64 {
            tracing::warn!(
                path = %path.display(),
                discarded = contents.len() as u64 - valid_len,
                "discarding torn frame at end of store log"
            );
            file.set_len(valid_len)?;
            file.sync_all()?;
        }

        tracing::debug!(path = %path.display(), keys = index.len(), "opened file store");

        Ok(Self {
            path: path.to_path_buf(),
            config,
            file: RwLock::new(file),
            index: RwLock::new(index),
            closed: false,
        })
    }

    /// Returns the path to the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once the store has stopped accepting writes.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Syncs all data and metadata to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    pub fn sync(&self) -> StoreResult<()> {
        self.file.write().sync_all()?;
        Ok(())
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Rebuilds the index from raw log bytes.
///
/// Returns the index and the length of the valid prefix. Anything past that
/// prefix is a torn final frame.
fn replay(contents: &[u8]) -> StoreResult<(BTreeMap<String, Vec<u8>>, u64)> {
    let mut index = BTreeMap::new();
    let mut offset = 0usize;

    while offset < contents.len() {
        let rest = &contents[offset..];
        let corrupted = |message: String| StoreError::corrupted(offset as u64, message);

        if rest.len() < HEADER_SIZE {
            // A partial header can only be the tail, and must still look
            // like the start of a frame.
            let magic_len = rest.len().min(FRAME_MAGIC.len());
            if rest[..magic_len] != FRAME_MAGIC[..magic_len] {
                return Err(corrupted("bad frame magic".into()));
            }
            break;
        }
        if &rest[0..4] != FRAME_MAGIC {
            return Err(corrupted("bad frame magic".into()));
        }

        let stored_header_crc = read_u32(rest, 12);
        let header_crc = crc32fast::hash(&rest[..12]);
        if stored_header_crc != header_crc {
            return Err(corrupted(format!(
                "header checksum mismatch: expected {stored_header_crc:#010x}, got {header_crc:#010x}"
            )));
        }

        let key_len = read_u32(rest, 4) as usize;
        let value_len = read_u32(rest, 8) as usize;
        let body_end = HEADER_SIZE + key_len + value_len;
        let frame_len = body_end + CRC_SIZE;
        if rest.len() < frame_len {
            break;
        }

        let stored_crc = read_u32(rest, body_end);
        let crc = crc32fast::hash(&rest[..body_end]);
        if stored_crc != crc {
            return Err(corrupted(format!(
                "frame checksum mismatch: expected {stored_crc:#010x}, got {crc:#010x}"
            )));
        }

        let key = std::str::from_utf8(&rest[HEADER_SIZE..HEADER_SIZE + key_len])
            .map_err(|_| corrupted("key is not valid UTF-8".into()))?;
        let value = rest[HEADER_SIZE + key_len..body_end].to_vec();
        index.insert(key.to_string(), value);

        offset += frame_len;
    }

    Ok((index, offset as u64))
}

fn encode_frame(key: &str, value: &[u8]) -> StoreResult<Vec<u8>> {
    let key_len = u32::try_from(key.len())
        .map_err(|_| StoreError::InvalidKey(format!("key of {} bytes is too long", key.len())))?;
    let value_len = u32::try_from(value.len())
        .map_err(|_| StoreError::other(format!("value of {} bytes is too long", value.len())))?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + key.len() + value.len() + CRC_SIZE);
    frame.extend_from_slice(FRAME_MAGIC);
    frame.extend_from_slice(&key_len.to_le_bytes());
    frame.extend_from_slice(&value_len.to_le_bytes());
    let header_crc = crc32fast::hash(&frame);
    frame.extend_from_slice(&header_crc.to_le_bytes());
    frame.extend_from_slice(key.as_bytes());
    frame.extend_from_slice(value);
    let crc = crc32fast::hash(&frame);
    frame.extend_from_slice(&crc.to_le_bytes());
    Ok(frame)
}

/// The file operations an append needs.
trait LogFile: Write + Seek {
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
    fn sync_durable(&mut self) -> io::Result<()>;
}

impl LogFile for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync_durable(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

/// Why an append failed.
#[derive(Debug)]
enum AppendError {
    /// The log is back at its previous length.
    RolledBack(io::Error),
    /// A partial frame may remain at the end of the log.
    Stranded(io::Error),
}

/// Appends `frame` to the end of the log.
///
/// If the write or sync fails, the log is truncated back to where the frame
/// started so a later append never lands behind a partial frame.
fn append_frame<F: LogFile>(file: &mut F, frame: &[u8], sync: bool) -> Result<(), AppendError> {
    let start = file.seek(SeekFrom::End(0)).map_err(AppendError::RolledBack)?;

    let written = file.write_all(frame).and_then(|()| {
        if sync {
            file.sync_durable()
        } else {
            file.flush()
        }
    });

    match written {
        Ok(()) => Ok(()),
        Err(e) => match file.truncate_to(start) {
            Ok(()) => Err(AppendError::RolledBack(e)),
            Err(rollback) => {
                tracing::warn!(
                    offset = start,
                    error = %rollback,
                    "failed to remove partial frame from store log"
                );
                Err(AppendError::Stranded(e))
            }
        },
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.index.read().get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        if key.is_empty() {
            return Err(StoreError::InvalidKey("key must not be empty".into()));
        }
        let frame = encode_frame(key, value)?;

        let appended = append_frame(&mut *self.file.write(), &frame, self.config.sync_on_write);
        match appended {
            Ok(()) => {}
            Err(AppendError::RolledBack(e)) => return Err(e.into()),
            Err(AppendError::Stranded(e)) => {
                tracing::warn!(path = %self.path.display(), "closing file store for writes");
                self.closed = true;
                return Err(e.into());
            }
        }

        self.index.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn scan(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>> {
        let entries = snapshot_range(&self.index.read(), start, end);
        Ok(StateIterator::from_entries(entries))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.index.read().len())
    }
}
