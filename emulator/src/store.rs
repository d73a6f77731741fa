use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

use timer_core::settings::{SettingsStore, StorageKey};

/// Settings storage backed by a small record file.
///
/// Records are `key: u32 LE`, `len: u16 LE`, then `len` bytes. The whole file
/// is rewritten on every write. A store without a path keeps values in memory.
#[derive(Debug, Default)]
pub struct FileStore {
    path: Option<PathBuf>,
    records: BTreeMap<u32, Vec<u8>>,
}

impl FileStore {
    pub fn open(path: PathBuf) -> io::Result<Self> {
        let records = match fs::read(&path) {
            Ok(bytes) => decode_records(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        Ok(Self {
            path: Some(path),
            records,
        })
    }

    pub fn ephemeral() -> Self {
        Self::default()
    }

    fn flush(&self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut bytes = Vec::new();
        for (key, value) in &self.records {
            let len = u16::try_from(value.len())
                .map_err(|_| io::Error::new(ErrorKind::InvalidInput, "record too large"))?;
            bytes.extend_from_slice(&key.to_le_bytes());
            bytes.extend_from_slice(&len.to_le_bytes());
            bytes.extend_from_slice(value);
        }
        fs::write(path, bytes)
    }
}

fn decode_records(mut bytes: &[u8]) -> io::Result<BTreeMap<u32, Vec<u8>>> {
    let truncated = || io::Error::new(ErrorKind::InvalidData, "truncated settings file");
    let mut records = BTreeMap::new();

    while !bytes.is_empty() {
        let (header, rest) = bytes.split_at_checked(6).ok_or_else(truncated)?;
        let key = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let len = usize::from(u16::from_le_bytes([header[4], header[5]]));
        let (value, rest) = rest.split_at_checked(len).ok_or_else(truncated)?;
        records.insert(key, value.to_vec());
        bytes = rest;
    }
    Ok(records)
}

impl SettingsStore for FileStore {
    type Error = io::Error;

    fn read(&mut self, key: StorageKey, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        let Some(value) = self.records.get(&key.0) else {
            return Ok(None);
        };
        let copied = value.len().min(buf.len());
        buf[..copied].copy_from_slice(&value[..copied]);
        Ok(Some(value.len()))
    }

    fn write(&mut self, key: StorageKey, value: &[u8]) -> Result<(), Self::Error> {
        self.records.insert(key.0, value.to_vec());
        self.flush()
    }
}
