//! Versioned key/value persistence for [`TimerSettings`].
//!
//! Version 2 keeps the whole record in one fixed-size blob under
//! [`StorageKey::DATA`]. Version 1 stored three loose values (display mode,
//! default preset, hide flag) under their own keys; those are still read so an
//! upgrade keeps the user's choices.
//!
//! Blob layout (little endian):
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 1 | default display mode |
//! | 1 | 1 | hide time text (0/1) |
//! | 2 | 1 | default preset index |
//! | 3 | 2 | default custom minutes |
//! | 5 | 2 | enabled-mode bitmask, bit `i` = mode `i` |
//! | 7 | 60 | per mode: background, primary, secondary, accent |

use core::fmt;

use heapless::{LinearMap, Vec as HeaplessVec};

use super::TimerSettings;
use crate::display::palette::{Color, Palette};
use crate::display::DISPLAY_MODE_COUNT;

/// Layout version written by [`save_settings`].
pub const SETTINGS_VERSION: i32 = 2;
/// Layout with one key per field.
pub const LEGACY_VERSION: i32 = 1;

const HEADER_LEN: usize = 7;
const COLORS_PER_PALETTE: usize = 4;
/// Encoded size of the version 2 blob.
pub const SETTINGS_BLOB_LEN: usize = HEADER_LEN + DISPLAY_MODE_COUNT * COLORS_PER_PALETTE;

/// Identifier of one persisted value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct StorageKey(pub u32);

impl StorageKey {
    pub const VERSION: StorageKey = StorageKey(0x1000);
    /// Version 1 display mode, a 32-bit integer.
    pub const DISPLAY_MODE: StorageKey = StorageKey(0x1001);
    /// Version 1 default preset index, a 32-bit integer.
    pub const DEFAULT_TIME: StorageKey = StorageKey(0x1002);
    /// Version 1 hide-time flag, one byte.
    pub const HIDE_TIME: StorageKey = StorageKey(0x1003);
    pub const DATA: StorageKey = StorageKey(0x1004);
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Keyed byte storage that survives restarts.
pub trait SettingsStore {
    /// Backend-specific error type.
    type Error;

    /// Copies the value stored under `key` into `buf`.
    ///
    /// Returns `Ok(None)` when the key is absent, otherwise the full stored
    /// length. At most `buf.len()` bytes are copied, so a length larger than
    /// the buffer means the value was truncated.
    fn read(&mut self, key: StorageKey, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;

    /// Replaces the value stored under `key`.
    fn write(&mut self, key: StorageKey, value: &[u8]) -> Result<(), Self::Error>;
}

/// Errors surfaced while loading or saving settings.
#[derive(Debug, PartialEq, Eq)]
pub enum PersistError<E> {
    /// The storage backend failed.
    Store(E),
}

impl<E> From<E> for PersistError<E> {
    fn from(error: E) -> Self {
        Self::Store(error)
    }
}

impl<E: fmt::Display> fmt::Display for PersistError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Store(error) => write!(f, "settings storage failed: {error}"),
        }
    }
}

/// Serializes the settings into the version 2 blob.
#[must_use]
pub fn encode(settings: &TimerSettings) -> [u8; SETTINGS_BLOB_LEN] {
    let mut blob = [0u8; SETTINGS_BLOB_LEN];
    blob[0] = settings.default_display_mode;
    blob[1] = u8::from(settings.hide_time_text);
    blob[2] = settings.default_preset_index;
    blob[3..5].copy_from_slice(&settings.default_custom_minutes.to_le_bytes());

    let mask = settings
        .visualization_enabled
        .iter()
        .enumerate()
        .filter(|(_, enabled)| **enabled)
        .fold(0u16, |mask, (index, _)| mask | (1 << index));
    blob[5..7].copy_from_slice(&mask.to_le_bytes());

    for (chunk, palette) in blob[HEADER_LEN..]
        .chunks_exact_mut(COLORS_PER_PALETTE)
        .zip(settings.visualization_colors.iter())
    {
        chunk.copy_from_slice(&[
            palette.background.argb(),
            palette.primary.argb(),
            palette.secondary.argb(),
            palette.accent.argb(),
        ]);
    }
    blob
}

/// Parses a version 2 blob. Returns `None` unless `blob` has the exact length.
///
/// Field values are not range-checked here; callers run
/// [`TimerSettings::validate`] afterwards.
#[must_use]
pub fn decode(blob: &[u8]) -> Option<TimerSettings> {
    if blob.len() != SETTINGS_BLOB_LEN {
        return None;
    }

    let mask = u16::from_le_bytes([blob[5], blob[6]]);
    let mut settings = TimerSettings {
        default_display_mode: blob[0],
        hide_time_text: blob[1] != 0,
        default_preset_index: blob[2],
        default_custom_minutes: u16::from_le_bytes([blob[3], blob[4]]),
        ..TimerSettings::default()
    };

    for (index, enabled) in settings.visualization_enabled.iter_mut().enumerate() {
        *enabled = mask & (1 << index) != 0;
    }

    for (palette, chunk) in settings
        .visualization_colors
        .iter_mut()
        .zip(blob[HEADER_LEN..].chunks_exact(COLORS_PER_PALETTE))
    {
        *palette = Palette::new(
            Color(chunk[0]),
            Color(chunk[1]),
            Color(chunk[2]),
            Color(chunk[3]),
        );
    }
    Some(settings)
}

fn read_i32<S: SettingsStore>(store: &mut S, key: StorageKey) -> Result<Option<i32>, S::Error> {
    let mut buf = [0u8; 4];
    Ok(match store.read(key, &mut buf)? {
        Some(4) => Some(i32::from_le_bytes(buf)),
        _ => None,
    })
}

fn read_bool<S: SettingsStore>(store: &mut S, key: StorageKey) -> Result<Option<bool>, S::Error> {
    let mut buf = [0u8; 1];
    Ok(match store.read(key, &mut buf)? {
        Some(len) if len >= 1 => Some(buf[0] != 0),
        _ => None,
    })
}

// Out-of-range legacy integers become invalid bytes that `validate` repairs.
fn legacy_byte(value: i32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn load_legacy<S: SettingsStore>(
    store: &mut S,
    settings: &mut TimerSettings,
) -> Result<(), S::Error> {
    if let Some(mode) = read_i32(store, StorageKey::DISPLAY_MODE)? {
        settings.default_display_mode = legacy_byte(mode);
    }
    if let Some(preset) = read_i32(store, StorageKey::DEFAULT_TIME)? {
        settings.default_preset_index = legacy_byte(preset);
    }
    if let Some(hide) = read_bool(store, StorageKey::HIDE_TIME)? {
        settings.hide_time_text = hide;
    }
    Ok(())
}

/// Loads settings from `store`, falling back to defaults for anything missing
/// or unreadable. The result is always validated.
///
/// # Errors
///
/// Returns [`PersistError::Store`] when the backend itself fails.
pub fn load_settings<S: SettingsStore>(
    store: &mut S,
) -> Result<TimerSettings, PersistError<S::Error>> {
    let mut settings = TimerSettings::default();

    match read_i32(store, StorageKey::VERSION)? {
        Some(SETTINGS_VERSION) => {
            let mut blob = [0u8; SETTINGS_BLOB_LEN];
            let decoded = store
                .read(StorageKey::DATA, &mut blob)?
                .filter(|len| *len == SETTINGS_BLOB_LEN)
                .and_then(|_| decode(&blob));
            if let Some(decoded) = decoded {
                settings = decoded;
            }
        }
        Some(LEGACY_VERSION) => load_legacy(store, &mut settings)?,
        _ => {}
    }

    settings.validate();
    Ok(settings)
}

/// Validates `settings` in place and writes the current layout.
///
/// # Errors
///
/// Returns [`PersistError::Store`] when the backend rejects a write.
pub fn save_settings<S: SettingsStore>(
    store: &mut S,
    settings: &mut TimerSettings,
) -> Result<(), PersistError<S::Error>> {
    settings.validate();
    store.write(StorageKey::VERSION, &SETTINGS_VERSION.to_le_bytes())?;
    store.write(StorageKey::DATA, &encode(settings))?;
    Ok(())
}

/// Number of keys a [`MemoryStore`] can hold.
pub const MEMORY_STORE_SLOTS: usize = 8;

type StoredValue = HeaplessVec<u8, SETTINGS_BLOB_LEN>;

/// Errors reported by [`MemoryStore`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemoryStoreError {
    /// Every slot is taken by another key.
    Full,
    /// The value is longer than the settings blob.
    ValueTooLarge { len: usize },
}

impl fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryStoreError::Full => write!(f, "no free storage slot"),
            MemoryStoreError::ValueTooLarge { len } => {
                write!(f, "value of {len} bytes exceeds {SETTINGS_BLOB_LEN}")
            }
        }
    }
}

/// RAM-backed store for tests and targets without persistent storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: LinearMap<u32, StoredValue, MEMORY_STORE_SLOTS>,
}

impl MemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: LinearMap::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, key: StorageKey) -> bool {
        self.values.contains_key(&key.0)
    }
}

impl SettingsStore for MemoryStore {
    type Error = MemoryStoreError;

    fn read(&mut self, key: StorageKey, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        let Some(value) = self.values.get(&key.0) else {
            return Ok(None);
        };
        let copied = value.len().min(buf.len());
        buf[..copied].copy_from_slice(&value[..copied]);
        Ok(Some(value.len()))
    }

    fn write(&mut self, key: StorageKey, value: &[u8]) -> Result<(), Self::Error> {
        let stored = StoredValue::from_slice(value)
            .map_err(|_| MemoryStoreError::ValueTooLarge { len: value.len() })?;
        self.values
            .insert(key.0, stored)
            .map_err(|_| MemoryStoreError::Full)?;
        Ok(())
    }
}
