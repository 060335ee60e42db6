//! Atomic file operations for the client's durable slots.
//!
//! Provides a thin layer for safe access to JSON and TOML state files.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// On-disk encoding of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn name(self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",
            FileFormat::Toml => "TOML",
        }
    }
}

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// Content could not be decoded into the requested type.
    ParseError { format: FileFormat, message: String },
    /// Value could not be encoded.
    SerializeError { format: FileFormat, message: String },
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::ParseError { format, message } => {
                write!(f, "{} parse error: {}", format.name(), message)
            }
            AtomicFileError::SerializeError { format, message } => {
                write!(f, "{} serialization error: {}", format.name(), message)
            }
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl AtomicFileError {
    /// True when the file existed but its content was not valid.
    pub fn is_malformed(&self) -> bool {
        matches!(self, AtomicFileError::ParseError { .. })
    }
}

impl From<AtomicFileError> for docchat_core::DocchatError {
    fn from(err: AtomicFileError) -> Self {
        match err {
            AtomicFileError::IoError(e) => e.into(),
            AtomicFileError::ParseError { format, message }
            | AtomicFileError::SerializeError { format, message } => {
                docchat_core::DocchatError::Serialization {
                    format: format.name().to_string(),
                    message,
                }
            }
            AtomicFileError::LockError(message) => {
                docchat_core::DocchatError::data_access(message)
            }
        }
    }
}

/// A handle to a state file that is replaced atomically on every save.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: `update` holds an exclusive lock file while it runs
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or decode the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data = match self.format {
            FileFormat::Json => serde_json::from_str(&content).map_err(|e| {
                AtomicFileError::ParseError {
                    format: self.format,
                    message: e.to_string(),
                }
            })?,
            FileFormat::Toml => {
                toml::from_str(&content).map_err(|e| AtomicFileError::ParseError {
                    format: self.format,
                    message: e.to_string(),
                })?
            }
        };
        Ok(Some(data))
    }

    /// Encodes and writes the value via a temporary file and an atomic rename.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.encode(data)?;

        // Write to temporary file in the same directory
        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Read-modify-write under an exclusive lock.
    ///
    /// `default_value` is used when the file is missing or empty.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), AtomicFileError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;

        Ok(())
    }

    fn encode(&self, data: &T) -> Result<String, AtomicFileError> {
        match self.format {
            FileFormat::Json => {
                serde_json::to_string_pretty(data).map_err(|e| AtomicFileError::SerializeError {
                    format: self.format,
                    message: e.to_string(),
                })
            }
            FileFormat::Toml => {
                toml::to_string_pretty(data).map_err(|e| AtomicFileError::SerializeError {
                    format: self.format,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Gets a temporary file path for atomic writes.
    fn get_temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that automatically releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                AtomicFileError::LockError(format!("Failed to acquire lock: {}", e))
            })?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; the lock file itself is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Slot {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Slot>::json(temp_dir.path().join("slot.json"));

        let slot = Slot {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&slot).unwrap();

        assert_eq!(file.load().unwrap(), Some(slot));
    }

    #[test]
    fn test_toml_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Slot>::toml(temp_dir.path().join("slot.toml"));

        let slot = Slot {
            name: "toml".to_string(),
            count: 1,
        };
        file.save(&slot).unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("name = \"toml\""));
        assert_eq!(file.load().unwrap(), Some(slot));
    }

    #[test]
    fn test_missing_and_empty_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.json");
        let file = AtomicFile::<Slot>::json(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_garbage_is_reported_as_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.json");
        fs::write(&path, "{\"name\": ").unwrap();

        let err = AtomicFile::<Slot>::json(path).load().unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_update_applies_to_default_then_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Slot>::json(temp_dir.path().join("slot.json"));
        let default_slot = Slot {
            name: "default".to_string(),
            count: 0,
        };

        file.update(default_slot.clone(), |slot| {
            slot.count += 10;
            Ok(())
        })
        .unwrap();
        file.update(default_slot, |slot| {
            slot.count += 5;
            Ok(())
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap().count, 15);
        assert!(!temp_dir.path().join("slot.lock").exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("slot.json");
        let file = AtomicFile::<Slot>::json(path.clone());

        file.save(&Slot {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join(".slot.json.tmp").exists());
    }
}
