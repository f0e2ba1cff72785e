//! Best score persistence
//!
//! A single integer survives between sessions. Stored in LocalStorage on the
//! web and in a small JSON file on native builds. Failures never interrupt
//! play; callers log them and carry on.

use crate::error::PersistError;

/// Somewhere the best score can be kept between sessions
pub trait HighScoreStore {
    /// Stored best score, `Ok(None)` if nothing has been saved yet
    fn load(&self) -> Result<Option<u64>, PersistError>;

    /// Overwrite the stored best score
    fn save(&mut self, score: u64) -> Result<(), PersistError>;
}

/// In-memory store. Remembers every write, which makes it handy for tests
/// and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    /// Every value passed to `save`, in order
    pub writes: Vec<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            writes: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, PersistError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        self.value = Some(score);
        self.writes.push(score);
        Ok(())
    }
}

/// On-disk record
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
struct HighScoreFile {
    high_score: u64,
}

/// JSON file store for native builds
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn load(&self) -> Result<Option<u64>, PersistError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: HighScoreFile =
            serde_json::from_str(&json).map_err(|e| PersistError::Parse {
                what: "high score",
                detail: e.to_string(),
            })?;
        log::info!("Loaded high score {} from {}", file.high_score, self.path.display());
        Ok(Some(file.high_score))
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        let json = serde_json::to_string(&HighScoreFile { high_score: score }).map_err(|e| {
            PersistError::Parse {
                what: "high score",
                detail: e.to_string(),
            }
        })?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// LocalStorage store for the browser. Keeps the value as a plain decimal
/// string under a single key.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "highscore";

    pub fn new() -> Self {
        Self {
            key: Self::DEFAULT_KEY.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u64>, PersistError> {
        let storage = Self::storage()?;
        let Ok(Some(raw)) = storage.get_item(&self.key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| PersistError::Parse {
                what: "high score",
                detail: e.to_string(),
            })
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &score.to_string())
            .map_err(|e| PersistError::Rejected(format!("{e:?}")))
    }
}
