//! Durable "has seen intro" flag
//!
//! The only client-side state that survives a reload.

use crate::{Result, VoiceboardError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "voiceboard";
const INTRO_FILE: &str = "intro.json";

pub trait IntroStore {
    fn has_seen_intro(&self) -> bool;
    fn mark_intro_seen(&mut self) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct IntroFlag {
    #[serde(rename = "voice-stockbot-intro-clicked", default)]
    clicked: bool,
}

/// Flag stored as a small JSON file
#[derive(Debug, Clone)]
pub struct FileIntroStore {
    path: PathBuf,
}

impl FileIntroStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform config directory
    pub fn in_config_dir() -> Option<Self> {
        let dir = dirs::config_dir()?.join(APP_DIR);
        Some(Self::new(dir.join(INTRO_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IntroStore for FileIntroStore {
    fn has_seen_intro(&self) -> bool {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return false,
        };
        match serde_json::from_str::<IntroFlag>(&content) {
            Ok(flag) => flag.clicked,
            Err(e) => {
                warn!("Ignoring unreadable intro flag {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn mark_intro_seen(&mut self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                VoiceboardError::Persistence(format!("{}: {}", dir.display(), e))
            })?;
        }
        let json = serde_json::to_string(&IntroFlag { clicked: true })
            .map_err(|e| VoiceboardError::Persistence(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| VoiceboardError::Persistence(format!("{}: {}", self.path.display(), e)))?;
        debug!("Saved intro flag to {}", self.path.display());
        Ok(())
    }
}

/// Non-durable store, for tests and when no config directory exists
#[derive(Debug, Clone, Default)]
pub struct MemoryIntroStore {
    seen: bool,
}

impl MemoryIntroStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntroStore for MemoryIntroStore {
    fn has_seen_intro(&self) -> bool {
        self.seen
    }

    fn mark_intro_seen(&mut self) -> Result<()> {
        self.seen = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_means_not_seen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileIntroStore::new(dir.path().join("intro.json"));
        assert!(!store.has_seen_intro());
    }

    #[test]
    fn test_mark_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("intro.json");

        let mut store = FileIntroStore::new(&path);
        store.mark_intro_seen().unwrap();
        assert!(store.has_seen_intro());

        let reopened = FileIntroStore::new(&path);
        assert!(reopened.has_seen_intro());
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("voice-stockbot-intro-clicked"));
    }

    #[test]
    fn test_corrupt_file_means_not_seen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intro.json");
        std::fs::write(&path, "{{{").unwrap();
        assert!(!FileIntroStore::new(path).has_seen_intro());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryIntroStore::new();
        assert!(!store.has_seen_intro());
        store.mark_intro_seen().unwrap();
        assert!(store.has_seen_intro());
    }
}
