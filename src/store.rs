use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{Result, SnakeError};
use crate::text::slug;

pub const HIGH_SCORE_KEY: &str = "highscore";

/// Keeps the high score between sessions.
pub trait ScoreStore {
    fn get(&self) -> Result<Option<u32>>;
    fn set(&mut self, score: u32) -> Result<()>;
}

/// A JSON object on disk holding one entry per key, like browser local storage.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, key: &str) -> Result<Self> {
        if slug(key).as_deref() != Some(key) {
            return Err(SnakeError::InvalidArgument(format!(
                "storage key `{}` is not a single word",
                key
            )));
        }
        Ok(JsonFileStore {
            path: path.into(),
            key: key.to_string(),
        })
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&text)?;
        match value {
            Value::Object(entries) => Ok(entries),
            other => Err(SnakeError::InvalidArgument(format!(
                "{} holds {} instead of an object",
                self.path.display(),
                other
            ))),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self) -> Result<Option<u32>> {
        let entries = self.read_entries()?;
        match entries.get(&self.key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|score| u32::try_from(score).ok())
                .map(Some)
                .ok_or_else(|| {
                    SnakeError::InvalidArgument(format!(
                        "stored {} is not a score: {}",
                        self.key, value
                    ))
                }),
        }
    }

    fn set(&mut self, score: u32) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            warn!("overwriting unreadable {}: {}", self.path.display(), err);
            Map::new()
        });
        entries.insert(self.key.clone(), Value::from(score));
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Keeps the high score for the current session only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u32>,
}

impl MemoryStore {
    pub fn with_score(score: u32) -> Self {
        MemoryStore { score: Some(score) }
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> Result<Option<u32>> {
        Ok(self.score)
    }

    fn set(&mut self, score: u32) -> Result<()> {
        self.score = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "snake_loop_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_has_no_score() {
        let path = scratch_file("missing");
        let store = JsonFileStore::new(&path, HIGH_SCORE_KEY).unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let path = scratch_file("roundtrip");
        let mut store = JsonFileStore::new(&path, HIGH_SCORE_KEY).unwrap();
        store.set(140).unwrap();
        assert_eq!(store.get().unwrap(), Some(140));
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk[HIGH_SCORE_KEY], Value::from(140));
        cleanup(&path);
    }

    #[test]
    fn other_keys_are_preserved() {
        let path = scratch_file("shared");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let mut store = JsonFileStore::new(&path, HIGH_SCORE_KEY).unwrap();
        store.set(60).unwrap();
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["theme"], Value::from("dark"));
        assert_eq!(on_disk[HIGH_SCORE_KEY], Value::from(60));
        cleanup(&path);
    }

    #[test]
    fn malformed_scores_are_errors() {
        let path = scratch_file("malformed");
        fs::write(&path, r#"{"highscore": "lots"}"#).unwrap();
        let store = JsonFileStore::new(&path, HIGH_SCORE_KEY).unwrap();
        assert!(matches!(store.get(), Err(SnakeError::InvalidArgument(_))));

        fs::write(&path, "[1, 2]").unwrap();
        assert!(store.get().is_err());

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(store.get(), Err(SnakeError::Json(_))));
        cleanup(&path);
    }

    #[test]
    fn keys_must_be_single_words() {
        assert!(JsonFileStore::new(scratch_file("nokey"), "").is_err());
        assert!(matches!(
            JsonFileStore::new(scratch_file("spaced"), "high score"),
            Err(SnakeError::InvalidArgument(_))
        ));
        assert!(JsonFileStore::new(scratch_file("word"), "snake_best").is_ok());
    }

    #[test]
    fn memory_store_keeps_the_last_value() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get().unwrap(), None);
        store.set(20).unwrap();
        assert_eq!(store.get().unwrap(), Some(20));
        assert_eq!(MemoryStore::with_score(80).get().unwrap(), Some(80));
    }
}
