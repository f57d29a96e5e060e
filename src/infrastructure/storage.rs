// ============================================================
// KEYWORD MAP STORE
// ============================================================
// Persist the user's custom category keyword map under the data dir

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::domain::error::{AppError, Result};
use crate::domain::keywords::CategoryKeywordMap;

const KEYWORD_MAP_FILE: &str = "category_keywords.json";

/// File-backed store for the category keyword map. A missing or corrupt
/// file silently falls back to the built-in default map.
pub struct KeywordStore {
    path: PathBuf,
}

impl KeywordStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(KEYWORD_MAP_FILE),
        }
    }

    /// The active map: the persisted custom map if present and parseable,
    /// the built-in default otherwise
    pub fn load(&self) -> CategoryKeywordMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return CategoryKeywordMap::default_map(),
        };
        match serde_json::from_str::<CategoryKeywordMap>(&content) {
            Ok(map) if !map.is_empty() => map,
            Ok(_) => CategoryKeywordMap::default_map(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Corrupt keyword map file, using default");
                CategoryKeywordMap::default_map()
            }
        }
    }

    /// Persist a custom map, replacing any previous one
    pub fn save(&self, map: &CategoryKeywordMap) -> Result<()> {
        if map.is_empty() {
            return Err(AppError::ValidationError(
                "Keyword map must contain at least one category".to_string(),
            ));
        }
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| AppError::Internal(format!("Failed to serialize keyword map: {e}")))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Drop the custom map so the default applies again
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keywords::CategoryKeywords;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("socialsift-store-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let store = KeywordStore::new(&temp_dir("missing"));
        assert_eq!(store.load(), CategoryKeywordMap::default_map());
    }

    #[test]
    fn test_save_load_reset_cycle() {
        let dir = temp_dir("cycle");
        let store = KeywordStore::new(&dir);

        let custom = CategoryKeywordMap::new(vec![CategoryKeywords {
            label: "Snacks".to_string(),
            keywords: vec!["chips".to_string()],
        }]);
        store.save(&custom).unwrap();
        assert_eq!(store.load(), custom);

        store.reset().unwrap();
        assert_eq!(store.load(), CategoryKeywordMap::default_map());
        // Resetting twice is fine
        store.reset().unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = temp_dir("corrupt");
        ensure_dir(&dir).unwrap();
        fs::write(dir.join(KEYWORD_MAP_FILE), "{not json").unwrap();

        let store = KeywordStore::new(&dir);
        assert_eq!(store.load(), CategoryKeywordMap::default_map());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_map_rejected() {
        let store = KeywordStore::new(&temp_dir("empty"));
        let err = store.save(&CategoryKeywordMap::default()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
