use crate::core::error::ApeyeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const STORE_DIR: &str = ".apeye";
const ACTIVE_ENVIRONMENT_FILE: &str = "active-environment.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveEnvironment {
    active_environment_id: Option<String>,
}

/// Persists the selected environment id between runs.
pub struct ActiveEnvironmentStore {
    path: PathBuf,
}

impl ActiveEnvironmentStore {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(STORE_DIR).join(ACTIVE_ENVIRONMENT_FILE),
        }
    }

    pub fn current_dir() -> Self {
        Self::in_dir(Path::new("."))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>, ApeyeError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let stored: ActiveEnvironment =
            serde_json::from_str(&content).map_err(|e| ApeyeError::InvalidFile {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(stored.active_environment_id)
    }

    pub fn save(&self, id: &str) -> Result<(), ApeyeError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = ActiveEnvironment {
            active_environment_id: Some(id.to_string()),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| e.to_string())?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ApeyeError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("apeye_store_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_load_clear() {
        let dir = temp_dir("roundtrip");
        let store = ActiveEnvironmentStore::in_dir(&dir);

        assert_eq!(store.load().unwrap(), None);
        store.save("env-1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("env-1"));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"activeEnvironmentId\": \"env-1\""));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = temp_dir("corrupt");
        let store = ActiveEnvironmentStore::in_dir(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(ApeyeError::InvalidFile { .. })));
        let _ = fs::remove_dir_all(&dir);
    }
}
