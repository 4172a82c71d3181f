pub mod settings;

use std::{
    collections::BTreeMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
pub use settings::SettingsData;

use crate::core::GakuError;

const APP_NAME: &str = "gaku";
pub const STORAGE_FILE: &str = "storage.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn save_json_in<T: Serialize>(dir: &Path, data: &T, filename: &str) -> Result<(), GakuError> {
    fs::create_dir_all(dir)?;
    let file_path = dir.join(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    tracing::debug!(path = %file_path.display(), "data saved");
    Ok(())
}

pub fn load_json_in<T: for<'de> Deserialize<'de> + Default>(
    dir: &Path,
    filename: &str,
) -> Result<T, GakuError> {
    let file_path = dir.join(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!(path = %file_path.display(), "data loaded");
    Ok(data)
}

pub fn load_json_or_default_in<T: for<'de> Deserialize<'de> + Default>(
    dir: &Path,
    filename: &str,
) -> T {
    match load_json_in::<T>(dir, filename) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

/// Small string key-value store, the desktop stand-in for browser local storage.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), GakuError>;
}

/// `Storage` backed by a single JSON object file, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let values = load_json_or_default_in(&dir, STORAGE_FILE);
        Self { dir, values }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GakuError> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        save_json_in(&self.dir, &self.values, STORAGE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn json_round_trip_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sample = Sample { name: "gaku".into(), count: 3 };

        save_json_in(dir.path(), &sample, "sample.json").unwrap();
        let loaded: Sample = load_json_in(dir.path(), "sample.json").unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn missing_or_broken_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing: Sample = load_json_or_default_in(dir.path(), "nope.json");
        assert_eq!(missing, Sample::default());

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let broken: Sample = load_json_or_default_in(dir.path(), "broken.json");
        assert_eq!(broken, Sample::default());
        assert!(load_json_in::<Sample>(dir.path(), "broken.json").is_err());
    }

    #[test]
    fn file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path());
        assert_eq!(storage.get("theme"), None);

        storage.set("theme", "DARK").unwrap();
        assert_eq!(storage.get("theme").as_deref(), Some("DARK"));

        let reopened = FileStorage::open(dir.path());
        assert_eq!(reopened.get("theme").as_deref(), Some("DARK"));
    }
}
