//! Where the library and the log file live.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::library::{store::STORAGE_KEY, FileStorage, ProofStore};

pub const DATA_DIR_ENV: &str = "QED_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub storage_key: String,
}

impl Config {
    /// Resolve paths: explicit flag, then `QED_DATA_DIR`, then the platform
    /// data directory.
    pub fn resolve(data_dir: Option<PathBuf>, log_file: Option<PathBuf>) -> Self {
        let data_dir = data_dir
            .or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        let log_file = log_file.unwrap_or_else(default_log_file);
        Self {
            data_dir,
            log_file,
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    pub fn open_store(&self) -> ProofStore<FileStorage> {
        ProofStore::with_key(FileStorage::new(&self.data_dir), &self.storage_key)
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| Path::new(".qed").to_path_buf(), |d| d.join("qed"))
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qed/qed.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_paths_win() {
        let config = Config::resolve(Some("/tmp/lib".into()), Some("/tmp/qed.log".into()));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/lib"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/qed.log"));
        assert_eq!(config.data_file(), PathBuf::from("/tmp/lib/math_proofs_db.json"));
    }
}
