use anyhow::Result;
use std::path::{Path, PathBuf};

/// Overrides the platform config directory when set
pub const HOME_ENV_VAR: &str = "CINERANK_HOME";

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(home)));
        }

        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("cinerank");

        Ok(Self::with_base(base_dir))
    }

    /// Config files at `base`, data and logs in subdirectories
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn default_snapshot_file(&self) -> PathBuf {
        self.data_dir.join("movies.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("cinerank.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to the working directory when no home can be resolved
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".cinerank")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/cr"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/cr/config.toml"));
        assert_eq!(paths.default_snapshot_file(), PathBuf::from("/tmp/cr/data/movies.json"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/cr/logs/cinerank.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().join("home"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
