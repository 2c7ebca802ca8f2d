//! Where Helio keeps its files on disk.
//!
//! Locations follow OS conventions through the `dirs` crate. `--root`
//! style overrides put everything under one directory instead.

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not determine the OS configuration directory")]
    NoConfigDir,

    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

const APP_NAME: &str = "helio";

/// Config, snapshot, and log locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds `snapshot.ron`.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// The OS locations, without touching the disk. Data falls back to a
    /// folder beside the config when the OS has no data directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_dir = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let data_dir = match dirs::data_dir() {
            Some(base) => base.join(APP_NAME),
            None => config_dir.join("data"),
        };
        let log_dir = config_dir.join("logs");
        Ok(Self {
            config_dir,
            data_dir,
            log_dir,
        })
    }

    /// Everything under `root/helio`.
    pub fn under(root: &Path) -> Self {
        let base = root.join(APP_NAME);
        Self {
            config_dir: base.join("config"),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [&self.config_dir, &self.data_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| PlatformError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_dirs_are_namespaced() {
        // Headless CI may have no home directory.
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.ends_with(APP_NAME));
            assert!(dirs.log_dir.starts_with(&dirs.config_dir));
            assert!(dirs.data_dir.components().any(|c| c.as_os_str() == APP_NAME));
        }
    }

    #[test]
    fn test_create_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::under(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.data_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        // Idempotent.
        dirs.create_dirs().unwrap();
    }

    #[test]
    fn test_create_error_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("helio");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = PlatformDirs::under(tmp.path()).create_dirs().unwrap_err();
        assert!(matches!(err, PlatformError::CreateDir { .. }));
        assert!(err.to_string().contains("helio"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
