//! Save/restore of user-facing simulation state as RON.
//!
//! Only the boundary fields are stored: camera, time speed, pause and trail
//! visibility, plus named camera bookmarks. Orbital state is not persisted.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use helio_camera::CameraState;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

pub const SNAPSHOT_VERSION: u32 = 1;
pub const SNAPSHOT_FILE: &str = "snapshot.ron";

/// A named camera bookmark.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub camera: CameraState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub camera: CameraState,
    pub time_speed: f64,
    pub paused: bool,
    pub show_trails: bool,
    #[serde(default)]
    pub favorites: Vec<Favorite>,
}

impl SimulationSnapshot {
    pub fn add_favorite(&mut self, name: impl Into<String>, camera: CameraState) {
        self.favorites.push(Favorite {
            name: name.into(),
            saved_at: Utc::now(),
            camera,
        });
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Remove the bookmark at `index`, if there is one.
    pub fn delete_favorite(&mut self, index: usize) -> Option<Favorite> {
        (index < self.favorites.len()).then(|| self.favorites.remove(index))
    }

    /// Write to `<dir>/snapshot.ron`, creating `dir` if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, SnapshotError> {
        std::fs::create_dir_all(dir).map_err(SnapshotError::Write)?;
        let path = dir.join(SNAPSHOT_FILE);
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(SnapshotError::Serialize)?;
        std::fs::write(&path, serialized).map_err(SnapshotError::Write)?;
        Ok(path)
    }

    /// Read `<dir>/snapshot.ron`. Returns `Ok(None)` if there is no file.
    pub fn load(dir: &Path) -> Result<Option<Self>, SnapshotError> {
        let path = dir.join(SNAPSHOT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).map_err(SnapshotError::Read)?;
        let snapshot: SimulationSnapshot =
            ron::from_str(&contents).map_err(SnapshotError::Parse)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn snapshot() -> SimulationSnapshot {
        SimulationSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            camera: CameraState::new(DVec3::new(1.0, 2.0, 3.0), DVec3::ZERO),
            time_speed: 4.0,
            paused: true,
            show_trails: false,
            favorites: Vec::new(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let mut snap = snapshot();
        snap.add_favorite("earth view", CameraState::default());
        let path = snap.save(tmp.path()).unwrap();
        assert!(path.ends_with(SNAPSHOT_FILE));

        let loaded = SimulationSnapshot::load(tmp.path()).unwrap().unwrap();
        assert_eq!(loaded, snap);
    }

    #[test]
    fn test_missing_file_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(SimulationSnapshot::load(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut snap = snapshot();
        snap.version = 99;
        snap.save(tmp.path()).unwrap();
        assert!(matches!(
            SimulationSnapshot::load(tmp.path()),
            Err(SnapshotError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(SNAPSHOT_FILE), "not ron {{").unwrap();
        assert!(matches!(
            SimulationSnapshot::load(tmp.path()),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn test_favorites_add_list_delete() {
        let mut snap = snapshot();
        snap.add_favorite("a", CameraState::default());
        snap.add_favorite("b", CameraState::default());
        assert_eq!(snap.favorites().len(), 2);
        assert_eq!(snap.delete_favorite(0).unwrap().name, "a");
        assert!(snap.delete_favorite(5).is_none());
        assert_eq!(snap.favorites()[0].name, "b");
    }
}
