//! Action-group persistence - named motion recordings on disk
//!
//! One JSON record file per group under the configured directory. The rest
//! of the device only ever sees names; paths stay in here.

use std::fs;
use std::path::PathBuf;

use yorick_proto::ActionStep;

/// A named, ordered motion recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionGroup {
    pub name: String,
    pub steps: Vec<ActionStep>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("action group '{0}' not found")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

const RECORD_EXT: &str = "json";

/// Directory-backed store for action groups.
pub struct ActionStore {
    dir: PathBuf,
}

impl ActionStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Names of all persisted groups, sorted. An absent directory is an
    /// empty store.
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? != RECORD_EXT {
                    return None;
                }
                Some(path.file_stem()?.to_str()?.to_string())
            })
            .collect();
        names.sort();
        names
    }

    pub fn load(&self, name: &str) -> Result<ActionGroup, StoreError> {
        let path = self.record_path(name)?;
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let steps = serde_json::from_slice(&data)?;
        Ok(ActionGroup {
            name: name.to_string(),
            steps,
        })
    }

    /// Persist a group as a single unit, replacing any previous version.
    /// Returns the number of steps stored.
    pub fn save(&self, name: &str, steps: &[ActionStep]) -> Result<usize, StoreError> {
        if steps.is_empty() {
            return Err(StoreError::InvalidArgument("step list is empty"));
        }
        let path = self.record_path(name)?;
        fs::create_dir_all(&self.dir)?;

        // Write the whole record next to its destination, then rename, so a
        // failed write leaves the previous version loadable.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(steps)?)?;
        fs::rename(&tmp, &path)?;
        Ok(steps.len())
    }

    /// Record path for a name. Names become file names; empty names and
    /// names that would escape the record directory are rejected.
    fn record_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidArgument("name is empty"));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(StoreError::InvalidArgument("name is not a valid record name"));
        }
        Ok(self.dir.join(format!("{name}.{RECORD_EXT}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(time: u32, servo1: i32) -> ActionStep {
        ActionStep {
            time,
            servo1,
            servo2: 1500,
            servo3: 1500,
            servo4: 1500,
            servo5: 1500,
            servo6: 1500,
        }
    }

    #[test]
    fn save_then_list_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActionStore::open(dir.path());

        let steps = vec![step(500, 1200), step(300, 1800)];
        assert_eq!(store.save("wave", &steps).unwrap(), 2);

        assert_eq!(store.list(), vec!["wave".to_string()]);
        let group = store.load("wave").unwrap();
        assert_eq!(group.name, "wave");
        assert_eq!(group.steps, steps);
    }

    #[test]
    fn resave_replaces_previous_steps() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActionStore::open(dir.path());

        store.save("wave", &[step(500, 1200), step(300, 1800)]).unwrap();
        store.save("wave", &[step(100, 1000)]).unwrap();

        let group = store.load("wave").unwrap();
        assert_eq!(group.steps, vec![step(100, 1000)]);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActionStore::open(dir.path());

        store.save("wave", &[step(1, 1)]).unwrap();
        store.save("fist", &[step(1, 1)]).unwrap();
        store.save("point", &[step(1, 1)]).unwrap();

        assert_eq!(store.list(), vec!["fist", "point", "wave"]);
    }

    #[test]
    fn list_is_empty_before_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActionStore::open(dir.path().join("does-not-exist-yet"));
        assert!(store.list().is_empty());
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActionStore::open(dir.path());
        assert!(matches!(
            store.load("nothing"),
            Err(StoreError::NotFound(name)) if name == "nothing"
        ));
    }

    #[test]
    fn save_rejects_empty_name_and_steps() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActionStore::open(dir.path());

        assert!(matches!(
            store.save("", &[step(1, 1)]),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.save("wave", &[]),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(store.list().is_empty());
    }

    #[test]
    fn save_rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActionStore::open(dir.path());
        assert!(matches!(
            store.save("../escape", &[step(1, 1)]),
            Err(StoreError::InvalidArgument(_))
        ));
    }
}
