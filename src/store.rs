use std::{
    io,
    path::{Path, PathBuf},
};

use crate::alarm::Alarm;

/// why a load or save of the alarm file failed
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("couldn't read alarm file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("alarm file {} is malformed: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("couldn't encode alarms: {}", .source)]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("couldn't write alarm file {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// durable storage for the alarm collection, one json file holding every alarm
///
/// loads and saves are always the whole collection at once, there are no
/// partial updates
#[derive(Debug, Clone)]
pub struct AlarmStore {
    path: PathBuf,
}

impl AlarmStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// load every saved alarm
    ///
    /// a missing file is just "no alarms yet", and anything else wrong with
    /// the file is logged and treated the same way, a broken file must never
    /// take the app down
    #[must_use]
    pub fn load(&self) -> Vec<Alarm> {
        match self.try_load() {
            Ok(alarms) => alarms,
            Err(err) => {
                log::error!("{err}");
                Vec::new()
            }
        }
    }

    /// save the whole collection, replacing whatever was there before
    ///
    /// failures are logged and dropped, memory stays the source of truth and
    /// the next save simply tries again
    pub fn save(&self, alarms: &[Alarm]) {
        if let Err(err) = self.try_save(alarms) {
            log::error!("{err}");
        }
    }

    pub fn try_load(&self) -> Result<Vec<Alarm>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn try_save(&self, alarms: &[Alarm]) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string(alarms).map_err(|source| StoreError::Encode { source })?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, contents).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
