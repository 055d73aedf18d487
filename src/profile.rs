//! Player settings remembered between runs
use crate::consts;
use crate::name_entry::is_valid_name;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Profile {
    /// The name most recently used to post a high score
    #[serde(default)]
    pub(crate) player_name: String,

    #[serde(default)]
    pub(crate) sound: bool,
}

impl Profile {
    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    /// Load a profile from `path`.  If the file does not exist, `Ok(None)` is
    /// returned.  A stored player name that isn't a valid name is discarded.
    pub(crate) fn load(path: &Path) -> Result<Option<Profile>, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read(e)),
        };
        let mut profile = serde_json::from_slice::<Profile>(&src).map_err(LoadError::deserialize)?;
        if !is_valid_name(&profile.player_name) {
            profile.player_name.clear();
        }
        debug_assert!(profile.player_name.len() <= consts::MAX_NAME_LEN);
        Ok(Some(profile))
    }
}

#[derive(Debug, Error)]
#[error("Failed to save player profile to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize profile")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write profile to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read player profile from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read profile file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize profile")]
    Deserialize(#[source] serde_json::Error),
}
