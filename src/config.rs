use crate::util::data_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings for talking to the high-score server
    #[serde(default)]
    pub(crate) server: ServerConfig,

    /// Gameplay defaults
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakolek").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which the player profile should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// profile path.  Returns `None` if saving the profile is disabled or no
    /// path could be determined.
    pub(crate) fn profile_file(&self) -> Option<PathBuf> {
        if !self.files.save_profile {
            return None;
        }
        self.files
            .profile_file
            .clone()
            .or_else(|| data_dir().map(|p| p.join("profile.json")))
    }

    /// Return the filepath to which logs should be written
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.files
            .log_file
            .clone()
            .or_else(|| data_dir().map(|p| p.join("snakolek.log")))
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct ServerConfig {
    /// Base URL of the high-score server
    pub(crate) url: String,

    /// Maximum number of seconds to wait for a response
    pub(crate) timeout: u64,
}

impl ServerConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            url: String::from("http://snakolek.ironsys.pl"),
            timeout: 10,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// Whether sound starts out enabled when there's no saved profile
    pub(crate) sound: bool,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the player profile should be stored
    profile_file: Option<PathBuf>,

    /// Whether to load & save the player profile
    save_profile: bool,

    /// Path to which logs are appended
    log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            profile_file: None,
            save_profile: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
