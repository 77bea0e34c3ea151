use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
pub const API_URL_ENV: &str = "USERDESK_API_URL";
const APP_DIR: &str = "userdesk";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/userdesk/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the file at `path`; a missing file yields `None`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Layer the sources: flag over environment over file over defaults.
    pub fn resolve(
        file: Option<Config>,
        env_url: Option<String>,
        flag_url: Option<String>,
    ) -> Self {
        let mut config = file.unwrap_or_default();
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(url) = flag_url {
            config.api_url = url;
        }
        config
    }

    /// Read the config file (explicit path or the default location) and
    /// apply the environment and command-line overrides.
    pub fn load(
        path: Option<&Path>,
        flag_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match path.map(Path::to_path_buf).or_else(Self::default_path)
        {
            Some(path) => Self::load_from(&path)?,
            None => None,
        };
        let env_url = std::env::var(API_URL_ENV).ok();
        Ok(Self::resolve(file, env_url, flag_url))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_is_flag_then_env_then_file() {
        let file = Config {
            api_url: "http://file".into(),
            request_timeout_secs: 5,
        };

        let resolved = Config::resolve(Some(file.clone()), None, None);
        assert_eq!(resolved, file);

        let resolved =
            Config::resolve(Some(file.clone()), Some("http://env".into()), None);
        assert_eq!(resolved.api_url, "http://env");
        assert_eq!(resolved.request_timeout_secs, 5);

        let resolved = Config::resolve(
            Some(file),
            Some("http://env".into()),
            Some("http://flag".into()),
        );
        assert_eq!(resolved.api_url, "http://flag");
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let resolved = Config::resolve(None, Some("  ".into()), None);
        assert_eq!(resolved.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn full_file_loads_and_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(Config::load_from(&path).unwrap().is_none());

        std::fs::write(
            &path,
            r#"{"api_url":"http://localhost:4000","request_timeout_secs":12}"#,
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config,
            Some(Config {
                api_url: "http://localhost:4000".into(),
                request_timeout_secs: 12,
            })
        );
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_url":"http://x"}"#).unwrap();
        let config = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
