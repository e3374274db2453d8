use crate::error::SetupError;
use crate::options::{verbose, Overrides};
use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://golang.org/dl/";
pub const DEFAULT_PLATFORM: &str = "linux-amd64";
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
/// Top-level directory of every Go release archive.
pub const GO_ROOT_DIR: &str = "go";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Substring match; the last matching link on the page wins, so
    /// "1.15" may select "1.15.2".
    #[default]
    LastMatch,
    /// The normalized version must equal the request.
    Exact,
}

/// Everything one run needs to know. Built once in `main` and handed down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub platform: String,
    /// Path the listing page puts in front of archive names, e.g. "/dl/".
    pub link_prefix: String,
    /// File name prefix in front of the version, e.g. "go".
    pub archive_prefix: String,
    pub download_dir: PathBuf,
    pub install_root: PathBuf,
    pub gopath: PathBuf,
    pub profile: PathBuf,
    pub chunk_size: usize,
    pub match_policy: MatchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let home = home_dir();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            link_prefix: "/dl/".to_string(),
            archive_prefix: "go".to_string(),
            download_dir: PathBuf::from("/tmp/"),
            install_root: PathBuf::from("/usr/local"),
            gopath: home.join("go"),
            profile: home.join(".profile"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            match_policy: MatchPolicy::default(),
        }
    }
}

impl Config {
    pub fn archive_suffix(&self) -> String {
        format!(".{}.tar.gz", self.platform)
    }

    pub fn install_dir(&self) -> PathBuf {
        self.install_root.join(GO_ROOT_DIR)
    }

    pub fn go_bin_dir(&self) -> PathBuf {
        self.install_dir().join("bin")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(ref base_url) = overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(ref platform) = overrides.platform {
            self.platform = platform.clone();
        }
        if let Some(ref dir) = overrides.download_dir {
            self.download_dir = dir.clone();
        }
        if let Some(ref root) = overrides.install_root {
            self.install_root = root.clone();
        }
        if let Some(ref gopath) = overrides.gopath {
            self.gopath = gopath.clone();
        }
        if let Some(ref profile) = overrides.profile {
            self.profile = profile.clone();
        }
        if let Some(chunk_size) = overrides.chunk_size {
            self.chunk_size = chunk_size;
        }
        if overrides.exact {
            self.match_policy = MatchPolicy::Exact;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SetupError::Precondition("chunk size must be greater than zero".into()).into());
        }
        if self.platform.is_empty() {
            return Err(SetupError::Precondition("platform must not be empty".into()).into());
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "go-setup", "go-setup")
        .map(|dirs| dirs.config_dir().join("config.json"))
}

/// Defaults, then the config file, then flags and environment.
pub fn load_config(overrides: &Overrides) -> Result<Config> {
    let mut config = match overrides.config {
        Some(ref path) => Config::from_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => {
                verbose::log(format!("Loading config from {}", path.display()));
                Config::from_file(&path)?
            }
            _ => Config::default(),
        },
    };

    config.apply(overrides);
    config.validate()?;

    verbose::log(format!("Effective config: {:?}", config));
    Ok(config)
}

fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_target_linux_amd64() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://golang.org/dl/");
        assert_eq!(config.archive_suffix(), ".linux-amd64.tar.gz");
        assert_eq!(config.install_dir(), PathBuf::from("/usr/local/go"));
        assert_eq!(config.go_bin_dir(), PathBuf::from("/usr/local/go/bin"));
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.match_policy, MatchPolicy::LastMatch);
    }

    #[test]
    fn file_values_fill_in_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "platform": "linux-arm64", "match_policy": "exact", "chunk_size": 4096 }"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.platform, "linux-arm64");
        assert_eq!(config.match_policy, MatchPolicy::Exact);
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn overrides_win_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "base_url": "https://mirror.example/dl/" }"#).unwrap();

        let overrides = Overrides {
            config: Some(path),
            base_url: Some("http://localhost:1234/dl/".to_string()),
            install_root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let config = load_config(&overrides).unwrap();
        assert_eq!(config.base_url, "http://localhost:1234/dl/");
        assert_eq!(config.install_dir(), dir.path().join("go"));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempdir().unwrap();
        let overrides = Overrides {
            config: Some(dir.path().join("missing.json")),
            ..Default::default()
        };
        assert!(load_config(&overrides).is_err());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        let overrides = Overrides {
            config: Some(path),
            chunk_size: Some(0),
            ..Default::default()
        };
        let err = load_config(&overrides).unwrap_err();
        assert!(err.to_string().contains("chunk size"));
    }
}
