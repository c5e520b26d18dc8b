use crate::error::{Result, SnipzError};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Primary API base variable.
pub const API_BASE_VAR: &str = "SNIPZ_API_BASE";
/// Consulted only when [`API_BASE_VAR`] is unset or blank.
pub const BACKEND_URL_VAR: &str = "SNIPZ_BACKEND_URL";
/// Overrides the local data directory.
pub const HOME_VAR: &str = "SNIPZ_HOME";

/// Which backend the process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    Local { data_dir: PathBuf },
    Remote { base_url: String },
}

/// Configuration resolved once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnipzConfig {
    pub backend: BackendChoice,
}

impl SnipzConfig {
    /// Reads the process environment (after any `.env` file has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = [API_BASE_VAR, BACKEND_URL_VAR]
            .iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        let backend = match api_base {
            Some(base_url) => BackendChoice::Remote { base_url },
            None => BackendChoice::Local {
                data_dir: local_data_dir(&lookup)?,
            },
        };

        Ok(Self { backend })
    }
}

fn local_data_dir<F>(lookup: &F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(home) = lookup(HOME_VAR).filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(home.trim()));
    }

    ProjectDirs::from("com", "snipz", "snipz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            SnipzError::Config(format!(
                "Could not determine a data directory. Set ${}.",
                HOME_VAR
            ))
        })
}
