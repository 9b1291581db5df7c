use mtdgraph::{DEFAULT_LOCALE, types::RepositoryCategory};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Folder under the git root holding the platform's own metadata.
pub const PLATFORM_FOLDER: &str = "_platform";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no git root configured")]
    MissingGitRoot,
}

///
/// Config
///
/// Contents of `mtdgraph.toml`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub git_root: Option<PathBuf>,

    /// Locale of resource files without a culture suffix.
    pub default_locale: String,

    /// Locales reported as display-name columns.
    pub locales: Vec<String>,

    /// Walked after the repositories, as [`RepositoryCategory::Platform`].
    pub platform_folder: Option<String>,

    pub repositories: Vec<Repository>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_root: None,
            default_locale: DEFAULT_LOCALE.to_string(),
            locales: vec![DEFAULT_LOCALE.to_string()],
            platform_folder: Some(PLATFORM_FOLDER.to_string()),
            repositories: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Roots to walk, in order: repositories as listed, then the platform
    /// folder.
    pub fn roots(&self) -> Result<Vec<(PathBuf, RepositoryCategory)>, ConfigError> {
        let git_root = self.git_root.as_ref().ok_or(ConfigError::MissingGitRoot)?;

        let mut roots: Vec<_> = self
            .repositories
            .iter()
            .map(|repo| (git_root.join(&repo.folder), repo.category))
            .collect();

        if let Some(platform) = &self.platform_folder {
            roots.push((git_root.join(platform), RepositoryCategory::Platform));
        }

        Ok(roots)
    }
}

///
/// Repository
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Repository {
    pub folder: String,

    #[serde(default)]
    pub category: RepositoryCategory,
}
