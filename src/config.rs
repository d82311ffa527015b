use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::entities::view::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "leaderboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("leaderboard.sqlite"))
}

pub fn default_data_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("leaderboard.json"))
}

pub fn default_quiz_bank_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("questions.json"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset file loaded at startup. Defaults to `leaderboard.json` in the data dir.
    pub data_path: Option<PathBuf>,
    /// Quiz question bank. Defaults to `questions.json` in the data dir.
    pub quiz_bank_path: Option<PathBuf>,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            quiz_bank_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("invalid config file")?;
        Ok(config.sanitized())
    }

    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::parse(&text)
    }

    /// Loads the user's config file, falling back to defaults when it is unusable.
    pub fn load_default() -> Self {
        let loaded = default_config_path().and_then(|path| Self::load(&path));
        match loaded {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "using default configuration");
                Self::default()
            }
        }
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_path {
            Some(path) => Ok(path.clone()),
            None => default_data_path(),
        }
    }

    pub fn quiz_bank_path(&self) -> Result<PathBuf> {
        match &self.quiz_bank_path {
            Some(path) => Ok(path.clone()),
            None => default_quiz_bank_path(),
        }
    }

    fn sanitized(mut self) -> Self {
        self.page_size_options.retain(|size| *size > 0);
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        if self.page_size_options.is_empty() {
            self.page_size_options = PAGE_SIZE_OPTIONS.to_vec();
        }
        if self.page_size == 0 {
            warn!("page_size must be greater than zero, using {DEFAULT_PAGE_SIZE}");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if !self.page_size_options.contains(&self.page_size) {
            self.page_size_options.push(self.page_size);
            self.page_size_options.sort_unstable();
        }
        self
    }
}
