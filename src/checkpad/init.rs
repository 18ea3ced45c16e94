use crate::api::{CheckpadApi, CheckpadPaths};
use crate::config::CheckpadConfig;
use crate::error::{CheckpadError, Result};
use crate::model::Scope;
use crate::source::fs::DirSource;
use crate::source::http::HttpSource;
use crate::source::DocumentSource;
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

pub const PROJECT_DIR_NAME: &str = ".checkpad";

pub struct CheckpadContext {
    pub api: CheckpadApi<Box<dyn DocumentSource>>,
    pub scope: Scope,
    pub config: CheckpadConfig,
}

/// Walks up from `cwd` to the nearest directory holding a `.checkpad`.
/// Stops at the home directory or the filesystem root.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(PROJECT_DIR_NAME).is_dir() {
            return Some(current);
        }
        if home_dir.as_deref() == Some(current.as_path()) {
            return None;
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return None,
        }
    }
}

/// The configured source: the server when `server-url` is set, the documents
/// directory otherwise.
pub fn open_source(
    config: &CheckpadConfig,
    paths: &CheckpadPaths,
    scope: Scope,
) -> Result<Box<dyn DocumentSource>> {
    match &config.server_url {
        Some(url) => {
            log::debug!("reading documents from {}", url);
            Ok(Box::new(HttpSource::new(url)?))
        }
        None => {
            let dir = config.docs_path(&paths.docs_root(scope)?);
            log::debug!("reading documents from {}", dir.display());
            Ok(Box::new(DirSource::new(dir)))
        }
    }
}

pub fn initialize(cwd: &Path, use_global: bool) -> Result<CheckpadContext> {
    let project_dir = find_project_root(cwd)
        .unwrap_or_else(|| cwd.to_path_buf())
        .join(PROJECT_DIR_NAME);

    let proj_dirs = ProjectDirs::from("com", "checkpad", "checkpad")
        .ok_or_else(|| CheckpadError::Api("Could not determine data directory".to_string()))?;
    let paths = CheckpadPaths {
        project: Some(project_dir),
        global: proj_dirs.data_dir().to_path_buf(),
    };

    let scope = if use_global {
        Scope::Global
    } else {
        Scope::Project
    };

    let config = match CheckpadConfig::load(paths.scope_dir(scope)?) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring unreadable config: {}", e);
            CheckpadConfig::default()
        }
    };
    let source = open_source(&config, &paths, scope)?;

    Ok(CheckpadContext {
        api: CheckpadApi::new(source, paths),
        scope,
        config,
    })
}
