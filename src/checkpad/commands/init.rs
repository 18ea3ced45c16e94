use crate::commands::{CheckpadPaths, CmdMessage, CmdResult};
use crate::config::CheckpadConfig;
use crate::error::Result;
use crate::model::Scope;
use std::fs;

/// Creates the scope directory, its config, and the documents directory.
/// An existing config is left as is.
pub fn run(paths: &CheckpadPaths, scope: Scope) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    fs::create_dir_all(&dir)?;

    let config = CheckpadConfig::load(&dir)?;
    config.save(&dir)?;

    let mut result = CmdResult::default();
    if config.server_url.is_none() {
        let docs = config.docs_path(&paths.docs_root(scope)?);
        fs::create_dir_all(&docs)?;
        result.add_message(CmdMessage::info(format!(
            "Documents directory: {}",
            docs.display()
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Initialized checkpad at {}",
        dir.display()
    )));
    Ok(result.with_config(config))
}
