use crate::commands::{CheckpadPaths, CmdMessage, CmdResult};
use crate::config::CheckpadConfig;
use crate::error::Result;
use crate::model::Scope;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &CheckpadPaths, scope: Scope, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    let mut config = CheckpadConfig::load(&dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            match config.get(&key) {
                Some(val) if val.is_empty() => result.add_message(CmdMessage::info("(unset)")),
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(&dir)?;
            let shown = config
                .get(&key)
                .filter(|val| !val.is_empty())
                .unwrap_or_else(|| "(unset)".to_string());
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result.with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    fn paths(root: &std::path::Path) -> CheckpadPaths {
        CheckpadPaths {
            project: Some(root.join(".checkpad")),
            global: root.join("global"),
        }
    }

    #[test]
    fn test_set_then_show() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());

        let result = run(
            &paths,
            Scope::Project,
            ConfigAction::Set("server-url".into(), "http://localhost:3000/".into()),
        )
        .unwrap();
        assert_eq!(
            result.messages[0].content,
            "server-url set to http://localhost:3000"
        );

        let result = run(
            &paths,
            Scope::Project,
            ConfigAction::ShowKey("server_url".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "http://localhost:3000");
    }

    #[test]
    fn test_scopes_are_separate() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());
        run(
            &paths,
            Scope::Global,
            ConfigAction::Set("docs-dir".into(), "notes".into()),
        )
        .unwrap();

        let project = run(&paths, Scope::Project, ConfigAction::ShowAll).unwrap();
        assert_eq!(project.config.unwrap().docs_dir, "markdown-files");
        let global = run(&paths, Scope::Global, ConfigAction::ShowAll).unwrap();
        assert_eq!(global.config.unwrap().docs_dir, "notes");
    }

    #[test]
    fn test_invalid_value_is_reported_not_saved() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());
        let result = run(
            &paths,
            Scope::Project,
            ConfigAction::Set("export-name".into(), "a|b".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join(".checkpad").join("config.json").exists());
    }

    #[test]
    fn test_unknown_key() {
        let dir = tempdir().unwrap();
        let result = run(
            &paths(dir.path()),
            Scope::Project,
            ConfigAction::ShowKey("colour".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "Unknown config key: colour");
    }
}
