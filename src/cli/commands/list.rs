//! List command implementation.
//!
//! The `ensure-params list` command shows each configured requirement set
//! and the key paths it requires.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ListArgs,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ListedSet {
    Paths(Vec<String>),
    Invalid { error: String },
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: None,
            args,
        }
    }

    /// Load configuration from this file instead of discovering it.
    pub fn with_config(mut self, config: Option<&Path>) -> Self {
        self.config_override = config.map(Path::to_path_buf);
        self
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_override.as_deref())?;

        let listed: BTreeMap<&str, ListedSet> = config
            .compile_all()
            .into_iter()
            .map(|(name, compiled)| {
                let entry = match compiled {
                    Ok(spec) => ListedSet::Paths(
                        spec.paths().iter().map(|p| p.join(" => ")).collect(),
                    ),
                    Err(e) => ListedSet::Invalid {
                        error: e.to_string(),
                    },
                };
                (name, entry)
            })
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&listed).map_err(anyhow::Error::from)?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        if listed.is_empty() {
            ui.message("No requirement sets defined.");
        }
        for (name, entry) in &listed {
            ui.message(name);
            match entry {
                ListedSet::Paths(paths) => {
                    for path in paths {
                        ui.message(&format!("  {}", path));
                    }
                }
                ListedSet::Invalid { error } => ui.warning(&format!("  {}", error)),
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROJECT_CONFIG;
    use crate::error::ParamsError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
requirements:
  crazy_town:
    - book
    - pet:
        owner:
          contact_info: phone
  broken:
    pet: 1
"#;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), config).unwrap();
        temp
    }

    #[test]
    fn lists_sets_and_paths() {
        let temp = setup_project(CONFIG);
        let cmd = ListCommand::new(temp.path(), ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(
            ui.messages(),
            &[
                "broken",
                "crazy_town",
                "  book",
                "  pet => owner => contact_info => phone"
            ]
        );
        assert!(ui.has_warning("Invalid requirement spec"));
    }

    #[test]
    fn lists_as_json() {
        let temp = setup_project(CONFIG);
        let cmd = ListCommand::new(temp.path(), ListArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.data_lines()[0]).unwrap();
        assert_eq!(
            parsed["crazy_town"],
            serde_json::json!(["book", "pet => owner => contact_info => phone"])
        );
        assert!(parsed["broken"]["error"].is_string());
    }

    #[test]
    fn empty_config_lists_nothing() {
        let temp = setup_project("");
        let cmd = ListCommand::new(temp.path(), ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_message("No requirement sets defined"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(temp.path(), ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui);
        assert!(matches!(result, Err(ParamsError::ConfigNotFound { .. })));
    }
}
