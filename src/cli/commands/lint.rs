//! Lint command implementation.
//!
//! The `ensure-params lint` command compiles every named requirement set in
//! the configuration and reports the ones that are malformed.

use std::path::{Path, PathBuf};

use crate::cli::args::LintArgs;
use crate::config::{load_config, ConfigPaths};
use crate::error::{ParamsError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The lint command implementation.
pub struct LintCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(project_root: &Path, args: LintArgs) -> Self {
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

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LintArgs {
        &self.args
    }
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.config_override.is_none()
            && !ConfigPaths::discover(&self.project_root).has_project_config()
        {
            ui.error("No configuration found. Create .ensure-params.yml first.");
            return Ok(CommandResult::failure(2));
        }

        let config = match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(c) => c,
            Err(ParamsError::ConfigParseError { path, message }) => {
                ui.error(&format!("Parse error in {}: {}", path.display(), message));
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let mut errors = 0;
        let mut warnings = 0;
        for (name, compiled) in config.compile_all() {
            match compiled {
                Ok(spec) if spec.is_empty() => {
                    warnings += 1;
                    ui.warning(&format!("{}: requires nothing", name));
                }
                Ok(spec) => ui.detail(&format!("{}: {}", name, spec)),
                Err(e) => {
                    errors += 1;
                    ui.error(&format!("{}: {}", name, e));
                }
            }
        }
        tracing::debug!(errors, warnings, "Linted requirement sets");

        if errors > 0 || (self.args.strict && warnings > 0) {
            return Ok(CommandResult::failure(1));
        }

        if config.requirements.is_empty() {
            ui.warning("No requirement sets defined");
        } else {
            ui.success("Requirement sets are valid!");
        }
        Ok(CommandResult::success())
    }
}
