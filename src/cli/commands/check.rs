//! Check command implementation.
//!
//! The `ensure-params check` command loads a parameter payload and runs it
//! through one or more requirement sets, stopping at the first missing key.
//!
//! Exit codes: 0 when every requirement is met, 1 when a parameter is
//! missing, 2 when the input or a requirement spec is unusable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::config::{load_config_or_default, OutputFormat, ParamsConfig};
use crate::error::{ParamsError, Result};
use crate::params::{load_params_file, parse_payload, ParameterTree, PayloadFormat};
use crate::requirements::{EnsureError, MissingPath, RequirementSpec};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Exit code for a missing parameter.
const EXIT_MISSING: i32 = 1;

/// Exit code for unusable input or specs.
const EXIT_INVALID: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

/// A requirement set with the label it is reported under.
struct LabeledSpec {
    label: String,
    spec: RequirementSpec,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    requirement_set: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<&'a MissingPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CheckReport<'_> {
    fn passed() -> Self {
        Self {
            ok: true,
            requirement_set: None,
            missing: None,
            message: None,
            error: None,
        }
    }

    fn invalid(error: String) -> Self {
        Self {
            ok: false,
            error: Some(error),
            ..Self::passed()
        }
    }
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
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

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn output_format(&self, config: &ParamsConfig) -> Result<OutputFormat> {
        match &self.args.format {
            Some(raw) => raw
                .parse()
                .map_err(|e: String| ParamsError::Other(anyhow::anyhow!(e))),
            None => Ok(config.settings.default_format),
        }
    }

    fn load_tree(&self, config: &ParamsConfig) -> Result<ParameterTree> {
        let max_depth = config.settings.max_depth;
        match (&self.args.params, &self.args.query) {
            (Some(path), _) => load_params_file(path, max_depth),
            (None, Some(query)) => parse_payload(query, PayloadFormat::Query, "--query", max_depth),
            (None, None) => Err(ParamsError::ParamsParseError {
                source_name: "command line".to_string(),
                message: "pass --params or --query".to_string(),
            }),
        }
    }

    /// Collect requirement sets in chain order: named, files, inline.
    fn collect_specs(&self, config: &ParamsConfig) -> Result<Vec<LabeledSpec>> {
        let max_depth = config.settings.max_depth;
        let mut specs = Vec::new();

        for name in &self.args.require {
            specs.push(LabeledSpec {
                label: name.clone(),
                spec: config.requirement_set(name)?,
            });
        }

        for path in &self.args.spec {
            let content = fs::read_to_string(path)?;
            specs.push(LabeledSpec {
                label: path.display().to_string(),
                spec: RequirementSpec::from_yaml_str_with_limit(&content, max_depth)?,
            });
        }

        for literal in &self.args.inline {
            specs.push(LabeledSpec {
                label: "inline".to_string(),
                spec: RequirementSpec::from_yaml_str_with_limit(literal, max_depth)?,
            });
        }

        Ok(specs)
    }

    fn report(
        &self,
        ui: &mut dyn UserInterface,
        format: OutputFormat,
        report: &CheckReport<'_>,
    ) -> Result<()> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string(report).map_err(anyhow::Error::from)?;
                ui.data(&json);
            }
            OutputFormat::Human => {
                if report.ok {
                    ui.success("All required parameters present");
                } else if let Some(message) = report.message.as_ref().or(report.error.as_ref()) {
                    ui.error(message);
                    if let Some(set) = report.requirement_set {
                        ui.detail(&format!("requirement set: {}", set));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config_or_default(&self.project_root, self.config_override.as_deref())?;
        let format = self.output_format(&config)?;

        let tree = match self.load_tree(&config) {
            Ok(tree) => tree,
            Err(e) => {
                self.report(ui, format, &CheckReport::invalid(e.to_string()))?;
                return Ok(CommandResult::failure(EXIT_INVALID));
            }
        };

        let specs = match self.collect_specs(&config) {
            Ok(specs) if specs.is_empty() => {
                self.report(
                    ui,
                    format,
                    &CheckReport::invalid(
                        "No requirements given; use --require, --spec or --inline".to_string(),
                    ),
                )?;
                return Ok(CommandResult::failure(EXIT_INVALID));
            }
            Ok(specs) => specs,
            Err(e) => {
                self.report(ui, format, &CheckReport::invalid(e.to_string()))?;
                return Ok(CommandResult::failure(EXIT_INVALID));
            }
        };

        let checker = config.checker();
        let outcome = specs.iter().try_fold(&tree, |tree, labeled| {
            tracing::debug!("Checking requirement set {}", labeled.label);
            ui.detail(&format!("{}: {}", labeled.label, labeled.spec));
            checker
                .ensure(tree, &labeled.spec)
                .map_err(|e| (labeled.label.as_str(), e))
        });

        match outcome {
            Ok(_) => {
                self.report(ui, format, &CheckReport::passed())?;
                Ok(CommandResult::success())
            }
            Err((label, EnsureError::Missing(path))) => {
                tracing::debug!("Requirement set {} failed at {}", label, path.joined());
                let report = CheckReport {
                    ok: false,
                    requirement_set: Some(label),
                    missing: Some(&path),
                    message: Some(path.to_string()),
                    error: None,
                };
                self.report(ui, format, &report)?;
                Ok(CommandResult::failure(EXIT_MISSING))
            }
            Err((label, defect)) => {
                let report = CheckReport {
                    requirement_set: Some(label),
                    ..CheckReport::invalid(defect.to_string())
                };
                self.report(ui, format, &report)?;
                Ok(CommandResult::failure(EXIT_INVALID))
            }
        }
    }
}
