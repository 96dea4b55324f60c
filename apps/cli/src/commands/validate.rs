//! Validate command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ferrum_r5::ResourceRegistry;
use ferrum_validator::{Preset, ValidationMode, ValidationOutcome, Validator, ValidatorConfig};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    FailFast,
    Collect,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FailFast => ValidationMode::FailFast,
            ModeArg::Collect => ValidationMode::Collect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Ingestion,
    Authoring,
}

impl From<PresetArg> for Preset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Ingestion => Preset::Ingestion,
            PresetArg::Authoring => Preset::Authoring,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One OperationOutcome per file
    Json,
}

/// Validate FHIR resources against their structural constraints
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// JSON resource files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// YAML validator configuration; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start from a named configuration
    #[arg(long, value_enum, conflicts_with = "config")]
    pub preset: Option<PresetArg>,

    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Stop collecting after this many issues
    #[arg(long)]
    pub max_issues: Option<usize>,

    /// Also validate contained resources and bundle payloads
    #[arg(long)]
    pub resolve_embedded: bool,

    /// Validate every file as this resource type instead of its own resourceType
    #[arg(long = "as", value_name = "TYPE")]
    pub model: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ValidateCommand {
    /// Returns whether every file is valid.
    pub fn execute(&self) -> Result<bool> {
        let config = self.build_config()?;
        let validator = Validator::from_config(&config).context("invalid validator configuration")?;
        let registry = ResourceRegistry::r5();

        if let Some(model) = &self.model {
            anyhow::ensure!(registry.contains(model), "unknown resource type '{model}'");
        }

        let mut all_valid = true;
        let mut reports = Vec::with_capacity(self.files.len());

        for path in &self.files {
            let document = read_document(path)?;
            let outcome = self.validate_document(&registry, &validator, &document);
            tracing::debug!(
                file = %path.display(),
                valid = outcome.valid,
                issues = outcome.issues.len(),
                "validated file"
            );
            all_valid &= outcome.valid;

            match self.format {
                OutputFormat::Text => print!("{}", render_text(path, &outcome)),
                OutputFormat::Json => reports.push(render_json(path, &outcome)),
            }
        }

        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&Value::Array(reports))?);
        }

        Ok(all_valid)
    }

    fn build_config(&self) -> Result<ValidatorConfig> {
        let mut config = match (&self.config, self.preset) {
            (Some(path), _) => {
                let yaml = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                ValidatorConfig::from_yaml(&yaml)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            (None, Some(preset)) => ValidatorConfig::preset(preset.into()),
            (None, None) => ValidatorConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(max_issues) = self.max_issues {
            config.max_issues = max_issues;
        }
        if self.resolve_embedded {
            config.resolve_embedded = true;
        }
        Ok(config)
    }

    fn validate_document(
        &self,
        registry: &ResourceRegistry,
        validator: &Validator,
        document: &Value,
    ) -> ValidationOutcome {
        match &self.model {
            Some(model) => registry.validate_as(model, document, validator),
            None => registry.validate(document, validator),
        }
    }
}

fn read_document(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn render_text(path: &Path, outcome: &ValidationOutcome) -> String {
    let mut out = if outcome.issues.is_empty() {
        format!("{}: ok\n", path.display())
    } else {
        format!(
            "{}: {} error(s), {} warning(s)\n",
            path.display(),
            outcome.error_count(),
            outcome.warning_count()
        )
    };

    for issue in &outcome.issues {
        out.push_str(&format!(
            "  {} [{}] {}: {}\n",
            issue.severity.to_string().to_lowercase(),
            issue.code,
            issue.location.as_deref().unwrap_or("-"),
            issue.diagnostics,
        ));
    }
    out
}

fn render_json(path: &Path, outcome: &ValidationOutcome) -> Value {
    json!({
        "file": path.display().to_string(),
        "resourceType": outcome.resource_type,
        "valid": outcome.valid,
        "outcome": outcome.to_operation_outcome(),
    })
}
