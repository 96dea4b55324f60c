//! Validator configuration
//!
//! Configs can be built in code, from a preset, or loaded from YAML:
//!
//! ```yaml
//! preset: Authoring
//! mode: Collect
//! max_issues: 250
//! resolve_embedded: true
//! ```

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How a walk reacts to a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Stop at the first violation in declaration order.
    #[default]
    FailFast,
    /// Keep walking and collect every violation, up to `max_issues`.
    Collect,
}

/// Named starting points for a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    /// Reject non-conforming input as cheaply as possible.
    Ingestion,
    /// Report everything, including problems inside embedded resources.
    Authoring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    pub mode: ValidationMode,
    pub max_issues: usize,
    /// Resolve `contained` and bundle entry payloads through a resource
    /// registry and validate them as well.
    pub resolve_embedded: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            preset: None,
            mode: ValidationMode::FailFast,
            max_issues: 1000,
            resolve_embedded: false,
        }
    }
}

impl ValidatorConfig {
    pub fn preset(preset: Preset) -> Self {
        let mut config = Self {
            preset: Some(preset),
            ..Self::default()
        };
        config.apply_preset(preset);
        config
    }

    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }

    /// Parses YAML. A `preset` key sets the baseline; explicit keys override it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let mut config: Self = serde_yaml::from_value(raw.clone())?;

        if let Some(preset) = config.preset {
            let mut base = Self::preset(preset);
            if let serde_yaml::Value::Mapping(map) = &raw {
                if map.contains_key("mode") {
                    base.mode = config.mode;
                }
                if map.contains_key("max_issues") {
                    base.max_issues = config.max_issues;
                }
                if map.contains_key("resolve_embedded") {
                    base.resolve_embedded = config.resolve_embedded;
                }
            }
            config = base;
        }

        config.check()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        if self.max_issues == 0 {
            return Err(ConfigError::ZeroMaxIssues);
        }
        Ok(())
    }

    fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Ingestion => {
                self.mode = ValidationMode::FailFast;
                self.resolve_embedded = false;
            }
            Preset::Authoring => {
                self.mode = ValidationMode::Collect;
                self.resolve_embedded = true;
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidatorConfigBuilder {
    config: ValidatorConfig,
}

impl ValidatorConfigBuilder {
    pub fn preset(mut self, preset: Preset) -> Self {
        self.config.preset = Some(preset);
        self.config.apply_preset(preset);
        self
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn max_issues(mut self, max_issues: usize) -> Self {
        self.config.max_issues = max_issues;
        self
    }

    pub fn resolve_embedded(mut self, resolve: bool) -> Self {
        self.config.resolve_embedded = resolve;
        self
    }

    pub fn build(self) -> ValidatorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fail_fast() {
        let config = ValidatorConfig::default();
        assert_eq!(config.mode, ValidationMode::FailFast);
        assert!(!config.resolve_embedded);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_authoring_preset() {
        let config = ValidatorConfig::preset(Preset::Authoring);
        assert_eq!(config.mode, ValidationMode::Collect);
        assert!(config.resolve_embedded);
    }

    #[test]
    fn test_builder_overrides_preset() {
        let config = ValidatorConfig::builder()
            .preset(Preset::Authoring)
            .resolve_embedded(false)
            .max_issues(10)
            .build();
        assert_eq!(config.mode, ValidationMode::Collect);
        assert!(!config.resolve_embedded);
        assert_eq!(config.max_issues, 10);
    }

    #[test]
    fn test_yaml_with_preset_and_override() {
        let yaml = r#"
preset: Authoring
max_issues: 25
resolve_embedded: false
"#;
        let config = ValidatorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.mode, ValidationMode::Collect);
        assert_eq!(config.max_issues, 25);
        assert!(!config.resolve_embedded);
    }

    #[test]
    fn test_yaml_without_preset_uses_defaults() {
        let config = ValidatorConfig::from_yaml("mode: Collect").unwrap();
        assert_eq!(config.mode, ValidationMode::Collect);
        assert_eq!(config.max_issues, 1000);
    }

    #[test]
    fn test_zero_max_issues_rejected() {
        let err = ValidatorConfig::from_yaml("max_issues: 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMaxIssues));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(matches!(
            ValidatorConfig::from_yaml("mode: Sometimes"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
