//! Evaluation settings loaded from TOML
//!
//! ```toml
//! [defaults]
//! method = "auto"
//!
//! [columns.NUMARTICLES]
//! lower_limit = 0
//!
//! [columns.AVGTONE]
//! method = "z-score"
//! threshold = 2.5
//! ```

use anyhow::Context;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::insight_core::EvaluationOptions;

/// Default options plus per-column overrides
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    #[serde(deserialize_with = "deserialize_defaults")]
    pub defaults: EvaluationOptions,
    pub columns: BTreeMap<String, ColumnOverrides>,
}

/// Fields set here replace the defaults for one column, or the built-in
/// defaults when read from `[defaults]`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnOverrides {
    pub method: Option<crate::insight_core::MethodChoice>,
    pub threshold: Option<f64>,
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
    pub strict_transforms: Option<bool>,
}

impl EvaluationConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content).context("invalid evaluation config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Options for a column: defaults with that column's overrides applied
    pub fn options_for(&self, column: &str) -> EvaluationOptions {
        let mut options = self.defaults;
        if let Some(overrides) = self.columns.get(column) {
            overrides.apply(&mut options);
        }
        options
    }

    fn validate(&self) -> crate::Result<()> {
        self.defaults
            .range
            .validate()
            .context("invalid [defaults]")?;
        for column in self.columns.keys() {
            self.options_for(column)
                .range
                .validate()
                .with_context(|| format!("invalid [columns.{}]", column))?;
        }
        Ok(())
    }
}

/// `[defaults]` goes through `ColumnOverrides` so unknown keys are rejected
/// there as well
fn deserialize_defaults<'de, D>(deserializer: D) -> Result<EvaluationOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = ColumnOverrides::deserialize(deserializer)?;
    let mut options = EvaluationOptions::default();
    overrides.apply(&mut options);
    Ok(options)
}

impl ColumnOverrides {
    pub fn apply(&self, options: &mut EvaluationOptions) {
        if let Some(method) = self.method {
            options.range.method = method;
        }
        if let Some(threshold) = self.threshold {
            options.range.threshold = Some(threshold);
        }
        if let Some(lower) = self.lower_limit {
            options.range.lower_limit = Some(lower);
        }
        if let Some(upper) = self.upper_limit {
            options.range.upper_limit = Some(upper);
        }
        if let Some(strict) = self.strict_transforms {
            options.strict_transforms = strict;
        }
    }
}
