use anyhow::{anyhow, bail};
use std::collections::HashMap;
use tracing::warn;

use crate::config::EvaluationConfig;
use crate::dataset::Dataset;
use crate::insight_core::{evaluate, EvaluationReport};
use crate::utils::AnalysisError;

/// Holds loaded datasets and evaluates their numeric columns
#[derive(Debug, Default)]
pub struct InsightEngine {
    datasets: HashMap<String, Dataset>,
    config: EvaluationConfig,
}

/// Outcome of evaluating one column of a dataset
#[derive(Debug, Clone)]
pub struct ColumnEvaluation {
    pub field: String,
    pub result: Result<EvaluationReport, AnalysisError>,
}

impl InsightEngine {
    /// Create an engine with default evaluation options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with per-column evaluation options
    pub fn with_config(config: EvaluationConfig) -> Self {
        Self {
            datasets: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Add a dataset to the engine
    pub fn add_dataset(&mut self, dataset: Dataset) {
        self.datasets.insert(dataset.name.clone(), dataset);
    }

    /// Get a dataset by name
    pub fn get_dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    /// Remove a dataset from the engine
    pub fn remove_dataset(&mut self, name: &str) -> Option<Dataset> {
        self.datasets.remove(name)
    }

    /// Get all dataset names
    pub fn list_datasets(&self) -> Vec<String> {
        let mut names: Vec<String> = self.datasets.keys().cloned().collect();
        names.sort();
        names
    }

    /// Evaluate one numeric column with its configured options
    pub fn evaluate_column(&self, dataset_name: &str, field: &str) -> crate::Result<EvaluationReport> {
        let dataset = self
            .get_dataset(dataset_name)
            .ok_or_else(|| anyhow!("unknown dataset '{}'", dataset_name))?;
        if !dataset.get_field_names().iter().any(|f| f == field) {
            bail!("dataset '{}' has no column '{}'", dataset_name, field);
        }

        let sample = dataset.numeric_column(field);
        let report = evaluate(&sample, &self.config.options_for(field))?;
        Ok(report)
    }

    /// Evaluate every column holding at least one numeric value, by name
    ///
    /// A failing column is reported in its entry and does not stop the others.
    pub fn evaluate_all(&self, dataset_name: &str) -> crate::Result<Vec<ColumnEvaluation>> {
        let dataset = self
            .get_dataset(dataset_name)
            .ok_or_else(|| anyhow!("unknown dataset '{}'", dataset_name))?;

        let evaluations = dataset
            .get_field_names()
            .into_iter()
            .filter_map(|field| {
                let sample = dataset.numeric_column(&field);
                if sample.is_empty() {
                    return None;
                }
                let result = evaluate(&sample, &self.config.options_for(&field));
                if let Err(err) = &result {
                    warn!(dataset = dataset_name, %field, error = %err, "column evaluation failed");
                }
                Some(ColumnEvaluation { field, result })
            })
            .collect();

        Ok(evaluations)
    }
}
