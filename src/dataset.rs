use anyhow::{bail, Context};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Represents a single record with named fields
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub fields: HashMap<String, String>,
}

impl DataPoint {
    /// Create a new data point
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field to the data point
    pub fn add_field(&mut self, key: String, value: String) {
        self.fields.insert(key, value);
    }

    /// Get a field value
    pub fn get_field(&self, key: &str) -> Option<&String> {
        self.fields.get(key)
    }

    /// Parse a numeric field value
    pub fn get_numeric(&self, key: &str) -> Option<f64> {
        self.get_field(key)?.trim().parse().ok()
    }
}

impl Default for DataPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// A named table of records loaded from a delimited file
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub data: Vec<DataPoint>,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new(name: String) -> Self {
        Self {
            name,
            data: Vec::new(),
        }
    }

    /// Add a data point to the dataset
    pub fn add_point(&mut self, point: DataPoint) {
        self.data.push(point);
    }

    /// Get the number of data points
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get all unique field names across all data points
    pub fn get_field_names(&self) -> Vec<String> {
        let mut fields = HashSet::new();
        for point in &self.data {
            for key in point.fields.keys() {
                fields.insert(key.clone());
            }
        }
        let mut result: Vec<String> = fields.into_iter().collect();
        result.sort();
        result
    }

    /// Numeric values of a field, in record order
    ///
    /// Blank and non-numeric cells are skipped.
    pub fn numeric_column(&self, field: &str) -> Vec<f64> {
        let values: Vec<f64> = self
            .data
            .iter()
            .filter_map(|point| point.get_numeric(field))
            .filter(|v| v.is_finite())
            .collect();

        let skipped = self.len() - values.len();
        if skipped > 0 {
            debug!(field, skipped, "skipped missing or non-numeric cells");
        }
        values
    }

    /// Load dataset from delimited text with a header row
    pub fn from_delimited(name: String, data: &str, delimiter: u8) -> crate::Result<Self> {
        let mut dataset = Dataset::new(name);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(data.as_bytes());

        let headers = reader.headers()?.clone();

        for result in reader.records() {
            let record = result?;
            let mut point = DataPoint::new();

            for (i, field) in record.iter().enumerate() {
                if let Some(header) = headers.get(i) {
                    point.add_field(header.to_string(), field.to_string());
                }
            }
            dataset.add_point(point);
        }

        Ok(dataset)
    }

    /// Load dataset from CSV
    pub fn from_csv(name: String, csv_data: &str) -> crate::Result<Self> {
        Self::from_delimited(name, csv_data, b',')
    }

    /// Load dataset from TSV
    pub fn from_tsv(name: String, tsv_data: &str) -> crate::Result<Self> {
        Self::from_delimited(name, tsv_data, b'\t')
    }

    /// Load a `.csv` or `.tsv` file, named after its file stem
    pub fn load(path: &Path) -> crate::Result<Self> {
        let delimiter = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_uppercase())
            .as_deref()
        {
            Some("CSV") => b',',
            Some("TSV") => b'\t',
            _ => bail!(
                "unsupported file extension for {} (expected .csv or .tsv)",
                path.display()
            ),
        };

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("dataset")
            .to_string();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let dataset = Self::from_delimited(name, &content, delimiter)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        info!(path = %path.display(), records = dataset.len(), "loaded dataset");
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_data_point_creation() {
        let mut point = DataPoint::new();
        point.add_field("name".to_string(), "test".to_string());
        point.add_field("value".to_string(), " 42 ".to_string());

        assert_eq!(point.get_field("name"), Some(&"test".to_string()));
        assert_eq!(point.get_numeric("value"), Some(42.0));
        assert_eq!(point.get_numeric("name"), None);
    }

    #[test]
    fn test_dataset_creation() {
        let mut dataset = Dataset::new("test".to_string());
        let mut point = DataPoint::new();
        point.add_field("id".to_string(), "1".to_string());

        dataset.add_point(point);
        assert_eq!(dataset.len(), 1);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_csv_loading() {
        let csv_data = "SOURCEURL,NUMARTICLES\nHTTP://A.COM/X,3\nHTTP://B.COM/Y,10";
        let dataset = Dataset::from_csv("events".to_string(), csv_data).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.data[0].get_field("SOURCEURL"),
            Some(&"HTTP://A.COM/X".to_string())
        );
        assert_eq!(dataset.data[1].get_numeric("NUMARTICLES"), Some(10.0));
    }

    #[test]
    fn test_tsv_keeps_leading_zeros() {
        let tsv_data = "CAMEOEVENTCODE\tEVENTDESCRIPTION\n010\tMake statement\n0211\tAppeal for material cooperation";
        let dataset = Dataset::from_tsv("event_codes".to_string(), tsv_data).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.data[0].get_field("CAMEOEVENTCODE"),
            Some(&"010".to_string())
        );
    }

    #[test]
    fn test_numeric_column_skips_blanks() {
        let csv_data = "GOLDSTEIN\n1.5\n\nabc\n-2\n";
        let dataset = Dataset::from_csv("g".to_string(), csv_data).unwrap();
        assert_eq!(dataset.numeric_column("GOLDSTEIN"), vec![1.5, -2.0]);
        assert!(dataset.numeric_column("MISSING").is_empty());
    }

    #[test]
    fn test_get_field_names() {
        let csv_data = "b,a,c\n1,2,3";
        let dataset = Dataset::from_csv("test".to_string(), csv_data).unwrap();
        assert_eq!(dataset.get_field_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tones.TSV");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "AVGTONE\n-1.5\n2.0").unwrap();

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.name, "tones");
        assert_eq!(dataset.numeric_column("AVGTONE"), vec![-1.5, 2.0]);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tones.json");
        fs::write(&path, "[]").unwrap();

        let err = Dataset::load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/tones.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
