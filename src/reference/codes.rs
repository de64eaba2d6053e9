use anyhow::bail;
use std::collections::BTreeMap;

use crate::dataset::Dataset;

/// Role code naming the government as a whole; excluded from government arms
pub const GOVERNMENT_ROLE: &str = "GOV";

/// Mapping from a short code to its human-readable label, sorted by code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeTable {
    entries: BTreeMap<String, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(code.into(), label.into());
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build from two columns of a loaded table
    ///
    /// Codes stay strings so leading zeros (CAMEO `010`) survive. Rows with a
    /// blank code are skipped; a later duplicate code replaces an earlier one.
    pub fn from_dataset(dataset: &Dataset, code_field: &str, label_field: &str) -> crate::Result<Self> {
        let fields = dataset.get_field_names();
        for required in [code_field, label_field] {
            if !fields.iter().any(|f| f == required) {
                bail!("table '{}' has no column '{}'", dataset.name, required);
            }
        }

        let mut table = Self::new();
        for point in &dataset.data {
            let code = point.get_field(code_field).map(|c| c.trim()).unwrap_or("");
            if code.is_empty() {
                continue;
            }
            let label = point.get_field(label_field).map(|l| l.trim()).unwrap_or("");
            table.insert(code, label);
        }
        Ok(table)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, label) in iter {
            table.insert(code, label);
        }
        table
    }
}

/// Government arms: every role but `GOV`, keyed `GOV<role>`
pub fn gov_arm_codes(roles: &CodeTable) -> CodeTable {
    roles
        .iter()
        .filter(|(code, _)| *code != GOVERNMENT_ROLE)
        .map(|(code, label)| {
            (
                format!("{}{}", GOVERNMENT_ROLE, code),
                format!("GOVERNMENT {}", label),
            )
        })
        .collect()
}

/// Cross product of countries with another table
///
/// Key `<country code><code>`, label `<COUNTRY NAME> <label>`.
pub fn cross_codes(countries: &CodeTable, other: &CodeTable) -> CodeTable {
    let mut table = CodeTable::new();
    for (country_code, country) in countries.iter() {
        let country = country.to_uppercase();
        for (code, label) in other.iter() {
            table.insert(
                format!("{}{}", country_code, code),
                format!("{} {}", country, label),
            );
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> CodeTable {
        [("GOV", "GOVERNMENT"), ("MIL", "MILITARY"), ("JUD", "JUDICIARY")]
            .into_iter()
            .collect()
    }

    fn countries() -> CodeTable {
        [("USA", "United States"), ("FRA", "France")].into_iter().collect()
    }

    #[test]
    fn test_from_dataset() {
        let tsv = "ROLECODE\tROLE\nMIL\tMILITARY\n\tBLANK\nCOP\tPOLICE FORCES";
        let dataset = Dataset::from_tsv("role_codes".to_string(), tsv).unwrap();
        let table = CodeTable::from_dataset(&dataset, "ROLECODE", "ROLE").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("MIL"), Some("MILITARY"));
        assert_eq!(table.get("COP"), Some("POLICE FORCES"));
        assert_eq!(table.get(""), None);
    }

    #[test]
    fn test_from_dataset_missing_column() {
        let dataset = Dataset::from_tsv("role_codes".to_string(), "CODE\tROLE\nMIL\tX").unwrap();
        let err = CodeTable::from_dataset(&dataset, "ROLECODE", "ROLE").unwrap_err();
        assert!(err.to_string().contains("ROLECODE"));
    }

    #[test]
    fn test_gov_arm_codes() {
        let arms = gov_arm_codes(&roles());
        assert_eq!(arms.len(), 2);
        assert_eq!(arms.get("GOVMIL"), Some("GOVERNMENT MILITARY"));
        assert_eq!(arms.get("GOVJUD"), Some("GOVERNMENT JUDICIARY"));
        assert_eq!(arms.get("GOVGOV"), None);
    }

    #[test]
    fn test_cross_codes() {
        let table = cross_codes(&countries(), &roles());
        assert_eq!(table.len(), 6);
        assert_eq!(table.get("USAMIL"), Some("UNITED STATES MILITARY"));
        assert_eq!(table.get("FRAGOV"), Some("FRANCE GOVERNMENT"));
    }

    #[test]
    fn test_cross_codes_with_gov_arms() {
        let table = cross_codes(&countries(), &gov_arm_codes(&roles()));
        assert_eq!(table.get("USAGOVJUD"), Some("UNITED STATES GOVERNMENT JUDICIARY"));
    }

    #[test]
    fn test_cross_with_empty_table() {
        assert!(cross_codes(&countries(), &CodeTable::new()).is_empty());
    }
}
