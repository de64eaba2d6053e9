//! Reference code tables for CAMEO events, actors and geography
//!
//! Tables are read once from a directory of delimited files and then shared
//! read-only for the rest of the process.

pub mod codes;
pub mod domains;

use anyhow::Context;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

use crate::dataset::Dataset;

pub use codes::{cross_codes, gov_arm_codes, CodeTable};

/// Source file and its (code, label) columns
pub const EVENT_CODES: (&str, &str, &str) = ("event_codes.tsv", "CAMEOEVENTCODE", "EVENTDESCRIPTION");
pub const GEO_TYPE_CODES: (&str, &str, &str) = ("geo_type_codes.tsv", "GEOTYPECODE", "DESCRIPTION");
pub const COUNTRY_CODES: (&str, &str, &str) = ("un_country_codes.tsv", "ISOCODE", "COUNTRY");
pub const ROLE_CODES: (&str, &str, &str) = ("role_codes.tsv", "ROLECODE", "ROLE");

static REFERENCE_TABLES: OnceLock<ReferenceTables> = OnceLock::new();

/// Every code table used to label event records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTables {
    pub events: CodeTable,
    pub geo_types: CodeTable,
    pub countries: CodeTable,
    pub roles: CodeTable,
    pub gov_arms: CodeTable,
    pub country_roles: CodeTable,
    pub country_gov_arms: CodeTable,
}

impl ReferenceTables {
    /// Derive the cross-joined tables from the four source tables
    pub fn build(events: CodeTable, geo_types: CodeTable, countries: CodeTable, roles: CodeTable) -> Self {
        let gov_arms = gov_arm_codes(&roles);
        let country_roles = cross_codes(&countries, &roles);
        let country_gov_arms = cross_codes(&countries, &gov_arms);

        Self {
            events,
            geo_types,
            countries,
            roles,
            gov_arms,
            country_roles,
            country_gov_arms,
        }
    }

    /// Load the four source tables from `dir`
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let tables = Self::build(
            load_table(dir, EVENT_CODES)?,
            load_table(dir, GEO_TYPE_CODES)?,
            load_table(dir, COUNTRY_CODES)?,
            load_table(dir, ROLE_CODES)?,
        );
        info!(
            dir = %dir.display(),
            events = tables.events.len(),
            countries = tables.countries.len(),
            country_roles = tables.country_roles.len(),
            "loaded reference tables"
        );
        Ok(tables)
    }

    /// Named tables in lookup order
    pub fn tables(&self) -> [(&'static str, &CodeTable); 7] {
        [
            ("event", &self.events),
            ("geo type", &self.geo_types),
            ("country", &self.countries),
            ("role", &self.roles),
            ("government arm", &self.gov_arms),
            ("country role", &self.country_roles),
            ("country government arm", &self.country_gov_arms),
        ]
    }

    /// Find a code in any table, returning the table name and label
    pub fn describe(&self, code: &str) -> Option<(&'static str, &str)> {
        self.tables()
            .into_iter()
            .find_map(|(name, table)| table.get(code).map(|label| (name, label)))
    }
}

fn load_table(dir: &Path, (file, code_field, label_field): (&str, &str, &str)) -> crate::Result<CodeTable> {
    let path = dir.join(file);
    let dataset = Dataset::load(&path)?;
    CodeTable::from_dataset(&dataset, code_field, label_field)
        .with_context(|| format!("failed to build code table from {}", path.display()))
}

/// Load the process-wide tables from `dir` on first call
///
/// Later calls return the tables already loaded and ignore `dir`.
pub fn init_reference_tables(dir: &Path) -> crate::Result<&'static ReferenceTables> {
    if let Some(tables) = REFERENCE_TABLES.get() {
        return Ok(tables);
    }
    let tables = ReferenceTables::load(dir)?;
    Ok(REFERENCE_TABLES.get_or_init(|| tables))
}

/// Process-wide tables, if [`init_reference_tables`] has succeeded
pub fn reference_tables() -> Option<&'static ReferenceTables> {
    REFERENCE_TABLES.get()
}
