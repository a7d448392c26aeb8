//! Dataset opening, compound listing and lookup.

use std::path::Path;

use pd_compounds::{Compound, CompoundRecord, Dataset, normalize};
use tracing::info;

use crate::error::AppResult;

/// Summary of a compound for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSummary {
    pub name: String,
    pub formula: String,
    pub cas: String,
}

/// Open a CSV dataset, or the built-in one when no path is given.
pub fn open_dataset(path: Option<&Path>) -> AppResult<Dataset> {
    let dataset = match path {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::builtin()?,
    };
    info!(compounds = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// List compounds, optionally filtered by a case-insensitive substring.
pub fn list_compounds(dataset: &Dataset, filter: Option<&str>) -> Vec<CompoundSummary> {
    let records: Vec<&CompoundRecord> = match filter {
        Some(query) => dataset.search(query),
        None => dataset.records().iter().collect(),
    };

    records
        .into_iter()
        .map(|record| CompoundSummary {
            name: record.name.clone(),
            formula: record.formula.clone(),
            cas: record.cas.clone(),
        })
        .collect()
}

/// Resolve an identifier and normalize the record.
pub fn get_compound(dataset: &Dataset, identifier: &str) -> AppResult<Compound> {
    Ok(normalize(dataset.resolve(identifier)?)?)
}

/// Load and normalize a single compound from a YAML file.
pub fn load_compound_file(path: &Path) -> AppResult<Compound> {
    let record = CompoundRecord::from_yaml_path(path)?;
    Ok(normalize(&record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use pd_compounds::CompoundError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builtin_dataset_lists_everything() {
        let dataset = open_dataset(None).unwrap();
        let all = list_compounds(&dataset, None);
        assert_eq!(all.len(), dataset.len());
        assert!(all.iter().any(|c| c.name == "water"));
    }

    #[test]
    fn filter_narrows_listing() {
        let dataset = open_dataset(None).unwrap();
        let hits = list_compounds(&dataset, Some("CO2"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "carbon dioxide");
    }

    #[test]
    fn lookup_normalizes() {
        let dataset = open_dataset(None).unwrap();
        let water = get_compound(&dataset, "7732-18-5").unwrap();
        assert_eq!(water.name, "water");
        assert!(matches!(
            get_compound(&dataset, "Water"),
            Err(AppError::Compound(CompoundError::NotFound { .. }))
        ));
    }

    #[test]
    fn compound_file_is_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(
            &path,
            r#"
name: custom
formula: Cu
cas: "1-23-4"
triple_temperature_k: 150.0
triple_pressure_kpa: 2.0
critical_temperature_k: 300.0
enthalpy_sublimation_kj_mol: 20.0
"#,
        )
        .unwrap();

        let compound = load_compound_file(&path).unwrap();
        assert_eq!(compound.triple.pressure_pa, 2000.0);
        assert!(compound.antoine.is_none());
    }

    #[test]
    fn compound_file_without_triple_point_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "name: bad\nformula: B\ncas: \"0\"\n").unwrap();
        assert!(matches!(
            load_compound_file(&path),
            Err(AppError::Compound(CompoundError::InvalidRecord { .. }))
        ));
    }
}
