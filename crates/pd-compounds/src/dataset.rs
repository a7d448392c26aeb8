//! Read-only compound dataset and identifier lookup.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{CompoundError, CompoundResult};
use crate::record::CompoundRecord;

const BUILTIN_CSV: &str = include_str!("../data/compounds.csv");

/// An immutable set of compound records.
///
/// Constructed explicitly and handed to whoever needs lookups; there is no
/// process-wide dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CompoundRecord>,
}

impl Dataset {
    /// The dataset bundled with the crate.
    pub fn builtin() -> CompoundResult<Self> {
        Self::read_csv(BUILTIN_CSV.as_bytes(), "<builtin>")
    }

    /// Load a CSV dataset from disk.
    pub fn from_path(path: &Path) -> CompoundResult<Self> {
        let origin = path.to_string_lossy().to_string();
        let file = std::fs::File::open(path).map_err(|e| CompoundError::Io {
            path: origin.clone(),
            source: e,
        })?;
        Self::read_csv(file, &origin)
    }

    /// Load a CSV dataset from any reader.
    pub fn from_reader<R: io::Read>(reader: R) -> CompoundResult<Self> {
        Self::read_csv(reader, "<reader>")
    }

    pub fn from_records(records: Vec<CompoundRecord>) -> Self {
        Self { records }
    }

    fn read_csv<R: io::Read>(reader: R, origin: &str) -> CompoundResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in reader.deserialize::<CompoundRecord>() {
            let record = result.map_err(|e| CompoundError::Csv {
                origin: origin.to_string(),
                source: e,
            })?;
            records.push(record);
        }

        debug!(origin, count = records.len(), "loaded compound dataset");
        Ok(Self { records })
    }

    /// Resolve an identifier to the first record whose name, formula, or CAS
    /// number equals it exactly.
    pub fn resolve(&self, identifier: &str) -> CompoundResult<&CompoundRecord> {
        self.records
            .iter()
            .find(|record| record.matches_identifier(identifier))
            .ok_or_else(|| CompoundError::NotFound {
                identifier: identifier.to_string(),
            })
    }

    /// Browse records by case-insensitive substring. Not used by [`Self::resolve`].
    pub fn search(&self, query: &str) -> Vec<&CompoundRecord> {
        self.records
            .iter()
            .filter(|record| record.matches_query(query))
            .collect()
    }

    pub fn records(&self) -> &[CompoundRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const FIXTURE: &str = "\
name,formula,cas,triple_temperature_k,triple_pressure_kpa,critical_temperature_k
alpha,A2,1-1-1,100,1.0,200
beta,B2,2-2-2,150,2.0,300
beta,B2,9-9-9,160,3.0,310
";

    #[test]
    fn builtin_dataset_loads() {
        let dataset = Dataset::builtin().unwrap();
        assert!(!dataset.is_empty());
        assert!(dataset.resolve("water").is_ok());
    }

    #[test]
    fn builtin_identifiers_are_unique() {
        let dataset = Dataset::builtin().unwrap();
        let mut seen = HashSet::new();
        for record in dataset.records() {
            for id in [&record.name, &record.formula, &record.cas] {
                assert!(seen.insert(id.clone()), "duplicate identifier: {id}");
            }
        }
    }

    #[test]
    fn resolve_by_each_identification_field() {
        let dataset = Dataset::from_reader(FIXTURE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.resolve("alpha").unwrap().cas, "1-1-1");
        assert_eq!(dataset.resolve("A2").unwrap().name, "alpha");
        assert_eq!(dataset.resolve("1-1-1").unwrap().formula, "A2");
    }

    #[test]
    fn resolve_returns_first_match() {
        let dataset = Dataset::from_reader(FIXTURE.as_bytes()).unwrap();
        assert_eq!(dataset.resolve("beta").unwrap().cas, "2-2-2");
        assert_eq!(dataset.resolve("9-9-9").unwrap().triple_temperature_k, Some(160.0));
    }

    #[test]
    fn resolve_never_falls_back_to_partial_match() {
        let dataset = Dataset::from_reader(FIXTURE.as_bytes()).unwrap();
        for id in ["alph", "ALPHA", "a2", "1-1", "", "gamma"] {
            assert!(
                matches!(dataset.resolve(id), Err(CompoundError::NotFound { .. })),
                "unexpected match for {id:?}"
            );
        }
    }

    #[test]
    fn search_is_loose() {
        let dataset = Dataset::from_reader(FIXTURE.as_bytes()).unwrap();
        assert_eq!(dataset.search("BET").len(), 2);
        assert_eq!(dataset.search("").len(), 3);
        assert!(dataset.search("zzz").is_empty());
    }

    #[test]
    fn malformed_csv_is_rejected() {
        let bad = "name,formula,cas,triple_temperature_k\nalpha,A2,1-1-1,not-a-number\n";
        let result = Dataset::from_reader(bad.as_bytes());
        assert!(matches!(result, Err(CompoundError::Csv { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dataset::from_path(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(CompoundError::Io { .. })));
    }
}
