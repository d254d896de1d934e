use std::cell::RefCell;

use super::{filter_units, CallLog, SourceUnits, UnitSearch, UnitSink, UnitSource};
use crate::unit::{SearchCriteria, Unit, UnitCriteria};

/// Types returned by [`MockImportConduit::search_all_units`]
pub const PACKAGE_TYPE_IDS: [&str; 2] = ["rpm", "srpm"];

/// Unit import conduit copying between a source and a destination
/// repository.
#[derive(Debug, Default)]
pub struct MockImportConduit {
    source_units: Vec<Unit>,
    existing_units: Vec<Unit>,
    saved: RefCell<Vec<Unit>>,
    calls: CallLog,
}

impl MockImportConduit {
    pub fn new(source_units: Vec<Unit>) -> Self {
        Self {
            source_units,
            ..Self::default()
        }
    }

    pub fn with_existing_units(mut self, units: Vec<Unit>) -> Self {
        self.existing_units = units;
        self
    }

    pub fn saved_units(&self) -> Vec<Unit> {
        self.saved.borrow().clone()
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

impl SourceUnits for MockImportConduit {
    fn get_source_units(&self, criteria: Option<&UnitCriteria>) -> Vec<Unit> {
        self.calls.record("get_source_units");
        filter_units(&self.source_units, criteria)
    }
}

impl UnitSource for MockImportConduit {
    fn get_units(&self, criteria: Option<&UnitCriteria>) -> Vec<Unit> {
        self.calls.record("get_units");
        filter_units(&self.existing_units, criteria)
    }
}

impl UnitSearch for MockImportConduit {
    /// Every existing package unit, whatever the arguments
    fn search_all_units(
        &self,
        _type_id: &str,
        _criteria: &SearchCriteria,
    ) -> Vec<Unit> {
        self.calls.record("search_all_units");
        self.existing_units
            .iter()
            .filter(|u| PACKAGE_TYPE_IDS.contains(&u.type_id.as_str()))
            .cloned()
            .collect()
    }
}

impl UnitSink for MockImportConduit {
    fn save_unit(&self, unit: Unit) {
        self.calls.record("save_unit");
        self.saved.borrow_mut().push(unit);
    }
}
