use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::{
    filter_units, storage_path, CallLog, UnitFactory, UnitSearch, UnitSink,
    UnitSource,
};
use crate::unit::{SearchCriteria, Unit, UnitCriteria, UnitKey, UnitMetadata};
use crate::Result;

/// Repository sync conduit over a pre-seeded unit list.
#[derive(Debug, Default)]
pub struct MockSyncConduit {
    existing_units: Vec<Unit>,
    pkg_dir: Option<PathBuf>,
    saved: RefCell<Vec<Unit>>,
    calls: CallLog,
}

impl MockSyncConduit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing_units(mut self, units: Vec<Unit>) -> Self {
        self.existing_units = units;
        self
    }

    /// Directory unit storage paths are resolved against
    pub fn with_pkg_dir(mut self, pkg_dir: impl Into<PathBuf>) -> Self {
        self.pkg_dir = Some(pkg_dir.into());
        self
    }

    pub fn saved_units(&self) -> Vec<Unit> {
        self.saved.borrow().clone()
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

impl UnitFactory for MockSyncConduit {
    /// Creates the enclosing directory of the joined path if it is
    /// missing; creation errors are returned as is.
    fn init_unit(
        &self,
        type_id: &str,
        unit_key: UnitKey,
        metadata: UnitMetadata,
        rel_path: Option<&Path>,
    ) -> Result<Unit> {
        self.calls.record("init_unit");

        let path = storage_path(self.pkg_dir.as_deref(), rel_path);
        if let (Some(path), Some(_)) = (&path, &self.pkg_dir) {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    log::debug!("creating {}", parent.display());
                    fs::create_dir_all(parent)?;
                }
            }
        }

        Ok(Unit::new(type_id, unit_key, metadata, path))
    }
}

impl UnitSource for MockSyncConduit {
    fn get_units(&self, criteria: Option<&UnitCriteria>) -> Vec<Unit> {
        self.calls.record("get_units");
        filter_units(&self.existing_units, criteria)
    }
}

impl UnitSearch for MockSyncConduit {
    fn search_all_units(
        &self,
        type_id: &str,
        criteria: &SearchCriteria,
    ) -> Vec<Unit> {
        self.calls.record("search_all_units");
        let wanted = criteria.id_filter();
        self.existing_units
            .iter()
            .filter(|u| u.type_id == type_id && wanted.is_some() && u.id() == wanted)
            .cloned()
            .collect()
    }
}

impl UnitSink for MockSyncConduit {
    fn save_unit(&self, unit: Unit) {
        self.calls.record("save_unit");
        self.saved.borrow_mut().push(unit);
    }
}
