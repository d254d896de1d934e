//! The host conduit contract an importer plugin talks to, and in-memory
//! mocks of each conduit.
//!
//! Mocks keep their state behind `RefCell` so that plugin code can hold
//! them by shared reference, the way it holds the real conduits.

mod dependency;
mod import;
mod sync;
mod upload;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::unit::{Report, SearchCriteria, Unit, UnitCriteria, UnitKey, UnitMetadata};
use crate::Result;

pub use dependency::MockDependencyConduit;
pub use import::{MockImportConduit, PACKAGE_TYPE_IDS};
pub use sync::MockSyncConduit;
pub use upload::MockUploadConduit;

pub trait UnitFactory {
    /// Build a unit, resolving `rel_path` against the conduit's
    /// storage location.
    fn init_unit(
        &self,
        type_id: &str,
        unit_key: UnitKey,
        metadata: UnitMetadata,
        rel_path: Option<&Path>,
    ) -> Result<Unit>;
}

pub trait UnitSource {
    /// Units associated with the repository, all of them when
    /// `criteria` is `None`.
    fn get_units(&self, criteria: Option<&UnitCriteria>) -> Vec<Unit>;
}

pub trait SourceUnits {
    /// Units of the repository being imported from.
    fn get_source_units(&self, criteria: Option<&UnitCriteria>) -> Vec<Unit>;
}

pub trait UnitSearch {
    fn search_all_units(
        &self,
        type_id: &str,
        criteria: &SearchCriteria,
    ) -> Vec<Unit>;
}

pub trait UnitSink {
    fn save_unit(&self, unit: Unit);

    fn save_units(&self, units: Vec<Unit>) {
        for unit in units {
            self.save_unit(unit);
        }
    }
}

pub trait ReportBuilder {
    fn build_success_report(&self, summary: Value, details: Value) -> Report;

    fn build_failure_report(&self, summary: Value, details: Value) -> Report;
}

/// Ordered record of the conduit methods invoked on a mock.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: RefCell<Vec<&'static str>>,
}

impl CallLog {
    pub fn record(&self, method: &'static str) {
        log::trace!("conduit call: {}", method);
        self.calls.borrow_mut().push(method);
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|m| **m == method)
            .count()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }
}

fn filter_units(units: &[Unit], criteria: Option<&UnitCriteria>) -> Vec<Unit> {
    units
        .iter()
        .filter(|u| criteria.map_or(true, |c| c.matches(u)))
        .cloned()
        .collect()
}

/// `rel_path` joined under `pkg_dir` when both are present
fn storage_path(
    pkg_dir: Option<&Path>,
    rel_path: Option<&Path>,
) -> Option<PathBuf> {
    match (pkg_dir, rel_path) {
        (Some(dir), Some(rel)) => Some(dir.join(rel)),
        (None, rel) => rel.map(Path::to_path_buf),
        (Some(_), None) => None,
    }
}

fn echo_report(success: bool, summary: Value, details: Value) -> Report {
    Report {
        success,
        summary,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_log_counts_by_method() {
        let log = CallLog::default();
        assert!(log.is_empty());
        log.record("get_units");
        log.record("save_unit");
        log.record("get_units");

        assert_eq!(log.count("get_units"), 2);
        assert_eq!(log.count("init_unit"), 0);
        assert_eq!(log.calls(), vec!["get_units", "save_unit", "get_units"]);
    }

    #[test]
    fn storage_path_joins_under_pkg_dir() {
        let dir = Path::new("/var/lib/packages");
        let rel = Path::new("a/b.rpm");
        assert_eq!(
            storage_path(Some(dir), Some(rel)),
            Some(PathBuf::from("/var/lib/packages/a/b.rpm"))
        );
        assert_eq!(storage_path(None, Some(rel)), Some(rel.to_path_buf()));
        assert_eq!(storage_path(Some(dir), None), None);
    }

    #[test]
    fn filter_without_criteria_returns_all() {
        let units = vec![Unit::with_id("rpm", "a"), Unit::with_id("erratum", "b")];
        assert_eq!(filter_units(&units, None), units);
    }
}
