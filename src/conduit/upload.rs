use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{
    echo_report, storage_path, CallLog, ReportBuilder, UnitFactory, UnitSink,
    UnitSource,
};
use crate::unit::{Report, Unit, UnitCriteria, UnitKey, UnitMetadata};
use crate::Result;

/// Upload conduit for a single uploaded unit type.
///
/// Reports no existing units and never touches the filesystem.
#[derive(Debug, Default)]
pub struct MockUploadConduit {
    type_id: Option<String>,
    pkg_dir: Option<PathBuf>,
    saved: RefCell<Vec<Unit>>,
    reports: RefCell<Vec<Report>>,
    calls: CallLog,
}

impl MockUploadConduit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_id(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    pub fn with_pkg_dir(mut self, pkg_dir: impl Into<PathBuf>) -> Self {
        self.pkg_dir = Some(pkg_dir.into());
        self
    }

    pub fn type_id(&self) -> Option<&str> {
        self.type_id.as_deref()
    }

    pub fn saved_units(&self) -> Vec<Unit> {
        self.saved.borrow().clone()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    fn report(&self, success: bool, summary: Value, details: Value) -> Report {
        let report = echo_report(success, summary, details);
        self.reports.borrow_mut().push(report.clone());
        report
    }
}

impl UnitFactory for MockUploadConduit {
    fn init_unit(
        &self,
        type_id: &str,
        unit_key: UnitKey,
        metadata: UnitMetadata,
        rel_path: Option<&Path>,
    ) -> Result<Unit> {
        self.calls.record("init_unit");
        let path = storage_path(self.pkg_dir.as_deref(), rel_path);
        Ok(Unit::new(type_id, unit_key, metadata, path))
    }
}

impl UnitSource for MockUploadConduit {
    fn get_units(&self, _criteria: Option<&UnitCriteria>) -> Vec<Unit> {
        self.calls.record("get_units");
        Vec::new()
    }
}

impl UnitSink for MockUploadConduit {
    fn save_unit(&self, unit: Unit) {
        self.calls.record("save_unit");
        self.saved.borrow_mut().push(unit);
    }
}

impl ReportBuilder for MockUploadConduit {
    fn build_success_report(&self, summary: Value, details: Value) -> Report {
        self.calls.record("build_success_report");
        self.report(true, summary, details)
    }

    fn build_failure_report(&self, summary: Value, details: Value) -> Report {
        self.calls.record("build_failure_report");
        self.report(false, summary, details)
    }
}
