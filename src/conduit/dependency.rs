use std::cell::RefCell;

use serde_json::Value;

use super::{echo_report, filter_units, CallLog, ReportBuilder, UnitSource};
use crate::unit::{Report, Unit, UnitCriteria};

/// Dependency resolution conduit over a pre-seeded unit list.
#[derive(Debug, Default)]
pub struct MockDependencyConduit {
    existing_units: Vec<Unit>,
    reports: RefCell<Vec<Report>>,
    calls: CallLog,
}

impl MockDependencyConduit {
    pub fn new(existing_units: Vec<Unit>) -> Self {
        Self {
            existing_units,
            ..Self::default()
        }
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

impl UnitSource for MockDependencyConduit {
    fn get_units(&self, criteria: Option<&UnitCriteria>) -> Vec<Unit> {
        self.calls.record("get_units");
        filter_units(&self.existing_units, criteria)
    }
}

impl ReportBuilder for MockDependencyConduit {
    fn build_success_report(&self, summary: Value, details: Value) -> Report {
        self.calls.record("build_success_report");
        let report = echo_report(true, summary, details);
        self.reports.borrow_mut().push(report.clone());
        report
    }

    fn build_failure_report(&self, summary: Value, details: Value) -> Report {
        self.calls.record("build_failure_report");
        let report = echo_report(false, summary, details);
        self.reports.borrow_mut().push(report.clone());
        report
    }
}
