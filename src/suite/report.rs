//! Check outcomes and the run summary.

use std::collections::HashMap;

use log::{error, info};

use crate::error_handling::CheckError;
use crate::suite::cases::Scenario;

/// Result of one check case.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub scenario: Scenario,
    pub name: String,
    pub result: Result<(), CheckError>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Results of a check run.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub outcomes: Vec<CheckOutcome>,
    pub elapsed_seconds: f64,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// `(passed, failed)` per scenario.
    pub fn scenario_counts(&self) -> HashMap<Scenario, (usize, usize)> {
        let mut counts: HashMap<Scenario, (usize, usize)> = HashMap::new();
        for outcome in &self.outcomes {
            let entry = counts.entry(outcome.scenario).or_default();
            if outcome.passed() {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
        counts
    }
}

/// Logs every failure in full followed by per-scenario and overall counts.
pub fn print_report(report: &SuiteReport) {
    for outcome in report.failures() {
        if let Err(e) = &outcome.result {
            error!("FAILED {} ({})\n{}", outcome.name, e.kind(), e);
        }
    }

    let counts = report.scenario_counts();
    info!("Check statistics by scenario:");
    for scenario in Scenario::all() {
        if let Some((passed, failed)) = counts.get(&scenario) {
            info!("   {}: {} passed, {} failed", scenario, passed, failed);
        }
    }

    info!(
        "Ran {} check{} ({} passed, {} failed) in {:.1}s",
        report.total(),
        if report.total() == 1 { "" } else { "s" },
        report.passed(),
        report.failed(),
        report.elapsed_seconds
    );
}
