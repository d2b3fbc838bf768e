//! Statistics methods for ModuleGraph.

use super::graph::ModuleGraph;
use crate::statistics::AnalysisReport;

impl ModuleGraph {
    /// Compute the core report, then run every registered collector over it.
    pub fn analyse(&self) -> AnalysisReport {
        let mut report = AnalysisReport::default();
        for module in &self.modules {
            if module.defined() {
                report.defined_modules.push(module.name.clone());
            } else {
                report.orphan_modules.push(module.name.clone());
            }
            report.number_of_exports += module.export_targets.len();
        }

        for collector in &self.collectors {
            collector.collect(self, &mut report);
        }
        report
    }
}
