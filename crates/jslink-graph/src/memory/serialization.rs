//! Serialization methods for ModuleGraph.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use super::graph::ModuleGraph;

/// Helper to escape labels for DOT format.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl ModuleGraph {
    /// Render the graph as a `digraph`.
    ///
    /// Every module with dependants contributes one `"module"->"dependant";`
    /// line per dependant. Modules nobody depends on get a bare `"module";`
    /// line. Modules appear in insertion order.
    pub fn to_digraph(&self, name: &str) -> String {
        let mut output = format!("digraph {} {{\n", escape_label(name));
        for module in &self.modules {
            let label = escape_label(&module.name);
            if module.dependants.is_empty() {
                let _ = writeln!(output, "\"{label}\";");
                continue;
            }
            for dependant in &module.dependants {
                let _ = writeln!(
                    output,
                    "\"{label}\"->\"{}\";",
                    escape_label(self.name(*dependant))
                );
            }
        }
        output.push('}');
        output
    }

    /// Export modules, sources and edges as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ModuleJson<'a> {
            name: &'a str,
            source: Option<&'a PathBuf>,
            requires: Vec<&'a str>,
            dependants: Vec<&'a str>,
            export_targets: &'a [String],
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GraphJson<'a> {
            modules: Vec<ModuleJson<'a>>,
            sources: Vec<&'a PathBuf>,
            export_roots: Vec<&'a str>,
        }

        let modules = self
            .modules
            .iter()
            .map(|module| ModuleJson {
                name: &module.name,
                source: module.source.map(|id| &self.sources[id.index()].path),
                requires: module.requires.iter().map(|id| self.name(*id)).collect(),
                dependants: module.dependants.iter().map(|id| self.name(*id)).collect(),
                export_targets: &module.export_targets,
            })
            .collect();

        let graph_json = GraphJson {
            modules,
            sources: self.sources.keys().collect(),
            export_roots: self.export_roots().map(|id| self.name(id)).collect(),
        };

        serde_json::to_string_pretty(&graph_json)
    }
}
