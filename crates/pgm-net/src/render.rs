//! Human-readable and Graphviz output.

use std::fmt::{self, Write as _};
use std::path::Path;

use pgm_types::{Assignment, CategoricalVariable, VertexId};

use crate::error::NetResult;
use crate::network::Network;

impl fmt::Display for Network {
    /// One line per node: `name (cardinality) <- [parent, ...]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &id in self.graph.vertices() {
            let Some(variable) = self.variable_by_id(id) else {
                continue;
            };
            let parents = self.parent_variables(id);
            let names: Vec<&str> = parents.iter().map(|p| p.name()).collect();
            writeln!(
                f,
                "{} ({}) <- [{}]",
                variable.name(),
                variable.cardinality(),
                names.join(", ")
            )?;
        }
        Ok(())
    }
}

impl Network {
    /// Every CPT as text, two decimals per entry.
    ///
    /// Each node gets a `P(node | parents)` header followed by one line per
    /// parent configuration (first parent slowest).
    pub fn cpt_table(&self) -> String {
        let mut out = String::new();
        for &id in self.graph.vertices() {
            let Some(variable) = self.variable_by_id(id) else {
                continue;
            };
            let parents = self.parent_variables(id);

            let names: Vec<&str> = parents.iter().map(|p| p.name()).collect();
            if names.is_empty() {
                let _ = writeln!(out, "P({})", variable.name());
            } else {
                let _ = writeln!(out, "P({} | {})", variable.name(), names.join(", "));
            }

            for given in parent_configurations(&parents) {
                let label: Vec<String> = names
                    .iter()
                    .filter_map(|name| given.get(*name).map(|state| format!("{name}={state}")))
                    .collect();
                let _ = write!(out, "\t[{}]", label.join(", "));
                for state in variable.states() {
                    let p = self.probability(variable.name(), state, &given);
                    let _ = write!(out, " {state}={p:.2}");
                }
                out.push('\n');
            }
        }
        out
    }

    /// Graphviz source with one node per vertex and arcs drawn parent to child.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        for &id in self.graph.vertices() {
            let name = self.variable_by_id(id).map_or("", |v| v.name());
            let _ = writeln!(out, "\t{id} [label=\"{name}\"];");
        }
        out.push('\n');

        for &id in self.graph.vertices() {
            let parents = self.graph.adjacents(id).unwrap_or(&[]);
            let list: Vec<String> = parents.iter().map(VertexId::to_string).collect();
            let _ = writeln!(out, "\t{id} -> {{{}}} [dir=back]", list.join(" ; "));
        }
        out.push_str("}\n");
        out
    }

    /// Write [`to_dot`](Self::to_dot) output to `path`.
    pub fn write_dot(&self, path: impl AsRef<Path>) -> NetResult<()> {
        std::fs::write(path, self.to_dot())?;
        Ok(())
    }

    fn parent_variables(&self, id: VertexId) -> Vec<&CategoricalVariable> {
        self.graph
            .adjacents(id)
            .unwrap_or(&[])
            .iter()
            .filter_map(|&p| self.variable_by_id(p))
            .collect()
    }
}

/// Every joint assignment of `parents`, first parent slowest.
fn parent_configurations(parents: &[&CategoricalVariable]) -> Vec<Assignment> {
    let mut configurations = vec![Assignment::new()];
    for parent in parents {
        configurations = configurations
            .into_iter()
            .flat_map(|given| {
                parent.states().iter().map(move |state| {
                    let mut next = given.clone();
                    next.insert(parent.name().to_string(), state.clone());
                    next
                })
            })
            .collect();
    }
    configurations
}
