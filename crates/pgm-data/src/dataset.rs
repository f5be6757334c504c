//! Column-oriented categorical dataset.
//!
//! Each column pairs a [`CategoricalVariable`] with one state code per row.
//! Cells that were never written read as code 0, i.e. the variable's first
//! state.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use pgm_types::{Assignment, CategoricalVariable};

use crate::error::{DataError, DataResult};

#[derive(Clone, Debug)]
struct Column {
    variable: CategoricalVariable,
    codes: Vec<usize>,
}

impl Column {
    fn code(&self, row: usize) -> usize {
        self.codes.get(row).copied().unwrap_or(0)
    }
}

/// Rows of categorical observations.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.variable.name()).collect()
    }

    /// Column variables in first-seen order.
    pub fn variables(&self) -> Vec<&CategoricalVariable> {
        self.columns.iter().map(|c| &c.variable).collect()
    }

    pub fn variable(&self, name: &str) -> Option<&CategoricalVariable> {
        self.column(name).map(|c| &c.variable)
    }

    /// Append a row. New variables and states are registered in iteration
    /// order.
    pub fn push<I, K, V>(&mut self, row: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let index = self.rows;
        for (name, state) in row {
            self.set(name.as_ref(), index, state);
        }
        self.rows = self.rows.max(index + 1);
    }

    /// Write one cell, growing the row count and registering the variable
    /// or state if needed.
    pub fn set(&mut self, name: &str, row: usize, state: impl Into<String>) {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => self.insert_column(CategoricalVariable::new(name)),
        };

        let column = &mut self.columns[position];
        let code = column.variable.register(state);
        if column.codes.len() <= row {
            column.codes.resize(row + 1, 0);
        }
        column.codes[row] = code;
        self.rows = self.rows.max(row + 1);
    }

    /// State of a cell. `None` for an unknown variable, a row past the end,
    /// or a variable without states.
    pub fn get(&self, name: &str, row: usize) -> Option<&str> {
        let column = self.column(name)?;
        if row >= self.rows {
            return None;
        }
        column.variable.state(column.code(row)).ok()
    }

    /// State code of a cell.
    pub fn raw(&self, name: &str, row: usize) -> Option<usize> {
        let column = self.column(name)?;
        (row < self.rows).then(|| column.code(row))
    }

    /// Every column's state at `row`.
    pub fn row(&self, row: usize) -> Option<Assignment> {
        if row >= self.rows {
            return None;
        }
        let assignment = self
            .columns
            .iter()
            .filter_map(|c| {
                let state = c.variable.state(c.code(row)).ok()?;
                Some((c.variable.name().to_string(), state.to_string()))
            })
            .collect();
        Some(assignment)
    }

    /// Declare a column with a fixed initial state order.
    ///
    /// Returns `false` if the column already exists.
    pub fn add_variable<I, S>(&mut self, name: &str, states: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.index.contains_key(name) {
            return false;
        }
        self.insert_column(CategoricalVariable::with_states(name, states));
        true
    }

    /// Drop a column and its data.
    pub fn remove_variable(&mut self, name: &str) -> bool {
        let Some(position) = self.index.remove(name) else {
            return false;
        };
        self.columns.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        true
    }

    // ---------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------

    /// Read one JSON object per line, mapping variable names to states.
    ///
    /// Blank lines are skipped. String values are used as-is, numbers and
    /// booleans by their JSON text; `null` leaves the cell unset. Within a
    /// line, keys are visited in sorted order.
    pub fn from_json_lines(reader: impl BufRead) -> DataResult<Self> {
        let mut dataset = Self::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = number + 1;
            if line.trim().is_empty() {
                continue;
            }

            let parse_error = |message: String| DataError::Parse {
                line: line_no,
                message,
            };
            let object = match serde_json::from_str::<Value>(&line) {
                Ok(Value::Object(object)) => object,
                Ok(other) => return Err(parse_error(format!("expected an object, found {other}"))),
                Err(e) => return Err(parse_error(e.to_string())),
            };

            let mut cells = Vec::with_capacity(object.len());
            for (name, value) in object {
                let state = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null => continue,
                    other => {
                        return Err(parse_error(format!("{name}: unsupported value {other}")));
                    }
                };
                cells.push((name, state));
            }
            dataset.push(cells);
        }

        debug!(
            rows = dataset.len(),
            columns = dataset.columns.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Load a JSON-lines file.
    pub fn load(path: impl AsRef<Path>) -> DataResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_lines(std::io::BufReader::new(file))
    }

    fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&position| &self.columns[position])
    }

    fn insert_column(&mut self, variable: CategoricalVariable) -> usize {
        let position = self.columns.len();
        self.index.insert(variable.name().to_string(), position);
        self.columns.push(Column {
            variable,
            codes: Vec::new(),
        });
        position
    }
}
