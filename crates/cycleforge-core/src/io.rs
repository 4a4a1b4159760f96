//! Instance loading.
//!
//! The instance format is plain text with one node per line: `x;y;cost`.
//! Surrounding whitespace is trimmed and blank lines are skipped. Node ids
//! are assigned in line order and the instance is named after the file stem.

use std::fs;
use std::path::Path;

use crate::domain::{Node, ProblemData};
use crate::error::{InstanceError, Result};

/// Reads an instance file.
///
/// # Examples
///
/// ```no_run
/// use cycleforge_core::read_instance;
///
/// let data = read_instance("instances/TSPA.csv").unwrap();
/// println!("{}: {} nodes", data.name(), data.total_nodes());
/// ```
pub fn read_instance(path: impl AsRef<Path>) -> Result<ProblemData> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(InstanceError::from)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_instance(&name, &contents)
}

/// Parses instance text.
pub fn parse_instance(name: &str, contents: &str) -> Result<ProblemData> {
    let mut nodes = Vec::new();
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let number = index + 1;
        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(InstanceError::InvalidLine {
                line: number,
                content: line.to_string(),
            }
            .into());
        }
        let x = parse_coordinate(fields[0], number, "x")?;
        let y = parse_coordinate(fields[1], number, "y")?;
        let cost = parse_field::<i64>(fields[2], number, "cost")?;
        nodes.push(Node::new(nodes.len(), x, y, cost));
    }
    if nodes.is_empty() {
        return Err(InstanceError::Empty.into());
    }
    ProblemData::new(name, nodes)
}

/// Parses a coordinate; `inf` and `NaN` are rejected.
fn parse_coordinate(
    field: &str,
    line: usize,
    name: &'static str,
) -> std::result::Result<f64, InstanceError> {
    let value: f64 = parse_field(field, line, name)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InstanceError::InvalidNumber { line, field: name })
    }
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    line: usize,
    name: &'static str,
) -> std::result::Result<T, InstanceError> {
    field
        .parse()
        .map_err(|_| InstanceError::InvalidNumber { line, field: name })
}
