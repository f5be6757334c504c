//! Named state assignments such as `{rain: T, winter: F}`.

use std::collections::HashMap;

use crate::error::TypeError;

/// Mapping from variable name to state name.
pub type Assignment = HashMap<String, String>;

/// Build an [`Assignment`] from name/state pairs.
pub fn assignment<I, K, V>(pairs: I) -> Assignment
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Parse a comma-separated list of `name=state` pairs.
///
/// Whitespace around names and states is trimmed. An empty input yields an
/// empty assignment.
pub fn parse_assignment(input: &str) -> Result<Assignment, TypeError> {
    let mut parsed = Assignment::new();
    for pair in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((name, state)) = pair.split_once('=') else {
            return Err(TypeError::MalformedAssignment(pair.to_string()));
        };
        let (name, state) = (name.trim(), state.trim());
        if name.is_empty() || state.is_empty() {
            return Err(TypeError::MalformedAssignment(pair.to_string()));
        }
        parsed.insert(name.to_string(), state.to_string());
    }
    Ok(parsed)
}
