//! Depth-first cycle detection over adjacency lists.
//!
//! Both entry points share one iterative three-colour DFS: a vertex is
//! unmarked until first reached, `OnStack` while its successors are being
//! explored, and `Done` once all of them have been. Meeting an `OnStack`
//! vertex again means a back edge, i.e. a directed cycle.

use std::collections::HashMap;

use pgm_types::VertexId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// Returns `true` if adding the edge `from -> to` would close a directed cycle.
///
/// `from` is pre-marked as on the stack, then the existing relation is
/// walked starting at `to`. Any path back to `from` (including `to == from`)
/// is reported.
pub fn closes_cycle(
    adjacency: &HashMap<VertexId, Vec<VertexId>>,
    from: VertexId,
    to: VertexId,
) -> bool {
    let mut marks = HashMap::new();
    marks.insert(from, Mark::OnStack);
    reaches_on_stack(adjacency, to, &mut marks)
}

/// Returns `true` if the adjacency relation already contains a directed cycle.
pub fn has_cycle(vertices: &[VertexId], adjacency: &HashMap<VertexId, Vec<VertexId>>) -> bool {
    let mut marks = HashMap::new();
    vertices
        .iter()
        .any(|&v| !marks.contains_key(&v) && reaches_on_stack(adjacency, v, &mut marks))
}

fn reaches_on_stack(
    adjacency: &HashMap<VertexId, Vec<VertexId>>,
    start: VertexId,
    marks: &mut HashMap<VertexId, Mark>,
) -> bool {
    match marks.get(&start) {
        Some(Mark::OnStack) => return true,
        Some(Mark::Done) => return false,
        None => {}
    }

    marks.insert(start, Mark::OnStack);
    // (vertex, index of the next successor to explore)
    let mut stack: Vec<(VertexId, usize)> = vec![(start, 0)];

    while let Some(top) = stack.last_mut() {
        let (vertex, next) = *top;
        let successors = adjacency.get(&vertex).map(Vec::as_slice).unwrap_or(&[]);

        if next < successors.len() {
            top.1 += 1;
            let successor = successors[next];
            match marks.get(&successor) {
                Some(Mark::OnStack) => return true,
                Some(Mark::Done) => {}
                None => {
                    marks.insert(successor, Mark::OnStack);
                    stack.push((successor, 0));
                }
            }
        } else {
            marks.insert(vertex, Mark::Done);
            stack.pop();
        }
    }

    false
}
