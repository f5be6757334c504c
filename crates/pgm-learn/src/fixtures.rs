//! Shared test data.

use pgm_data::Dataset;
use pgm_net::Network;

/// 67 rows over five binary letters.
pub(crate) fn letters() -> Dataset {
    let mut data = Dataset::new();
    for (times, [a, b, c, d, e]) in [
        (20, ["T", "F", "T", "T", "T"]),
        (15, ["T", "F", "F", "F", "F"]),
        (10, ["F", "T", "F", "T", "T"]),
        (15, ["F", "F", "T", "T", "T"]),
        (5, ["F", "F", "F", "F", "F"]),
        (2, ["T", "T", "F", "T", "F"]),
    ] {
        for _ in 0..times {
            data.push([("A", a), ("B", b), ("C", c), ("D", d), ("E", e)]);
        }
    }
    data
}

/// One node per dataset column, no arcs.
pub(crate) fn empty_network(data: &Dataset) -> Network {
    Network::from_variables(data.variables().into_iter().cloned())
}
