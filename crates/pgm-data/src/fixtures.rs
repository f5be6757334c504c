//! Shared test data.

use crate::Dataset;

/// Five rows of the classic play-tennis table.
pub(crate) fn weather() -> Dataset {
    let mut data = Dataset::new();
    for (outlook, temperature, play) in [
        ("sunny", "hot", "yes"),
        ("rain", "cool", "no"),
        ("sunny", "cool", "yes"),
        ("sunny", "mild", "yes"),
        ("rain", "hot", "no"),
    ] {
        data.push([
            ("outlook", outlook),
            ("temperature", temperature),
            ("play", play),
        ]);
    }
    data
}
