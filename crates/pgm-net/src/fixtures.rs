//! Shared test networks.

use pgm_types::{parse_assignment, Assignment};

use crate::Network;

/// The winter / sprinkler / rain / wet grass / slippery road network.
///
/// Every variable has states `["F", "T"]`.
pub(crate) fn sprinkler() -> Network {
    let mut net = Network::new();
    for name in ["winter", "sprinkler", "rain", "wetgrass", "slippery"] {
        net.add_node(name, ["F", "T"]);
    }

    net.add_arc("winter", "sprinkler");
    net.add_arc("winter", "rain");
    net.add_arc("sprinkler", "wetgrass");
    net.add_arc("rain", "wetgrass");
    net.add_arc("rain", "slippery");

    let none = Assignment::new();
    net.set_probability("winter", "T", &none, 0.6);
    net.set_probability("winter", "F", &none, 0.4);

    let rows: [(&str, &str, &str, f64); 18] = [
        ("sprinkler", "winter=T", "T", 0.2),
        ("sprinkler", "winter=T", "F", 0.8),
        ("sprinkler", "winter=F", "T", 0.75),
        ("sprinkler", "winter=F", "F", 0.25),
        ("rain", "winter=T", "T", 0.8),
        ("rain", "winter=T", "F", 0.2),
        ("rain", "winter=F", "T", 0.1),
        ("rain", "winter=F", "F", 0.9),
        ("wetgrass", "sprinkler=T, rain=T", "T", 0.95),
        ("wetgrass", "sprinkler=T, rain=T", "F", 0.05),
        ("wetgrass", "sprinkler=T, rain=F", "T", 0.9),
        ("wetgrass", "sprinkler=T, rain=F", "F", 0.1),
        ("wetgrass", "sprinkler=F, rain=T", "T", 0.8),
        ("wetgrass", "sprinkler=F, rain=T", "F", 0.2),
        ("wetgrass", "sprinkler=F, rain=F", "T", 0.0),
        ("wetgrass", "sprinkler=F, rain=F", "F", 1.0),
        ("slippery", "rain=T", "T", 0.7),
        ("slippery", "rain=T", "F", 0.3),
    ];
    for (node, given, state, p) in rows {
        let given = parse_assignment(given).expect("fixture assignment");
        net.set_probability(node, state, &given, p);
    }
    let dry = parse_assignment("rain=F").expect("fixture assignment");
    net.set_probability("slippery", "T", &dry, 0.0);
    net.set_probability("slippery", "F", &dry, 1.0);

    net
}
