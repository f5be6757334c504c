//! Exact inference by recursive enumeration.
//!
//! Variables are visited in vertex insertion order. A variable missing from
//! the working assignment is summed out; an assigned variable with an
//! unassigned parent sums out that parent first. Once a variable and all of
//! its parents are fixed its CPT entry joins the product. Cost is exponential
//! in the number of variables absent from the evidence.

use std::collections::HashMap;

use tracing::debug;

use pgm_types::{Assignment, VertexId};

use crate::network::Network;

impl Network {
    /// Joint probability of `evidence`, marginalizing every other variable.
    ///
    /// Evidence naming an unknown variable or state has probability `0.0`.
    pub fn query(&self, evidence: &Assignment) -> f64 {
        let Some(mut codes) = self.evidence_codes(evidence) else {
            return 0.0;
        };
        let order = self.graph.vertices().to_vec();
        self.enumerate(&order, &mut codes)
    }

    /// Unnormalized posterior of every state of `occurrence` given `evidence`,
    /// in state order.
    ///
    /// An entry for `occurrence` inside `evidence` is overridden.
    pub fn distribution(&self, occurrence: &str, evidence: &Assignment) -> Option<Vec<(String, f64)>> {
        let variable = self.variable(occurrence)?;
        let mut extended = evidence.clone();

        let scores = variable
            .states()
            .iter()
            .map(|state| {
                extended.insert(occurrence.to_string(), state.clone());
                (state.clone(), self.query(&extended))
            })
            .collect();
        Some(scores)
    }

    /// Most probable state of `occurrence` given `evidence`.
    ///
    /// Ties go to the state enumerated last. Returns `None` when the
    /// occurrence is unknown or has no states.
    pub fn infer(&self, occurrence: &str, evidence: &Assignment) -> Option<String> {
        let mut best: Option<(String, f64)> = None;
        for (state, p) in self.distribution(occurrence, evidence)? {
            if best.as_ref().map_or(true, |(_, max)| p >= *max) {
                best = Some((state, p));
            }
        }

        let (state, p) = best?;
        debug!(occurrence, state = %state, probability = p, "inferred state");
        Some(state)
    }

    fn evidence_codes(&self, evidence: &Assignment) -> Option<HashMap<VertexId, usize>> {
        evidence
            .iter()
            .map(|(name, state)| {
                let id = self.node_id(name)?;
                let code = self.variable_by_id(id)?.code(state).ok()?;
                Some((id, code))
            })
            .collect()
    }

    fn enumerate(&self, order: &[VertexId], codes: &mut HashMap<VertexId, usize>) -> f64 {
        let Some((&current, rest)) = order.split_first() else {
            return 1.0;
        };

        if !codes.contains_key(&current) {
            return self.sum_over(current, order, codes);
        }

        let parents = self.graph.adjacents(current).unwrap_or(&[]);
        if let Some(&hidden) = parents.iter().find(|p| !codes.contains_key(p)) {
            return self.sum_over(hidden, order, codes);
        }

        let p = self.probability_of(current, codes);
        if p == 0.0 {
            return 0.0;
        }
        p * self.enumerate(rest, codes)
    }

    /// Sum `enumerate(order)` over every state of `vertex`.
    fn sum_over(&self, vertex: VertexId, order: &[VertexId], codes: &mut HashMap<VertexId, usize>) -> f64 {
        let cardinality = self.variable_by_id(vertex).map_or(0, |v| v.cardinality());
        let mut total = 0.0;
        for code in 0..cardinality {
            codes.insert(vertex, code);
            total += self.enumerate(order, codes);
        }
        codes.remove(&vertex);
        total
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::sprinkler;
    use crate::Network;
    use pgm_types::{assignment, parse_assignment, Assignment};

    const EPS: f64 = 1e-9;

    fn query(net: &Network, evidence: &str) -> f64 {
        net.query(&parse_assignment(evidence).unwrap())
    }

    #[test]
    fn single_variable_marginals() {
        let net = sprinkler();
        assert!((query(&net, "winter=T") - 0.6).abs() < EPS);
        assert!((query(&net, "sprinkler=T") - 0.42).abs() < EPS);
        assert!((query(&net, "rain=T") - 0.52).abs() < EPS);
        assert!((query(&net, "rain=F") - 0.48).abs() < EPS);
        assert!((query(&net, "wetgrass=T") - 0.6995).abs() < EPS);
        assert!((query(&net, "slippery=T") - 0.364).abs() < EPS);
    }

    #[test]
    fn joint_queries() {
        let net = sprinkler();
        let full = "winter=T, sprinkler=T, rain=F, wetgrass=T, slippery=F";
        assert!((query(&net, full) - 0.0216).abs() < EPS);
        assert!((query(&net, "winter=T, sprinkler=T, rain=F") - 0.024).abs() < EPS);
        assert!((query(&net, "rain=F, wetgrass=T, slippery=F") - 0.2646).abs() < EPS);
    }

    #[test]
    fn marginals_are_normalized() {
        let net = sprinkler();
        for name in net.names() {
            let total: f64 = ["F", "T"]
                .iter()
                .map(|s| net.query(&assignment([(name, *s)])))
                .sum();
            assert!((total - 1.0).abs() < EPS, "{name} sums to {total}");
        }
        assert!((net.query(&Assignment::new()) - 1.0).abs() < EPS);
    }

    #[test]
    fn unknown_evidence_has_zero_probability() {
        let net = sprinkler();
        assert_eq!(query(&net, "autumn=T"), 0.0);
        assert_eq!(query(&net, "rain=maybe"), 0.0);
        assert_eq!(query(&net, "rain=T, autumn=T"), 0.0);
    }

    #[test]
    fn map_states() {
        let net = sprinkler();
        let none = Assignment::new();
        assert_eq!(net.infer("winter", &none).as_deref(), Some("T"));
        assert_eq!(net.infer("sprinkler", &none).as_deref(), Some("F"));
        assert_eq!(net.infer("rain", &none).as_deref(), Some("T"));
        assert_eq!(net.infer("wetgrass", &none).as_deref(), Some("T"));
        assert_eq!(net.infer("slippery", &none).as_deref(), Some("F"));
    }

    #[test]
    fn map_state_given_evidence() {
        let net = sprinkler();
        // P(winter=F, slippery=T) = 0.4 * 0.1 * 0.7 = 0.028
        // P(winter=T, slippery=T) = 0.6 * 0.8 * 0.7 = 0.336
        let evidence = parse_assignment("slippery=T").unwrap();
        assert_eq!(net.infer("winter", &evidence).as_deref(), Some("T"));

        // With the sprinkler off and the grass wet, it must have rained.
        let evidence = parse_assignment("sprinkler=F, wetgrass=T").unwrap();
        assert_eq!(net.infer("rain", &evidence).as_deref(), Some("T"));
    }

    #[test]
    fn ties_go_to_the_last_state() {
        let mut net = Network::new();
        net.add_node("coin", ["heads", "tails"]);
        let none = Assignment::new();
        net.set_probability("coin", "heads", &none, 0.5);
        net.set_probability("coin", "tails", &none, 0.5);
        assert_eq!(net.infer("coin", &none).as_deref(), Some("tails"));
    }

    #[test]
    fn infer_unknown_or_stateless_is_none() {
        let mut net = sprinkler();
        assert_eq!(net.infer("autumn", &Assignment::new()), None);
        net.add_node("empty", Vec::<String>::new());
        assert_eq!(net.infer("empty", &Assignment::new()), None);
    }

    #[test]
    fn distribution_lists_states_in_order() {
        let net = sprinkler();
        let dist = net.distribution("winter", &Assignment::new()).unwrap();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].0, "F");
        assert!((dist[0].1 - 0.4).abs() < EPS);
        assert_eq!(dist[1].0, "T");
        assert!((dist[1].1 - 0.6).abs() < EPS);
    }

    #[test]
    fn unwritten_cpt_contributes_zero() {
        let mut net = Network::new();
        net.add_node("a", ["x", "y"]);
        assert_eq!(net.query(&assignment([("a", "x")])), 0.0);
    }
}
