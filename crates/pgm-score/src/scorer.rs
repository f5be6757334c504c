//! Whole-network scoring through a per-node cache.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use pgm_data::Dataset;
use pgm_net::Network;
use pgm_types::VertexId;

use crate::bdeu::BDeu;
use crate::cache::ScoreCache;
use crate::error::{ScoreError, ScoreResult};
use crate::fcll::Fcll;
use crate::likelihood::{Aic, Bic, LogLikelihood};

/// A decomposable score: the fitness of one node given its parents.
///
/// Higher is better. A network's score is the sum of its nodes' local
/// scores.
pub trait LocalScore {
    fn local_score(&self, child: &str, parents: &[&str]) -> ScoreResult<f64>;
}

impl<T: LocalScore + ?Sized> LocalScore for &T {
    fn local_score(&self, child: &str, parents: &[&str]) -> ScoreResult<f64> {
        (**self).local_score(child, parents)
    }
}

impl<T: LocalScore + ?Sized> LocalScore for Box<T> {
    fn local_score(&self, child: &str, parents: &[&str]) -> ScoreResult<f64> {
        (**self).local_score(child, parents)
    }
}

/// Sums a [`LocalScore`] over every node of a network.
#[derive(Debug)]
pub struct Scorer<S> {
    local: S,
    cache: ScoreCache,
}

impl<S: LocalScore> Scorer<S> {
    pub fn new(local: S) -> Self {
        Self {
            local,
            cache: ScoreCache::default(),
        }
    }

    pub fn with_cache(local: S, cache: ScoreCache) -> Self {
        Self { local, cache }
    }

    pub fn local(&self) -> &S {
        &self.local
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    /// Score `network`, logging failures and mapping them to `-∞` so a
    /// search treats the structure as the worst possible.
    pub fn score(&mut self, network: &Network) -> f64 {
        match self.try_score(network) {
            Ok(score) => score,
            Err(e) => {
                warn!(error = %e, "scoring failed");
                f64::NEG_INFINITY
            }
        }
    }

    /// Score `network`, surfacing the first failing node.
    pub fn try_score(&mut self, network: &Network) -> ScoreResult<f64> {
        let graph = network.graph();
        let mut total = 0.0;

        for &vertex in graph.vertices() {
            let parents = graph.adjacents(vertex).unwrap_or(&[]);
            let key: BTreeSet<_> = parents.iter().copied().collect();
            if let Some(score) = self.cache.get(vertex, &key) {
                total += score;
                continue;
            }

            let child = name_of(network, vertex)?;
            let parent_names = parents
                .iter()
                .map(|&p| name_of(network, p))
                .collect::<ScoreResult<Vec<_>>>()?;

            let score = self.local.local_score(child, &parent_names)?;
            self.cache.insert(vertex, key, score);
            total += score;
        }

        Ok(total)
    }
}

fn name_of(network: &Network, vertex: VertexId) -> ScoreResult<&str> {
    network
        .variable_by_id(vertex)
        .map(|v| v.name())
        .ok_or_else(|| ScoreError::UnknownVariable(format!("vertex {vertex}")))
}

// ---------------------------------------------------------------------------
// ScoreKind
// ---------------------------------------------------------------------------

/// Score selector for configuration files and the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    #[serde(rename = "ll")]
    LogLikelihood,
    Bic,
    Aic,
    Bdeu,
    Fcll,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 5] = [
        ScoreKind::LogLikelihood,
        ScoreKind::Bic,
        ScoreKind::Aic,
        ScoreKind::Bdeu,
        ScoreKind::Fcll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKind::LogLikelihood => "ll",
            ScoreKind::Bic => "bic",
            ScoreKind::Aic => "aic",
            ScoreKind::Bdeu => "bdeu",
            ScoreKind::Fcll => "fcll",
        }
    }

    /// Build the selected score over `dataset`.
    ///
    /// `alpha` is used by BDeu only; fCLL requires `class_node`.
    pub fn build<'a>(
        self,
        dataset: &'a Dataset,
        alpha: f64,
        class_node: Option<&str>,
    ) -> ScoreResult<Box<dyn LocalScore + 'a>> {
        let score: Box<dyn LocalScore + 'a> = match self {
            ScoreKind::LogLikelihood => Box::new(LogLikelihood::new(dataset)),
            ScoreKind::Bic => Box::new(Bic::new(dataset)),
            ScoreKind::Aic => Box::new(Aic::new(dataset)),
            ScoreKind::Bdeu => Box::new(BDeu::with_alpha(dataset, alpha)),
            ScoreKind::Fcll => {
                let class_node = class_node.ok_or(ScoreError::MissingClassNode("fcll"))?;
                Box::new(Fcll::new(dataset, class_node))
            }
        };
        Ok(score)
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreKind {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ll" | "log-likelihood" | "loglikelihood" => Ok(ScoreKind::LogLikelihood),
            "bic" => Ok(ScoreKind::Bic),
            "aic" => Ok(ScoreKind::Aic),
            "bdeu" => Ok(ScoreKind::Bdeu),
            "fcll" => Ok(ScoreKind::Fcll),
            _ => Err(ScoreError::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{letters, letters_network};

    #[test]
    fn network_totals() {
        let data = letters();
        let net = letters_network(&data);

        for (kind, want) in [
            (ScoreKind::LogLikelihood, -139.1443),
            (ScoreKind::Aic, -150.1443),
            (ScoreKind::Bic, -162.2701),
        ] {
            let mut scorer = Scorer::new(kind.build(&data, 0.5, None).unwrap());
            let got = scorer.score(&net);
            assert!((got - want).abs() < 1e-3, "{kind}: {got} != {want}");
        }

        let mut bdeu = Scorer::new(BDeu::with_alpha(&data, 0.1));
        assert!((bdeu.score(&net) + 168.1997).abs() < 1e-3);
    }

    #[test]
    fn repeated_scoring_hits_the_cache() {
        let data = letters();
        let mut net = letters_network(&data);
        let mut scorer = Scorer::new(Aic::new(&data));

        let first = scorer.score(&net);
        assert_eq!(scorer.cache().len(), 5);
        assert_eq!(scorer.score(&net), first);
        assert_eq!(scorer.cache().len(), 5);

        // Only the edited family is rescored.
        assert!(net.remove_arc("C", "E"));
        let edited = scorer.score(&net);
        assert_eq!(scorer.cache().len(), 6);
        assert!(edited != first);
    }

    #[test]
    fn cached_total_matches_fresh_total() {
        let data = letters();
        let mut net = letters_network(&data);
        let mut cached = Scorer::new(Bic::new(&data));
        cached.score(&net);
        net.reverse_arc("A", "B");
        net.add_arc("E", "D");

        let mut fresh = Scorer::new(Bic::new(&data));
        assert!((cached.score(&net) - fresh.score(&net)).abs() < 1e-9);
    }

    #[test]
    fn failure_scores_negative_infinity() {
        let data = letters();
        let mut net = letters_network(&data);
        net.add_node("Z", ["x"]);

        let mut scorer = Scorer::new(LogLikelihood::new(&data));
        assert!(matches!(
            scorer.try_score(&net),
            Err(ScoreError::UnknownVariable(name)) if name == "Z"
        ));
        assert_eq!(scorer.score(&net), f64::NEG_INFINITY);
    }

    #[test]
    fn kind_parsing() {
        for kind in ScoreKind::ALL {
            assert_eq!(kind.as_str().parse::<ScoreKind>().unwrap(), kind);
        }
        assert_eq!("BDeu".parse::<ScoreKind>().unwrap(), ScoreKind::Bdeu);
        assert!(matches!(
            "k2".parse::<ScoreKind>(),
            Err(ScoreError::UnknownKind(_))
        ));
    }

    #[test]
    fn kind_serde_names() {
        let json = serde_json::to_string(&ScoreKind::LogLikelihood).unwrap();
        assert_eq!(json, "\"ll\"");
        let kind: ScoreKind = serde_json::from_str("\"bdeu\"").unwrap();
        assert_eq!(kind, ScoreKind::Bdeu);
    }

    #[test]
    fn fcll_needs_a_class_node() {
        let data = letters();
        assert!(matches!(
            ScoreKind::Fcll.build(&data, 0.5, None),
            Err(ScoreError::MissingClassNode("fcll"))
        ));
        assert!(ScoreKind::Fcll.build(&data, 0.5, Some("A")).is_ok());
    }
}
