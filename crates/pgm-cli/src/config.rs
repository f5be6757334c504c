use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use pgm_data::Dataset;
use pgm_learn::{AnnealingConfig, HillClimbingConfig};
use pgm_score::{bdeu, ScoreKind};

use crate::cli::LearnArgs;

/// Structure search strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    HillClimbing,
    Annealing,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HillClimbing => "hill-climbing",
            Algorithm::Annealing => "annealing",
        }
    }
}

/// Settings for `pgm learn`.
///
/// Every field may be omitted from the TOML file. Command-line flags take
/// precedence over file values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnConfig {
    pub algorithm: Algorithm,
    pub score: ScoreKind,
    /// BDeu equivalent sample size.
    pub alpha: f64,
    /// Dirichlet smoothing for parameter estimation; 0 is maximum likelihood.
    pub estimate_alpha: f64,
    pub class_node: Option<String>,
    pub max_parents: Option<usize>,
    pub hill_climbing: HillClimbingConfig,
    pub annealing: AnnealingConfig,
}

impl Default for LearnConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HillClimbing,
            score: ScoreKind::Bic,
            alpha: bdeu::DEFAULT_ALPHA,
            estimate_alpha: 0.5,
            class_node: None,
            max_parents: None,
            hill_climbing: HillClimbingConfig::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}

impl LearnConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Overlay the flags that were given on the command line.
    ///
    /// `--iterations` and `--seed` apply to both search configurations;
    /// `--class` also seeds hill climbing with a naive-Bayes star.
    pub fn apply(&mut self, args: &LearnArgs) {
        if let Some(algorithm) = args.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(score) = args.score {
            self.score = score;
        }
        if let Some(alpha) = args.alpha {
            self.alpha = alpha;
        }
        if let Some(max_parents) = args.max_parents {
            self.max_parents = Some(max_parents);
        }
        if let Some(iterations) = args.iterations {
            self.hill_climbing.max_iterations = iterations;
            self.annealing.max_iterations = iterations;
        }
        if let Some(seed) = args.seed {
            self.hill_climbing.seed = seed;
            self.annealing.seed = seed;
        }
        if let Some(class_node) = &args.class_node {
            self.class_node = Some(class_node.clone());
            self.hill_climbing.class_node = Some(class_node.clone());
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.score == ScoreKind::Bdeu && !(self.alpha.is_finite() && self.alpha > 0.0) {
            bail!("alpha must be positive for bdeu, got {}", self.alpha);
        }
        if !(self.estimate_alpha.is_finite() && self.estimate_alpha >= 0.0) {
            bail!("estimate_alpha must be non-negative, got {}", self.estimate_alpha);
        }
        if self.score == ScoreKind::Fcll && self.class_node.is_none() {
            bail!("the fcll score needs a class node (--class or class_node)");
        }
        match self.algorithm {
            Algorithm::HillClimbing => self.hill_climbing.validate()?,
            Algorithm::Annealing => self.annealing.validate()?,
        }
        Ok(())
    }

    /// Check that every configured class node is a column of `dataset`.
    pub fn validate_for(&self, dataset: &Dataset) -> anyhow::Result<()> {
        let class_nodes = [
            ("class_node", self.class_node.as_deref()),
            ("hill_climbing.class_node", self.hill_climbing.class_node.as_deref()),
        ];
        for (key, name) in class_nodes {
            if let Some(name) = name {
                if dataset.variable(name).is_none() {
                    bail!(
                        "{key} {name:?} is not a dataset variable (have: {})",
                        dataset.names().join(", ")
                    );
                }
            }
        }
        Ok(())
    }
}
