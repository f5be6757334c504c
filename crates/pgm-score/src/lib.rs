//! Decomposable scores for Bayesian network structures.
//!
//! A [`LocalScore`] rates one node given its parent set from dataset
//! counts. [`Scorer`] sums local scores over a whole [`Network`], reusing
//! recent results through a [`ScoreCache`].
//!
//! | Score | Local term |
//! |-------|------------|
//! | [`LogLikelihood`] | `Σ N_ijk log(N_ijk / N_ij)` |
//! | [`Aic`] | `LL - (r_i - 1) q_i` |
//! | [`Bic`] | `LL - ½ ln(N) (r_i - 1) q_i` |
//! | [`BDeu`] | Dirichlet marginal likelihood, equivalent sample size `alpha` |
//! | [`Fcll`] | factorized conditional log-likelihood for a class node |
//!
//! [`Network`]: pgm_net::Network

pub mod bdeu;
pub mod cache;
pub mod error;
pub mod family;
pub mod fcll;
pub mod likelihood;
pub mod scorer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bdeu::BDeu;
pub use cache::ScoreCache;
pub use error::{ScoreError, ScoreResult};
pub use fcll::Fcll;
pub use likelihood::{Aic, Bic, LogLikelihood};
pub use scorer::{LocalScore, ScoreKind, Scorer};
