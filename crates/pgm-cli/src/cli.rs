use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pgm_score::ScoreKind;

use crate::config::Algorithm;

#[derive(Parser)]
#[command(
    name = "pgm",
    about = "PGM: learn and query discrete Bayesian networks",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Learn structure and parameters from a JSON-lines dataset
    Learn(LearnArgs),
    /// Joint probability of an evidence assignment
    Query(QueryArgs),
    /// Most probable state of a variable given evidence
    Infer(InferArgs),
    /// Print a saved network
    Show(ShowArgs),
    /// Export a saved network as Graphviz DOT
    Dot(DotArgs),
}

#[derive(Args)]
pub struct LearnArgs {
    /// Dataset, one JSON object per line
    #[arg(short, long)]
    pub data: PathBuf,
    /// TOML file with learning settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,
    /// ll, bic, aic, bdeu or fcll
    #[arg(short, long)]
    pub score: Option<ScoreKind>,
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Class variable for fCLL and the naive-Bayes start
    #[arg(long = "class")]
    pub class_node: Option<String>,
    /// Upper bound on parents per node
    #[arg(long)]
    pub max_parents: Option<usize>,
    /// BDeu equivalent sample size
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Write the learned network as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write the learned structure as DOT
    #[arg(long)]
    pub dot: Option<PathBuf>,
}

#[derive(Args)]
pub struct QueryArgs {
    #[arg(short = 'N', long)]
    pub network: PathBuf,
    /// Comma-separated name=state pairs
    #[arg(short, long)]
    pub evidence: String,
}

#[derive(Args)]
pub struct InferArgs {
    #[arg(short = 'N', long)]
    pub network: PathBuf,
    #[arg(short, long)]
    pub target: String,
    #[arg(short, long, default_value = "")]
    pub evidence: String,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(short = 'N', long)]
    pub network: PathBuf,
    /// Also print every conditional probability table
    #[arg(long)]
    pub cpt: bool,
}

#[derive(Args)]
pub struct DotArgs {
    #[arg(short = 'N', long)]
    pub network: PathBuf,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_learn_minimal() {
        let cli = Cli::try_parse_from(["pgm", "learn", "--data", "rows.jsonl"]).unwrap();
        if let Command::Learn(args) = cli.command {
            assert_eq!(args.data, PathBuf::from("rows.jsonl"));
            assert!(args.algorithm.is_none());
            assert!(args.score.is_none());
        } else { panic!("wrong command"); }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_learn_full() {
        let cli = Cli::try_parse_from([
            "pgm", "learn", "-d", "rows.jsonl", "--algorithm", "annealing", "--score", "bdeu",
            "-n", "500", "--seed", "7", "--class", "A", "--max-parents", "2", "--alpha", "0.1",
            "-o", "net.json", "--dot", "net.dot",
        ])
        .unwrap();
        if let Command::Learn(args) = cli.command {
            assert_eq!(args.algorithm, Some(Algorithm::Annealing));
            assert_eq!(args.score, Some(ScoreKind::Bdeu));
            assert_eq!(args.iterations, Some(500));
            assert_eq!(args.seed, Some(7));
            assert_eq!(args.class_node.as_deref(), Some("A"));
            assert_eq!(args.max_parents, Some(2));
            assert_eq!(args.alpha, Some(0.1));
            assert_eq!(args.output, Some("net.json".into()));
            assert_eq!(args.dot, Some("net.dot".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_learn_hill_climbing_and_ll() {
        let cli = Cli::try_parse_from([
            "pgm", "learn", "-d", "x", "-a", "hill-climbing", "-s", "ll",
        ])
        .unwrap();
        if let Command::Learn(args) = cli.command {
            assert_eq!(args.algorithm, Some(Algorithm::HillClimbing));
            assert_eq!(args.score, Some(ScoreKind::LogLikelihood));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_learn_rejects_unknown_score() {
        assert!(Cli::try_parse_from(["pgm", "learn", "-d", "x", "--score", "k2"]).is_err());
    }

    #[test]
    fn parse_learn_requires_data() {
        assert!(Cli::try_parse_from(["pgm", "learn"]).is_err());
    }

    #[test]
    fn parse_query() {
        let cli = Cli::try_parse_from(["pgm", "query", "-N", "net.json", "-e", "rain=T,winter=F"]).unwrap();
        if let Command::Query(args) = cli.command {
            assert_eq!(args.network, PathBuf::from("net.json"));
            assert_eq!(args.evidence, "rain=T,winter=F");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_infer_without_evidence() {
        let cli = Cli::try_parse_from(["pgm", "infer", "--network", "net.json", "--target", "rain"]).unwrap();
        if let Command::Infer(args) = cli.command {
            assert_eq!(args.target, "rain");
            assert_eq!(args.evidence, "");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show_cpt() {
        let cli = Cli::try_parse_from(["pgm", "show", "-N", "net.json", "--cpt"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert!(args.cpt);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_dot() {
        let cli = Cli::try_parse_from(["pgm", "dot", "-N", "net.json"]).unwrap();
        if let Command::Dot(args) = cli.command {
            assert!(args.output.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["pgm", "show", "-N", "n.json", "--format", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
