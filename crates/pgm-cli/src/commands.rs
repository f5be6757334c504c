use std::collections::BTreeMap;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;
use tracing::info;

use pgm_data::Dataset;
use pgm_learn::{RandomizedHillClimbing, SampleEstimate, SimulatedAnnealing, StructureSearch};
use pgm_net::Network;
use pgm_score::Scorer;
use pgm_types::{parse_assignment, Assignment};

use crate::cli::*;
use crate::config::{Algorithm, LearnConfig};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Learn(args) => cmd_learn(args, format),
        Command::Query(args) => cmd_query(args, format),
        Command::Infer(args) => cmd_infer(args, format),
        Command::Show(args) => cmd_show(args, format),
        Command::Dot(args) => cmd_dot(args),
    }
}

fn load_network(path: &std::path::Path) -> anyhow::Result<Network> {
    Network::load(path).with_context(|| format!("failed to load network {}", path.display()))
}

fn parse_evidence(text: &str) -> anyhow::Result<Assignment> {
    parse_assignment(text).with_context(|| format!("invalid evidence {text:?}"))
}

/// `a=T, b=F` with names sorted.
fn describe(evidence: &Assignment) -> String {
    let sorted: BTreeMap<_, _> = evidence.iter().collect();
    sorted
        .into_iter()
        .map(|(name, state)| format!("{name}={state}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn structure_json(network: &Network) -> serde_json::Value {
    let nodes: Vec<_> = network
        .names()
        .into_iter()
        .map(|name| {
            json!({
                "name": name,
                "states": network.variable(name).map(|v| v.states().to_vec()).unwrap_or_default(),
                "parents": network.parents(name).unwrap_or_default(),
            })
        })
        .collect();
    json!({ "nodes": nodes, "arcs": network.arc_count() })
}

fn cmd_learn(args: LearnArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => LearnConfig::load(path)?,
        None => LearnConfig::default(),
    };
    config.apply(&args);
    config.validate()?;

    let dataset = Dataset::load(&args.data)
        .with_context(|| format!("failed to load dataset {}", args.data.display()))?;
    if dataset.is_empty() {
        bail!("dataset {} has no rows", args.data.display());
    }
    config.validate_for(&dataset)?;
    info!(rows = dataset.len(), variables = dataset.names().len(), "dataset loaded");

    let mut network = Network::from_variables(dataset.variables().into_iter().cloned());
    if let Some(max_parents) = config.max_parents {
        network.graph_mut().set_max_fan_out(Some(max_parents));
    }

    let local = config
        .score
        .build(&dataset, config.alpha, config.class_node.as_deref())
        .with_context(|| format!("cannot build {} score", config.score))?;
    let mut scorer = Scorer::new(local);

    let mut search: Box<dyn StructureSearch> = match config.algorithm {
        Algorithm::HillClimbing => Box::new(RandomizedHillClimbing::new(config.hill_climbing.clone())),
        Algorithm::Annealing => Box::new(SimulatedAnnealing::new(config.annealing.clone())),
    };
    let best = search.run(&mut network, &mut |n: &Network| scorer.score(n));

    SampleEstimate::new(config.estimate_alpha)
        .estimate(&mut network, &dataset)
        .context("parameter estimation failed")?;

    if let Some(path) = &args.output {
        network
            .save(path)
            .with_context(|| format!("failed to write network {}", path.display()))?;
    }
    if let Some(path) = &args.dot {
        network
            .write_dot(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => {
            let mut report = structure_json(&network);
            report["algorithm"] = json!(config.algorithm.as_str());
            report["score"] = json!(config.score.as_str());
            report["best"] = json!(best);
            report["rows"] = json!(dataset.len());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "{} Learned {} nodes, {} arcs from {} rows",
                "✓".green().bold(),
                network.len(),
                network.arc_count().to_string().bold(),
                dataset.len()
            );
            println!("  Search: {}", config.algorithm.as_str().cyan());
            println!("  Score: {} = {}", config.score.as_str().cyan(), format!("{best:.4}").yellow());
            print!("{network}");
            if let Some(path) = &args.output {
                println!("  Network: {}", path.display().to_string().blue());
            }
            if let Some(path) = &args.dot {
                println!("  DOT: {}", path.display().to_string().blue());
            }
        }
    }
    Ok(())
}

fn cmd_query(args: QueryArgs, format: OutputFormat) -> anyhow::Result<()> {
    let network = load_network(&args.network)?;
    let evidence = parse_evidence(&args.evidence)?;
    let p = network.query(&evidence);

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "evidence": evidence, "probability": p }))?
        ),
        OutputFormat::Text => println!("P({}) = {}", describe(&evidence), format!("{p:.6}").yellow()),
    }
    Ok(())
}

fn cmd_infer(args: InferArgs, format: OutputFormat) -> anyhow::Result<()> {
    let network = load_network(&args.network)?;
    let evidence = parse_evidence(&args.evidence)?;
    let Some(distribution) = network.distribution(&args.target, &evidence) else {
        bail!("network has no variable {:?}", args.target);
    };
    let Some(state) = most_probable(&distribution) else {
        bail!("variable {:?} has no states", args.target);
    };

    match format {
        OutputFormat::Json => {
            let weights: BTreeMap<_, _> = distribution.iter().map(|(s, p)| (s.as_str(), *p)).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "target": args.target,
                    "evidence": evidence,
                    "state": state,
                    "joint": weights,
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{} = {}", args.target.bold(), state.green().bold());
            for (candidate, p) in &distribution {
                let marker = if *candidate == state { "*" } else { " " };
                println!("  {marker} P({}={candidate}, {}) = {p:.6}", args.target, describe(&evidence));
            }
        }
    }
    Ok(())
}

/// State with the largest weight; ties go to the later state.
fn most_probable(distribution: &[(String, f64)]) -> Option<String> {
    let mut best: Option<&(String, f64)> = None;
    for entry in distribution {
        if best.map_or(true, |(_, max)| entry.1 >= *max) {
            best = Some(entry);
        }
    }
    best.map(|(state, _)| state.clone())
}

fn cmd_show(args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let network = load_network(&args.network)?;
    match format {
        OutputFormat::Json => {
            let mut report = structure_json(&network);
            if args.cpt {
                let tables: BTreeMap<_, _> = network
                    .names()
                    .into_iter()
                    .filter_map(|name| network.cpt(name).map(|cpt| (name, cpt.to_vec())))
                    .collect();
                report["cpt"] = json!(tables);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{} nodes, {} arcs", network.len().to_string().bold(), network.arc_count().to_string().bold());
            print!("{network}");
            if args.cpt {
                print!("{}", network.cpt_table());
            }
        }
    }
    Ok(())
}

fn cmd_dot(args: DotArgs) -> anyhow::Result<()> {
    let network = load_network(&args.network)?;
    match &args.output {
        Some(path) => {
            network
                .write_dot(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} Wrote {}", "✓".green(), path.display().to_string().blue());
        }
        None => print!("{}", network.to_dot()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    const ROWS: &str = r#"{"rain": "T", "wet": "T"}
{"rain": "T", "wet": "T"}
{"rain": "F", "wet": "F"}
{"rain": "F", "wet": "F"}
{"rain": "F", "wet": "T"}
{"rain": "T", "wet": "T"}
"#;

    fn run(argv: &[&str]) -> anyhow::Result<()> {
        let mut full = vec!["pgm"];
        full.extend_from_slice(argv);
        run_command(Cli::try_parse_from(full)?)
    }

    fn learned(dir: &Path) -> std::path::PathBuf {
        let data = dir.join("rows.jsonl");
        std::fs::write(&data, ROWS).unwrap();
        let out = dir.join("net.json");
        run(&[
            "learn", "-d", data.to_str().unwrap(), "-s", "ll", "-n", "50",
            "-o", out.to_str().unwrap(),
        ])
        .unwrap();
        out
    }

    #[test]
    fn learn_writes_a_loadable_network() {
        let dir = tempfile::tempdir().unwrap();
        let out = learned(dir.path());
        let network = Network::load(&out).unwrap();

        assert_eq!(network.len(), 2);
        assert!(!network.graph().has_cycle());
        let total = network.query(&Assignment::new());
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn learn_with_dot_and_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("rows.jsonl");
        std::fs::write(&data, ROWS).unwrap();
        let dot = dir.path().join("net.dot");
        run(&[
            "learn", "-d", data.to_str().unwrap(), "-a", "annealing", "-n", "20",
            "--dot", dot.to_str().unwrap(), "--format", "json",
        ])
        .unwrap();
        let text = std::fs::read_to_string(&dot).unwrap();
        assert!(text.starts_with("digraph {"));
    }

    #[test]
    fn learn_fails_on_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jsonl");
        assert!(run(&["learn", "-d", missing.to_str().unwrap()]).is_err());
    }

    #[test]
    fn learn_fails_on_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("empty.jsonl");
        std::fs::write(&data, "\n").unwrap();
        assert!(run(&["learn", "-d", data.to_str().unwrap()]).is_err());
    }

    #[test]
    fn fcll_without_class_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("rows.jsonl");
        std::fs::write(&data, ROWS).unwrap();
        assert!(run(&["learn", "-d", data.to_str().unwrap(), "-s", "fcll"]).is_err());
    }

    #[test]
    fn unknown_class_node_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("rows.jsonl");
        std::fs::write(&data, ROWS).unwrap();
        let out = dir.path().join("net.json");
        let data = data.to_str().unwrap();

        let result = run(&[
            "learn", "-d", data, "-s", "fcll", "--class", "snow", "-n", "20",
            "-o", out.to_str().unwrap(),
        ]);
        assert!(result.is_err());
        assert!(!out.exists());

        assert!(run(&["learn", "-d", data, "--class", "snow", "-n", "5"]).is_err());
        run(&["learn", "-d", data, "-s", "fcll", "--class", "rain", "-n", "5"]).unwrap();
    }

    #[test]
    fn query_infer_show_and_dot() {
        let dir = tempfile::tempdir().unwrap();
        let out = learned(dir.path());
        let net = out.to_str().unwrap();

        run(&["query", "-N", net, "-e", "rain=T"]).unwrap();
        run(&["query", "-N", net, "-e", "rain=T, wet=T", "--format", "json"]).unwrap();
        run(&["infer", "-N", net, "-t", "wet", "-e", "rain=F"]).unwrap();
        run(&["show", "-N", net, "--cpt"]).unwrap();
        run(&["show", "-N", net, "--cpt", "--format", "json"]).unwrap();

        let dot = dir.path().join("out.dot");
        run(&["dot", "-N", net, "-o", dot.to_str().unwrap()]).unwrap();
        assert!(dot.exists());
    }

    #[test]
    fn infer_unknown_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = learned(dir.path());
        assert!(run(&["infer", "-N", out.to_str().unwrap(), "-t", "snow"]).is_err());
    }

    #[test]
    fn malformed_evidence_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = learned(dir.path());
        assert!(run(&["query", "-N", out.to_str().unwrap(), "-e", "rain"]).is_err());
    }

    #[test]
    fn most_probable_matches_network_infer() {
        let dir = tempfile::tempdir().unwrap();
        let network = Network::load(learned(dir.path())).unwrap();
        for evidence in ["", "rain=T", "rain=F"] {
            let evidence = parse_evidence(evidence).unwrap();
            let distribution = network.distribution("wet", &evidence).unwrap();
            assert_eq!(most_probable(&distribution), network.infer("wet", &evidence));
        }
    }

    #[test]
    fn most_probable_breaks_ties_toward_later_states() {
        let tied = vec![("F".to_string(), 0.25), ("T".to_string(), 0.25)];
        assert_eq!(most_probable(&tied).as_deref(), Some("T"));
        let skewed = vec![("F".to_string(), 0.75), ("T".to_string(), 0.25)];
        assert_eq!(most_probable(&skewed).as_deref(), Some("F"));
        assert_eq!(most_probable(&[]), None);
    }

    #[test]
    fn describe_sorts_names() {
        let evidence = parse_assignment("wet=T, rain=F").unwrap();
        assert_eq!(describe(&evidence), "rain=F, wet=T");
    }
}
