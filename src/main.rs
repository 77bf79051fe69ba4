use clap::Parser;
use env_logger::Env;
use graphmatch::analysis::{analyze, AnalysisConfig};
use graphmatch::error::GraphError;
use graphmatch::graph::{parse_adjacency_matrix, Graph, MAX_VERTICES};
use graphmatch::matching::SearchLimits;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Matrix analyzed by `--example`.
const EXAMPLE_MATRIX: &str = include_str!("../data/example.txt");

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Finds maximal, maximum and perfect matchings and an Eulerian path of an undirected graph.",
    long_about = "Finds maximal, maximum and perfect matchings and an Eulerian path of an undirected graph.\n\n\
        The graph is an adjacency matrix: one row per line, entries 0 or 1 separated by commas, \
        for example:\n\n  0,1,1,0\n  1,0,1,1\n  1,1,0,1\n  0,1,1,0\n\n\
        The matrix must be square and symmetric with a zero diagonal."
)]
struct Cli {
    /// Adjacency matrix file; `-` or no argument reads standard input
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Analyze the bundled example matrix
    #[arg(long, conflicts_with_all = ["input", "random"])]
    example: bool,

    /// Analyze a random G(N, p) graph instead of reading a matrix
    #[arg(long, value_name = "N", conflicts_with = "input", value_parser = parse_vertex_count)]
    random: Option<usize>,

    /// Edge probability for --random
    #[arg(long, default_value_t = 0.5, requires = "random", value_parser = parse_probability)]
    p: f64,

    /// Deterministic seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Write the analyzed matrix to PATH
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Also list every matching
    #[arg(long)]
    all_matchings: bool,

    /// Reject graphs with more edges than this
    #[arg(long, default_value_t = SearchLimits::default().max_edges)]
    max_edges: usize,

    /// Fail --all-matchings beyond this many matchings
    #[arg(long, default_value_t = SearchLimits::default().max_matchings)]
    max_matchings: usize,
}

impl Cli {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            limits: SearchLimits {
                max_edges: self.max_edges,
                max_matchings: self.max_matchings,
            },
            enumerate_all: self.all_matchings,
        }
    }

    fn load_graph(&self) -> Result<Graph, GraphError> {
        if self.example {
            return Ok(parse_adjacency_matrix(EXAMPLE_MATRIX)?);
        }
        if let Some(n) = self.random {
            let seed = self.seed.unwrap_or_else(rand::random);
            log::info!("generating G({n}, {}) with seed {seed}", self.p);
            let mut rng = SmallRng::seed_from_u64(seed);
            return Ok(Graph::random(&mut rng, n, self.p));
        }
        match &self.input {
            Some(path) if path.as_os_str() != "-" => Graph::load_from_file(path),
            _ => {
                let text = io::read_to_string(io::stdin())?;
                Ok(parse_adjacency_matrix(&text)?)
            }
        }
    }
}

fn parse_vertex_count(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n > MAX_VERTICES {
        return Err(format!("at most {MAX_VERTICES} vertices are supported"));
    }
    Ok(n)
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=1.0).contains(&p) {
        return Err("probability must be in [0, 1]".to_string());
    }
    Ok(p)
}

fn run(cli: &Cli) -> Result<(), GraphError> {
    let graph = cli.load_graph()?;
    if let Some(path) = &cli.save {
        graph.save_to_file(path)?;
        log::info!("saved matrix to {}", path.display());
    }
    if cli.random.is_some() {
        print!("{graph}");
    }
    let report = analyze(&graph, &cli.config())?;
    print!("{report}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn example_matrix_parses() {
        let graph = parse_adjacency_matrix(EXAMPLE_MATRIX).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn random_flags_build_config() {
        let cli = Cli::try_parse_from([
            "graphmatch",
            "--random",
            "8",
            "--p",
            "0.3",
            "--seed",
            "7",
            "--all-matchings",
            "--max-edges",
            "20",
        ])
        .unwrap();
        let cfg = cli.config();
        assert!(cfg.enumerate_all);
        assert_eq!(cfg.limits.max_edges, 20);
        assert_eq!(cfg.limits.max_matchings, SearchLimits::default().max_matchings);

        let first = cli.load_graph().unwrap();
        let second = cli.load_graph().unwrap();
        assert_eq!(first.vertex_count(), 8);
        assert_eq!(first, second);
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("graphmatch_cli_{}_{name}", std::process::id()))
    }

    #[test]
    fn loads_matrix_from_file() {
        let path = temp_path("cycle.txt");
        std::fs::write(&path, "0,1,0,1\n1,0,1,0\n0,1,0,1\n1,0,1,0\n").unwrap();
        let cli = Cli::try_parse_from(["graphmatch", path.to_str().unwrap()]).unwrap();
        let graph = cli.load_graph();
        std::fs::remove_file(&path).unwrap();

        let graph = graph.unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edges(), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn saved_matrix_reloads_to_same_graph() {
        let path = temp_path("saved.txt");
        let cli = Cli::try_parse_from([
            "graphmatch",
            "--random",
            "9",
            "--seed",
            "11",
            "--save",
            path.to_str().unwrap(),
        ])
        .unwrap();
        run(&cli).unwrap();
        let reloaded = Graph::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(reloaded.unwrap(), cli.load_graph().unwrap());
    }

    #[test]
    fn malformed_file_is_invalid_input() {
        let path = temp_path("ragged.txt");
        std::fs::write(&path, "0,1,0\n1,0\n0,1,0\n").unwrap();
        let cli = Cli::try_parse_from(["graphmatch", path.to_str().unwrap()]).unwrap();
        let loaded = cli.load_graph();
        let result = run(&cli);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(loaded, Err(GraphError::InvalidInput(_))));
        assert!(matches!(result, Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let cli = Cli::try_parse_from(["graphmatch", "/nonexistent/graphmatch/matrix.txt"]).unwrap();
        assert!(matches!(run(&cli), Err(GraphError::Io(_))));
    }

    #[test]
    fn dash_selects_stdin() {
        let cli = Cli::try_parse_from(["graphmatch", "-"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("-")));
        assert!(cli.random.is_none() && !cli.example);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["graphmatch", "--random", "65"]).is_err());
        assert!(Cli::try_parse_from(["graphmatch", "--random", "5", "--p", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["graphmatch", "--p", "0.5"]).is_err());
        assert!(Cli::try_parse_from(["graphmatch", "--example", "matrix.txt"]).is_err());
    }
}
