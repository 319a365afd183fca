use crate::config::{CommandLine, HarnessConfig, Trim};
use crate::error::{BitboardError, Result};
use crate::notation::{parse_divide_line, DivideLine};
use colored::Colorize;
use itertools::{EitherOrBoth, Itertools};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

// Perft comparison harness
//
// Runs an engine's "go perft" and a move generator's divide output for the
// same position, and reports where they disagree. Neither perft
// implementation lives here.

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const USAGE: &str = "perft_diff <depth> [<fen>] [<moves>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerftRequest {
    pub depth: usize,
    pub fen: Option<String>,
    pub moves: Vec<String>,
}

impl PerftRequest {
    pub fn new(depth: usize) -> Self {
        PerftRequest {
            depth,
            fen: None,
            moves: Vec::new(),
        }
    }

    /*
     * Arguments after the program name: depth, then optionally a FEN
     * ("startpos" or "" for the initial position) and the moves, either
     * quoted as one argument or one per argument.
     */
    pub fn from_args(args: &[String]) -> Result<Self> {
        let depth = args
            .first()
            .ok_or_else(|| BitboardError::Usage(USAGE.to_string()))?;
        let depth = depth.trim().parse::<usize>().map_err(|_| {
            BitboardError::Usage(format!("{} (depth '{}' is not a number)", USAGE, depth))
        })?;

        let fen = args
            .get(1)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != "startpos");

        let moves = args
            .iter()
            .skip(2)
            .flat_map(|s| s.split_whitespace())
            .map(String::from)
            .collect();

        Ok(PerftRequest { depth, fen, moves })
    }

    pub fn uci_position(&self) -> String {
        let mut position = match &self.fen {
            Some(fen) => format!("position fen {}", fen),
            None => "position startpos".to_string(),
        };
        if !self.moves.is_empty() {
            position += " moves ";
            position += &self.moves.join(" ");
        }
        position
    }

    pub fn movegen_args(&self) -> Vec<String> {
        let mut args = vec![self.depth.to_string()];
        if self.fen.is_some() || !self.moves.is_empty() {
            args.push(self.fen.clone().unwrap_or_else(|| STARTING_FEN.to_string()));
        }
        if !self.moves.is_empty() {
            args.push(self.moves.join(" "));
        }
        args
    }
}

fn run(command: &CommandLine, extra_args: &[String], input: Option<&str>) -> Result<Vec<String>> {
    info!(
        "Running {} {}",
        command.program,
        command.args.iter().chain(extra_args.iter()).join(" ")
    );

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .args(extra_args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            BitboardError::ProcessError(format!("Failed to spawn '{}': {}", command.program, e))
        })?;

    if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
        debug!("stdin: {:?}", input);
        match stdin.write_all(input.as_bytes()) {
            Ok(()) => {}
            // child exited without reading everything, its status tells the rest
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                warn!("{} closed stdin early", command.program)
            }
            Err(e) => return Err(e.into()),
        }
    }

    let output = child.wait_with_output()?;

    if !output.status.success() {
        return Err(BitboardError::ProcessError(format!(
            "'{}' failed ({}): {}",
            command.program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect();

    debug!("{} printed {} lines", command.program, lines.len());
    Ok(lines)
}

pub fn run_engine(command: &CommandLine, request: &PerftRequest) -> Result<Vec<String>> {
    let input = format!(
        "{}\ngo perft {}\nquit\n",
        request.uci_position(),
        request.depth
    );
    run(command, &[], Some(&input))
}

pub fn run_movegen(command: &CommandLine, request: &PerftRequest) -> Result<Vec<String>> {
    run(command, &request.movegen_args(), None)
}

/*
 * Drop a fixed number of leading and trailing lines.
 */
pub fn trim(lines: &[String], trim: Trim) -> Vec<String> {
    let keep = lines.len().saturating_sub(trim.header + trim.trailer);
    lines.iter().skip(trim.header).take(keep).cloned().collect()
}

/*
 * Rewrite divide lines as "<move>: <nodes>" so both programs' styles compare
 * equal, then sort. Blank lines go; anything else unparsable is kept as is.
 */
pub fn normalize(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match parse_divide_line(line) {
            Ok(DivideLine { mv, nodes }) => format!("{}: {}", mv, nodes),
            Err(e) => {
                warn!("{}", e);
                line.trim().to_string()
            }
        })
        .sorted()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    EngineOnly(String),
    MovegenOnly(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::EngineOnly(line) => write!(f, "< {}", line),
            DiffLine::MovegenOnly(line) => write!(f, "> {}", line),
        }
    }
}

/*
 * Line diff of two sorted listings.
 */
pub fn diff(engine: &[String], movegen: &[String]) -> Vec<DiffLine> {
    engine
        .iter()
        .merge_join_by(movegen.iter(), |a, b| a.cmp(b))
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(_, _) => None,
            EitherOrBoth::Left(line) => Some(DiffLine::EngineOnly(line.clone())),
            EitherOrBoth::Right(line) => Some(DiffLine::MovegenOnly(line.clone())),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub mv: String,
    pub engine: Option<u64>,
    pub movegen: Option<u64>,
}

impl ComparisonRow {
    pub fn matches(&self) -> bool {
        self.engine.is_some() && self.engine == self.movegen
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn engine_total(&self) -> u64 {
        self.rows.iter().filter_map(|row| row.engine).sum()
    }

    pub fn movegen_total(&self) -> u64 {
        self.rows.iter().filter_map(|row| row.movegen).sum()
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.rows.iter().filter(|row| !row.matches())
    }
}

fn divide_counts(lines: &[String]) -> BTreeMap<String, u64> {
    lines
        .iter()
        .filter_map(|line| parse_divide_line(line).ok())
        .map(|DivideLine { mv, nodes }| (mv, nodes))
        .collect()
}

/*
 * Per-move node counts from both sides, ordered by move.
 */
pub fn compare(engine: &[String], movegen: &[String]) -> Comparison {
    let engine = divide_counts(engine);
    let movegen = divide_counts(movegen);

    let rows = engine
        .iter()
        .merge_join_by(movegen.iter(), |(a, _), (b, _)| a.cmp(b))
        .map(|pair| match pair {
            EitherOrBoth::Both((mv, e), (_, m)) => ComparisonRow {
                mv: mv.clone(),
                engine: Some(*e),
                movegen: Some(*m),
            },
            EitherOrBoth::Left((mv, e)) => ComparisonRow {
                mv: mv.clone(),
                engine: Some(*e),
                movegen: None,
            },
            EitherOrBoth::Right((mv, m)) => ComparisonRow {
                mv: mv.clone(),
                engine: None,
                movegen: Some(*m),
            },
        })
        .collect();

    Comparison { rows }
}

fn format_count(count: Option<u64>) -> String {
    count.map_or("-".to_string(), |c| c.to_string())
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Move        Engine     Movegen")?;
        writeln!(f, "----        ------     -------")?;

        for row in self.rows.iter() {
            let line = format!(
                "{:<8}{:>10}{:>12}",
                row.mv,
                format_count(row.engine),
                format_count(row.movegen)
            );
            if row.matches() {
                writeln!(f, "{}", line)?;
            } else {
                writeln!(f, "{}", line.red())?;
            }
        }

        writeln!(
            f,
            "{:<8}{:>10}{:>12}",
            "total",
            self.engine_total(),
            self.movegen_total()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerftReport {
    pub engine: Vec<String>,
    pub movegen: Vec<String>,
    pub diff: Vec<DiffLine>,
    pub comparison: Comparison,
}

impl PerftReport {
    pub fn is_match(&self) -> bool {
        self.diff.is_empty()
    }

    /*
     * Build a report from raw program output.
     */
    pub fn from_output(config: &HarnessConfig, engine: &[String], movegen: &[String]) -> Self {
        let engine = normalize(&trim(engine, config.engine_trim));
        let movegen = normalize(&trim(movegen, config.movegen_trim));
        let diff = diff(&engine, &movegen);
        let comparison = compare(&engine, &movegen);

        PerftReport {
            engine,
            movegen,
            diff,
            comparison,
        }
    }
}

/*
 * Run both programs to completion, one after the other, and compare.
 */
pub fn compare_programs(config: &HarnessConfig, request: &PerftRequest) -> Result<PerftReport> {
    let engine = run_engine(&config.engine, request)?;
    let movegen = run_movegen(&config.movegen, request)?;

    let report = PerftReport::from_output(config, &engine, &movegen);
    info!(
        "Engine {} moves / {} nodes, move generator {} moves / {} nodes, {} differing lines",
        report.engine.len(),
        report.comparison.engine_total(),
        report.movegen.len(),
        report.comparison.movegen_total(),
        report.diff.len()
    );
    Ok(report)
}

#[cfg(test)]
fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
fn lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

#[cfg(test)]
const STOCKFISH_DEPTH_1: &str = "Stockfish 16 by the Stockfish developers (see AUTHORS file)
a2a3: 1
b2b3: 1
g1f3: 1
b1c3: 1

Nodes searched: 4

";

#[cfg(test)]
const MOVEGEN_DEPTH_1: &str = "b1c3 1
g1f3 1
a2a3 1
b2b3 1

4";

#[cfg(test)]
fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_from_args() {
    assert_eq!(
        PerftRequest::from_args(&args(&["3"])).unwrap(),
        PerftRequest::new(3)
    );

    let request = PerftRequest::from_args(&args(&["2", "startpos", "e2e4 e7e5"])).unwrap();
    assert_eq!(request.fen, None);
    assert_eq!(request.moves, vec!["e2e4", "e7e5"]);

    assert!(matches!(PerftRequest::from_args(&[]), Err(BitboardError::Usage(_))));
    assert!(matches!(
        PerftRequest::from_args(&args(&["deep"])),
        Err(BitboardError::Usage(_))
    ));
}

#[test]
fn test_from_args_unquoted_moves() {
    let quoted = PerftRequest::from_args(&args(&["2", "startpos", "e2e4 e7e5 g1f3"])).unwrap();
    let unquoted =
        PerftRequest::from_args(&args(&["2", "startpos", "e2e4", "e7e5", "g1f3"])).unwrap();

    assert_eq!(unquoted, quoted);
    assert_eq!(unquoted.uci_position(), "position startpos moves e2e4 e7e5 g1f3");
}

#[test]
fn test_uci_position() {
    let mut request = PerftRequest::new(1);
    assert_eq!(request.uci_position(), "position startpos");

    request.moves = vec!["e2e4".to_string(), "c7c5".to_string()];
    assert_eq!(request.uci_position(), "position startpos moves e2e4 c7c5");

    request.fen = Some("8/8/8/8/8/8/8/K6k w - - 0 1".to_string());
    assert_eq!(
        request.uci_position(),
        "position fen 8/8/8/8/8/8/8/K6k w - - 0 1 moves e2e4 c7c5"
    );
}

#[test]
fn test_movegen_args() {
    let mut request = PerftRequest::new(4);
    assert_eq!(request.movegen_args(), vec!["4"]);

    request.moves = vec!["e2e4".to_string(), "c7c5".to_string()];
    assert_eq!(request.movegen_args(), vec!["4", STARTING_FEN, "e2e4 c7c5"]);
}

#[test]
fn test_trim() {
    let output = lines(STOCKFISH_DEPTH_1);
    let trimmed = trim(&output, Trim::ENGINE);
    assert_eq!(trimmed, lines("a2a3: 1\nb2b3: 1\ng1f3: 1\nb1c3: 1"));

    assert!(trim(&output, Trim { header: 5, trailer: 5 }).is_empty());
}

#[test]
fn test_normalize_styles_agree() {
    init();

    let engine = normalize(&trim(&lines(STOCKFISH_DEPTH_1), Trim::ENGINE));
    let movegen = normalize(&trim(&lines(MOVEGEN_DEPTH_1), Trim::MOVEGEN));

    assert_eq!(engine, movegen);
    assert_eq!(engine[0], "a2a3: 1");
    assert!(diff(&engine, &movegen).is_empty());
}

#[test]
fn test_diff_reports_both_sides() {
    let engine = lines("a2a3: 20\nb2b3: 20\nc2c3: 20");
    let movegen = lines("a2a3: 20\nb2b3: 21\nd2d3: 20");

    let result: Vec<String> = diff(&engine, &movegen)
        .iter()
        .map(|line| line.to_string())
        .collect();

    assert_eq!(
        result,
        vec!["< b2b3: 20", "> b2b3: 21", "< c2c3: 20", "> d2d3: 20"]
    );
}

#[test]
fn test_diff_keeps_duplicates() {
    let engine = lines("a2a3: 1\na2a3: 1");
    let movegen = lines("a2a3: 1");

    assert_eq!(
        diff(&engine, &movegen),
        vec![DiffLine::EngineOnly("a2a3: 1".to_string())]
    );
}

#[test]
fn test_compare() {
    let engine = lines("a2a3: 20\nb2b3: 20\nc2c3: 20");
    let movegen = lines("a2a3: 20\nb2b3: 21\nd2d3: 20");
    let comparison = compare(&engine, &movegen);

    assert_eq!(comparison.rows.len(), 4);
    assert_eq!(comparison.engine_total(), 60);
    assert_eq!(comparison.movegen_total(), 61);
    assert_eq!(
        comparison.mismatches().map(|row| row.mv.as_str()).collect::<Vec<&str>>(),
        vec!["b2b3", "c2c3", "d2d3"]
    );
    assert_eq!(
        comparison.rows[3],
        ComparisonRow {
            mv: "d2d3".to_string(),
            engine: None,
            movegen: Some(20),
        }
    );
}

#[test]
fn test_comparison_table() {
    let engine = lines("a2a3: 20\nb2b3: 20");
    let table = compare(&engine, &engine).to_string();

    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(rows.len(), 5);
    assert!(rows[2].starts_with("a2a3"));
    assert!(rows[4].starts_with("total"));
    assert!(rows[4].ends_with("40"));
}

#[test]
fn test_report_from_output() {
    let config = HarnessConfig::from_lookup(|_| None).unwrap();
    let report = PerftReport::from_output(
        &config,
        &lines(STOCKFISH_DEPTH_1),
        &lines(MOVEGEN_DEPTH_1),
    );

    assert!(report.is_match());
    assert_eq!(report.comparison.engine_total(), 4);
}
