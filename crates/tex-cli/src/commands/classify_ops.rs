use std::fs;
use std::process;

use serde::Serialize;

use tex_engine::{find_numerator_start, Environment, EnvironmentScanner, LineEnvironment, Position};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Serialize)]
pub struct LineReport {
    pub line: usize,
    /// Environment carried in from the previous line.
    pub start: LineEnvironment,
    /// Environment at the end of the line, before it collapses.
    pub end: Environment,
    /// Environment carried into the next line.
    pub carried: LineEnvironment,
}

#[derive(Debug, Serialize)]
pub struct FractionReport {
    pub slash: usize,
    pub start: usize,
    pub numerator: String,
}

pub fn classify_lines(text: &str) -> Vec<LineReport> {
    let lines: Vec<&str> = text.lines().collect();
    let mut scanner = EnvironmentScanner::new();
    (0..lines.len())
        .map(|line| LineReport {
            line,
            start: scanner.carried_into(&lines[..], line),
            end: scanner.classify_at(&lines[..], line, usize::MAX),
            carried: scanner.line_summary(&lines[..], line),
        })
        .collect()
}

pub fn environment_at(text: &str, pos: Position) -> Environment {
    let lines: Vec<&str> = text.lines().collect();
    EnvironmentScanner::new().classify_at(&lines[..], pos.line, pos.col)
}

/// Parse `LINE:COL` (both zero-based).
pub fn parse_position(s: &str) -> Result<Position, String> {
    let (line, col) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got {s:?}"))?;
    let line = line.trim().parse::<usize>().map_err(|e| format!("bad line {line:?}: {e}"))?;
    let col = col.trim().parse::<usize>().map_err(|e| format!("bad column {col:?}: {e}"))?;
    Ok(Position::new(line, col))
}

pub fn classify(file: &str, at: Option<&str>, json: bool) {
    let text = die!(fs::read_to_string(file), "Error reading {file}: {}");

    if let Some(at) = at {
        let pos = die!(parse_position(at), "Error: {}");
        let env = environment_at(&text, pos);
        if json {
            let out = serde_json::json!({ "line": pos.line, "col": pos.col, "environment": env });
            println!("{out}");
        } else {
            println!("{}:{} {}", pos.line, pos.col, env.as_str());
        }
        return;
    }

    let reports = classify_lines(&text);
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&reports), "Error: {}"));
        return;
    }
    for (report, line) in reports.iter().zip(text.lines()) {
        println!(
            "{:>4}  {:<10} -> {:<18} | {}",
            report.line,
            report.start.as_str(),
            report.end.as_str(),
            line
        );
    }
}

pub fn fraction_report(line: &str, slash: usize) -> Result<FractionReport, tex_engine::FractionError> {
    let start = find_numerator_start(line, slash)?;
    Ok(FractionReport {
        slash,
        start,
        numerator: line.chars().skip(start).take(slash - start).collect(),
    })
}

/// Resolve the numerator for a slash typed at `slash` on `line`. Without
/// `slash`, the last `/` in the line is used.
pub fn fraction(line: &str, slash: Option<usize>, json: bool) {
    let slash = match slash {
        Some(col) => col,
        None => {
            let found = line.chars().enumerate().filter(|&(_, c)| c == '/').last();
            die!(found.map(|(col, _)| col).ok_or("no '/' in line"), "Error: {}")
        }
    };
    let report = die!(fraction_report(line, slash), "Error: {}");
    if json {
        println!("{}", die!(serde_json::to_string(&report), "Error: {}"));
    } else {
        println!("start={} numerator={:?}", report.start, report.numerator);
    }
}
