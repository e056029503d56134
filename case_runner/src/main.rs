use anyhow::Context;
use block_mover::{
    common::{self, GoalMode},
    problem::Input,
    solver::{self, Answer},
};
use clap::Parser;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
struct Args {
    #[clap(short = 'd', long = "dir")]
    dir: PathBuf,
    #[clap(short = 'o', long = "out")]
    out: Option<PathBuf>,
    #[clap(short = 'g', long = "goal", default_value = "anchor")]
    goal: GoalMode,
    #[clap(short = 'c', long = "comment", default_value = "")]
    comment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Trial {
    time_stamp: String,
    comment: String,
    results: Vec<TestCase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
enum Verdict {
    Accepted,
    WrongAnswer,
    InvalidInput,
    Unchecked,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TestCase {
    name: String,
    answer: String,
    expected: Option<String>,
    route: Option<String>,
    elapsed: String,
    verdict: Verdict,
    message: String,
}

fn main() -> anyhow::Result<()> {
    common::init_logging();
    let args = Args::parse();

    let cases = collect_cases(&args.dir)?;
    info!("{} case(s) found in {}", cases.len(), args.dir.display());

    let results = cases
        .par_iter()
        .map(|path| run_case(path, args.goal))
        .collect::<anyhow::Result<Vec<_>>>()?;

    show_results(&results);

    let failed = results
        .iter()
        .filter(|r| matches!(r.verdict, Verdict::WrongAnswer | Verdict::InvalidInput))
        .count();

    let trial = Trial {
        time_stamp: chrono::Local::now().format("%Y/%m/%d %H:%M:%S").to_string(),
        comment: args.comment,
        results,
    };

    if let Some(out) = &args.out {
        save_trial(out, &trial)?;
    }

    anyhow::ensure!(failed == 0, "{} case(s) failed", failed);

    Ok(())
}

fn collect_cases(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    let mut cases = vec![];

    for entry in entries {
        let path = entry?.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "in" {
            continue;
        }

        cases.push(path);
    }

    anyhow::ensure!(!cases.is_empty(), "No input file found in {}", dir.display());
    cases.sort();

    Ok(cases)
}

fn run_case(path: &Path, goal: GoalMode) -> anyhow::Result<TestCase> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let expected_path = path.with_extension("out");
    let expected = if expected_path.exists() {
        let s = std::fs::read_to_string(&expected_path)
            .with_context(|| format!("failed to read {}", expected_path.display()))?;
        Some(s.trim().to_string())
    } else {
        None
    };

    let since = Instant::now();

    let input = match text.parse::<Input>() {
        Ok(input) => input,
        Err(err) => {
            warn!("{}: {}", name, err);

            return Ok(TestCase {
                name,
                answer: String::new(),
                expected,
                route: None,
                elapsed: format!("{:.3}ms", since.elapsed().as_secs_f64() * 1e3),
                verdict: Verdict::InvalidInput,
                message: err.to_string(),
            });
        }
    };

    let route = solver::solve_input(&input, goal);
    let elapsed = format!("{:.3}ms", since.elapsed().as_secs_f64() * 1e3);
    let answer = Answer::from(route.as_ref()).to_string();

    let verdict = match &expected {
        Some(expected) if *expected == answer => Verdict::Accepted,
        Some(_) => Verdict::WrongAnswer,
        None => Verdict::Unchecked,
    };

    let message = match route {
        Some(_) => String::new(),
        None => "unreachable".to_string(),
    };

    Ok(TestCase {
        name,
        answer,
        expected,
        route: route.map(|r| r.to_string()),
        elapsed,
        verdict,
        message,
    })
}

fn show_results(results: &[TestCase]) {
    for case in results {
        println!(
            "Case: {:>12} | Answer: {:>6} | Expected: {:>6} | {:?} {}",
            case.name,
            case.answer,
            case.expected.as_deref().unwrap_or("-"),
            case.verdict,
            case.message
        );
    }

    let counts = results.iter().counts_by(|r| r.verdict);
    let count = |v: Verdict| counts.get(&v).copied().unwrap_or(0);

    println!(
        "Accepted: {} | WrongAnswer: {} | InvalidInput: {} | Unchecked: {}",
        count(Verdict::Accepted),
        count(Verdict::WrongAnswer),
        count(Verdict::InvalidInput),
        count(Verdict::Unchecked)
    );
}

fn save_trial(path: &Path, trial: &Trial) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, trial)?;

    Ok(())
}
