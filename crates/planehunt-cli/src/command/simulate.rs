use std::path::PathBuf;

use anyhow::Context as _;
use planehunt_engine::{
    LevelSpec, PlacementGenerator, PlacementSeed, Round, Shape, Solver, enumerate_placements,
};
use planehunt_stats::{
    descriptive::DescriptiveStats,
    percentiles::{percentile, rate},
};
use serde::Serialize;

use crate::util::{self, LevelsSource, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    levels: LevelsSource,
    /// Number of rounds to play on each level
    #[arg(long, default_value_t = 1000)]
    rounds: usize,
    /// Seed for placement generation (32 hex digits)
    #[arg(long)]
    seed: Option<PlacementSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: PlacementSeed,
    rounds_per_level: usize,
    levels: Vec<LevelReport>,
}

#[derive(Debug, Serialize)]
struct LevelReport {
    #[serde(flatten)]
    level: LevelSpec,
    valid_placements: usize,
    passed: usize,
    pass_rate: Option<f64>,
    mean_score: Option<f64>,
    probes: Option<ProbeSummary>,
}

#[derive(Debug, Serialize)]
struct ProbeSummary {
    min: u32,
    max: u32,
    mean: f64,
    median: f64,
    std_dev: f64,
    p90: u32,
}

impl ProbeSummary {
    fn new(mut probe_counts: Vec<u32>) -> Option<Self> {
        probe_counts.sort_unstable();
        let stats = DescriptiveStats::from_sorted(&probe_counts)?;
        Some(Self {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
            p90: percentile(&probe_counts, 90.0)?,
        })
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        levels,
        rounds,
        seed,
        output,
    } = arg;

    let levels = levels.load()?;
    let mut generator = util::placement_generator(*seed, None);
    let seed = generator.seed();
    eprintln!("Simulating {rounds} rounds per level (seed {seed})");

    let shape = Shape::plane();
    let mut reports = Vec::with_capacity(levels.len());
    for level in levels {
        eprintln!("Simulating {level}...");
        let report = simulate_level(level, &shape, &mut generator, *rounds)?;
        eprintln!(
            "  passed {}/{rounds}, mean score {}",
            report.passed,
            report
                .mean_score
                .map_or_else(|| "-".to_string(), |score| format!("{score:.1}"))
        );
        reports.push(report);
    }

    let report = SimulationReport {
        seed,
        rounds_per_level: *rounds,
        levels: reports,
    };
    Output::save_json(&report, output.clone())
}

fn simulate_level(
    level: LevelSpec,
    shape: &Shape,
    generator: &mut PlacementGenerator,
    rounds: usize,
) -> anyhow::Result<LevelReport> {
    let dimensions = level.dimensions();
    let solver = Solver::new(dimensions, shape);
    let mut probe_counts = Vec::with_capacity(rounds);
    let mut scores = Vec::with_capacity(rounds);
    let mut passed = 0;

    for _ in 0..rounds {
        let placement = generator
            .generate(dimensions, shape)
            .with_context(|| format!("Failed to place a plane on {level}"))?;
        let mut round = Round::new(dimensions, level.optimal_probes(), placement);
        let grade = solver
            .clone()
            .solve(&mut round)
            .with_context(|| format!("Solver did not finish a round on {level}"))?;
        probe_counts.push(round.probe_count());
        scores.push(u32::from(grade.score()));
        if grade.is_passed() {
            passed += 1;
        }
    }

    Ok(LevelReport {
        valid_placements: enumerate_placements(dimensions, shape).count(),
        passed,
        pass_rate: rate(passed, rounds),
        mean_score: DescriptiveStats::new(scores).map(|stats| stats.mean),
        probes: ProbeSummary::new(probe_counts),
        level,
    })
}
