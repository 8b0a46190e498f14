use std::path::PathBuf;

use planehunt_engine::{LevelSpec, Shape, enumerate_placements};
use serde::Serialize;

use crate::util::{LevelsSource, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LevelsArg {
    #[clap(flatten)]
    levels: LevelsSource,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct LevelSummary<'a> {
    #[serde(flatten)]
    level: &'a LevelSpec,
    valid_placements: usize,
}

pub(crate) fn run(arg: &LevelsArg) -> anyhow::Result<()> {
    let LevelsArg { levels, output } = arg;

    let levels = levels.load()?;
    let summaries = summarize(&levels, &Shape::plane());
    for summary in &summaries {
        if summary.valid_placements == 0 {
            eprintln!(
                "Warning: {} ({}) has no valid placement and cannot be played",
                summary.level,
                summary.level.dimensions()
            );
        }
    }
    eprintln!("{} levels OK", levels.len());

    Output::save_json(&summaries, output.clone())
}

fn summarize<'a>(levels: &'a [LevelSpec], shape: &Shape) -> Vec<LevelSummary<'a>> {
    levels
        .iter()
        .map(|level| LevelSummary {
            level,
            valid_placements: enumerate_placements(level.dimensions(), shape).count(),
        })
        .collect()
}
