use clap::{Parser, Subcommand};

use self::{levels::LevelsArg, play::PlayArg, simulate::SimulateArg};

mod levels;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively on stdin/stdout
    Play(#[clap(flatten)] PlayArg),
    /// Play every level with the reference solver and report statistics
    Simulate(#[clap(flatten)] SimulateArg),
    /// Validate a level file and print it with placement counts
    Levels(#[clap(flatten)] LevelsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Levels(arg) => levels::run(&arg)?,
    }
    Ok(())
}
