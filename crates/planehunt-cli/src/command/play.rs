use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use anyhow::Context as _;
use planehunt_engine::{
    CellKind, Coord, PlacementSeed, Probe, ProbeResult, Round, Session, SessionError, Shape,
};

use crate::util::{self, LevelsSource};

const HELP: &str = "\
Commands:
  <row> <col>  probe a cell (e.g. `2 3`)
  restart      replay the current level with a new placement
  next         continue after a round (advance on pass, retry on fail)
  help         show this message
  quit         exit
Grid: . unprobed, o miss, x hit, H head, # revealed";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    levels: LevelsSource,
    /// Seed for placement generation (32 hex digits)
    #[arg(long)]
    seed: Option<PlacementSeed>,
    /// Placement attempts per round before giving up [default: 2000]
    #[arg(long)]
    max_attempts: Option<usize>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let levels = arg.levels.load()?;
    let generator = util::placement_generator(arg.seed, arg.max_attempts);
    let mut session = Session::new(levels, Shape::plane(), generator)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    play(&mut session, stdin.lock(), &mut stdout)
}

fn play<R, W>(session: &mut Session, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "seed {}", session.seed())?;
    writeln!(out, "{HELP}")?;
    write_round_start(out, session)?;
    prompt(out)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            prompt(out)?;
            continue;
        }
        match line.parse::<Input>() {
            Err(err) => writeln!(out, "{err}")?,
            Ok(Input::Quit) => return Ok(()),
            Ok(Input::Help) => writeln!(out, "{HELP}")?,
            Ok(Input::Probe(coord)) => handle_probe(out, session, coord)?,
            Ok(Input::Restart) => {
                session.restart_current_level()?;
                write_round_start(out, session)?;
            }
            Ok(Input::Next) => {
                let cleared = session
                    .next_round()
                    .map(|state| state.status().is_all_levels_cleared());
                match cleared {
                    Ok(true) => {
                        writeln!(out, "All levels cleared!")?;
                        return Ok(());
                    }
                    Ok(false) => write_round_start(out, session)?,
                    Err(SessionError::RoundInProgress) => {
                        writeln!(out, "The round is still in progress. Find the head first.")?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        prompt(out)?;
    }
    Ok(())
}

fn handle_probe<W>(out: &mut W, session: &mut Session, coord: Coord) -> anyhow::Result<()>
where
    W: Write,
{
    let report = match session.probe(coord) {
        Ok(report) => report,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(());
        }
    };
    match report.probe {
        Probe::Fresh(result) => writeln!(out, "{coord}: {result}")?,
        Probe::Repeated(result) => writeln!(out, "{coord}: already probed ({result})")?,
        Probe::Ignored => {
            writeln!(out, "The round is over. Type `next` to continue.")?;
            return Ok(());
        }
    }
    write_grid(out, session.round())?;

    let round = session.round();
    if let (true, Some(grade)) = (report.probe.is_fresh(), round.grade()) {
        let verdict = if grade.is_passed() { "passed" } else { "failed" };
        writeln!(
            out,
            "Head found in {} probes (par {}): score {}, {verdict}.",
            round.probe_count(),
            round.optimal_probes(),
            grade.score(),
        )?;
        if let Some(placement) = round.revealed_placement() {
            writeln!(out, "Plane: {}", placement.key())?;
        }
        let action = if grade.is_passed() { "continue" } else { "retry" };
        writeln!(out, "Type `next` to {action}.")?;
    }
    Ok(())
}

fn write_round_start<W>(out: &mut W, session: &Session) -> io::Result<()>
where
    W: Write,
{
    let level = session.current_level();
    writeln!(
        out,
        "== {level}: {} grid, par {} ==",
        level.dimensions(),
        level.optimal_probes()
    )?;
    write_grid(out, session.round())
}

fn prompt<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    write!(out, "> ")?;
    out.flush()
}

fn write_grid<W>(out: &mut W, round: &Round) -> io::Result<()>
where
    W: Write,
{
    let dims = round.dimensions();
    let revealed = round.revealed_placement();
    let width = dims.rows().max(dims.cols()).saturating_sub(1).to_string().len();

    write!(out, "{:width$}", "")?;
    for col in 0..dims.cols() {
        write!(out, " {col:>width$}")?;
    }
    writeln!(out)?;
    for row in 0..dims.rows() {
        write!(out, "{row:>width$}")?;
        for col in 0..dims.cols() {
            let coord = Coord::new(row, col);
            let symbol = cell_symbol(
                round.result_at(coord),
                revealed.and_then(|placement| placement.kind_at(coord)),
            );
            write!(out, " {symbol:>width$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn cell_symbol(result: Option<ProbeResult>, revealed: Option<CellKind>) -> char {
    match (result, revealed) {
        (Some(ProbeResult::Miss), _) => 'o',
        (Some(ProbeResult::HitOrdinary), _) => 'x',
        (Some(ProbeResult::HitCritical), _) => 'H',
        (None, Some(_)) => '#',
        (None, None) => '.',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Probe(Coord),
    Restart,
    Next,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
enum ParseInputError {
    #[display("unknown command `{command}`, type `help` for commands")]
    Unknown { command: String },
    #[display("expected `<row> <col>`")]
    Coordinate,
}

impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<_> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|word| !word.is_empty())
            .collect();
        let unknown = || ParseInputError::Unknown {
            command: s.trim().to_owned(),
        };

        match words.as_slice() {
            [word] => match word.to_ascii_lowercase().as_str() {
                "restart" | "r" => Ok(Self::Restart),
                "next" | "n" => Ok(Self::Next),
                "help" | "h" | "?" => Ok(Self::Help),
                "quit" | "q" | "exit" => Ok(Self::Quit),
                _ if word.parse::<usize>().is_ok() => Err(ParseInputError::Coordinate),
                _ => Err(unknown()),
            },
            [row, col] => {
                let row = row.parse().map_err(|_| ParseInputError::Coordinate)?;
                let col = col.parse().map_err(|_| ParseInputError::Coordinate)?;
                Ok(Self::Probe(Coord::new(row, col)))
            }
            _ => Err(unknown()),
        }
    }
}
