use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use planehunt_engine::{
    LevelSpec, PlacementGenerator, PlacementSeed, default_levels, validate_levels,
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .with_context(|| format!("Failed to write newline to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Where the level list comes from.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LevelsSource {
    /// Level file (JSON array of levels); the built-in levels are used if omitted
    #[arg(long = "levels")]
    path: Option<PathBuf>,
}

impl LevelsSource {
    /// Reads and validates the level list.
    pub(crate) fn load(&self) -> anyhow::Result<Vec<LevelSpec>> {
        let levels = match &self.path {
            Some(path) => read_json_file("levels", path)?,
            None => default_levels(),
        };
        validate_levels(&levels).with_context(|| match &self.path {
            Some(path) => format!("Invalid level file: {}", path.display()),
            None => "Invalid built-in levels".to_string(),
        })?;
        tracing::debug!(levels = levels.len(), "levels loaded");
        Ok(levels)
    }
}

/// Builds a placement generator, drawing a random seed when none is given.
pub(crate) fn placement_generator(
    seed: Option<PlacementSeed>,
    max_attempts: Option<usize>,
) -> PlacementGenerator {
    let generator = match seed {
        Some(seed) => PlacementGenerator::with_seed(seed),
        None => PlacementGenerator::new(),
    };
    match max_attempts {
        Some(max_attempts) => generator.with_max_attempts(max_attempts),
        None => generator,
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use planehunt_engine::{DEFAULT_MAX_ATTEMPTS, GridDimensions};

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("planehunt-{}-{name}", process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_levels_when_no_file() {
        let levels = LevelsSource::default().load().unwrap();
        assert_eq!(levels, default_levels());
    }

    #[test]
    fn test_reads_level_file() {
        let path = temp_file(
            "levels.json",
            r#"[{"id":1,"label":"Warmup","rows":5,"cols":6,"optimal_probes":3}]"#,
        );
        let levels = LevelsSource {
            path: Some(path.clone()),
        }
        .load()
        .unwrap();
        fs::remove_file(path).unwrap();

        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].label(), Some("Warmup"));
        assert_eq!(levels[0].dimensions(), GridDimensions::new(5, 6));
    }

    #[test]
    fn test_rejects_invalid_level_file() {
        let path = temp_file(
            "degenerate.json",
            r#"[{"id":1,"rows":4,"cols":5,"optimal_probes":1}]"#,
        );
        let result = LevelsSource {
            path: Some(path.clone()),
        }
        .load();
        fs::remove_file(path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Invalid level file"));
    }

    #[test]
    fn test_rejects_missing_file() {
        let source = LevelsSource {
            path: Some(PathBuf::from("/nonexistent/planehunt/levels.json")),
        };
        assert!(source.load().is_err());
    }

    #[test]
    fn test_placement_generator_options() {
        let seed = PlacementSeed::from_bytes([1; 16]);
        let generator = placement_generator(Some(seed), None);
        assert_eq!(generator.seed(), seed);
        assert_eq!(generator.max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(placement_generator(None, Some(10)).max_attempts(), 10);
    }
}
