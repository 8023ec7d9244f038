use crate::error::TcoError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Represents the settings of a dump run: where cache files are read from, where images
/// are written to, and how many workers share the work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// Directory scanned (non-recursively) for cache files.
    pub input_dir: PathBuf,
    /// Directory receiving one image per decoded cache file, created when missing.
    pub output_dir: PathBuf,
    /// Extension identifying cache files, without the leading dot.
    pub extension: String,
    /// Number of workers, `None` uses the available hardware parallelism.
    pub threads: Option<NonZeroUsize>,
}

impl Default for DumpConfig {
    fn default() -> Self {
        DumpConfig {
            input_dir: PathBuf::from("./Textures"),
            output_dir: PathBuf::from("./Textures_OUT"),
            extension: "tco".to_string(),
            threads: None,
        }
    }
}

impl DumpConfig {
    /// Creates a config with the default directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `key = value` settings from a file over the current values.
    ///
    /// Recognised keys are `input_dir`, `output_dir`, `extension` and `threads`. Blank
    /// lines, `#` comments and unknown keys are ignored.
    ///
    /// # Arguments
    ///
    /// * `file_name` - The path to the configuration file.
    pub fn load<P: AsRef<Path>>(&mut self, file_name: P) -> Result<(), TcoError> {
        let file_name = file_name.as_ref();
        let file = File::open(file_name).map_err(|e| {
            TcoError::Environment(format!(
                "Failed to open config file '{}': {e}",
                file_name.display()
            ))
        })?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((name, value)) = line.split_once('=') {
                self.set(name.trim(), value.trim())?;
            }
        }

        Ok(())
    }

    /// Returns the number of workers to spawn.
    pub fn worker_count(&self) -> usize {
        self.threads
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), TcoError> {
        match name {
            "input_dir" => self.input_dir = PathBuf::from(value),
            "output_dir" => self.output_dir = PathBuf::from(value),
            "extension" => self.extension = value.trim_start_matches('.').to_string(),
            "threads" => {
                let threads = value.parse::<NonZeroUsize>().map_err(|_| {
                    TcoError::Environment(format!("Invalid thread count in config: '{value}'"))
                })?;
                self.threads = Some(threads);
            }
            _ => log::debug!("Ignoring unknown config key '{name}'"),
        }
        Ok(())
    }
}
