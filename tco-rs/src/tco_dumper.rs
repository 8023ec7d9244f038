use crate::dump_config::DumpConfig;
use crate::error::TcoError;
use crate::error_report::ErrorReport;
use crate::tco_file::TcoFile;
use glob::{glob, Pattern};
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::thread;

/// The outcome of a dump run.
#[derive(Debug)]
pub struct DumpSummary {
    /// Number of cache files found in the input directory.
    pub discovered: usize,
    /// Number of images written.
    pub written: usize,
    /// Every per-file failure of the run.
    pub report: ErrorReport,
}

/// Discovers the cache files of an input directory and dumps them in parallel.
///
/// # Usage
///
/// ```no_run
/// use tco_rs::dump_config::DumpConfig;
/// use tco_rs::tco_dumper::TcoDumper;
///
/// let dumper = TcoDumper::open(DumpConfig::new()).unwrap();
/// let summary = dumper.run();
/// for error in summary.report.errors() {
///     println!("{error}");
/// }
/// ```
///
/// # Threading
///
/// The file list is split into contiguous chunks, one per worker, and each worker dumps
/// its chunk in order. There is no work stealing, so one slow file delays only its own
/// worker. The only state shared between workers is the [`ErrorReport`].
#[derive(Debug)]
pub struct TcoDumper {
    config: DumpConfig,
    files: Vec<TcoFile>,
}

impl TcoDumper {
    /// Checks the input directory, creates the output directory and discovers cache files.
    pub fn open(config: DumpConfig) -> Result<Self, TcoError> {
        if !config.input_dir.is_dir() {
            return Err(TcoError::Environment(format!(
                "{} directory did not exist. Make sure the program is running in the game's Cache directory!",
                config.input_dir.display()
            )));
        }

        if !config.output_dir.is_dir() {
            fs::create_dir_all(&config.output_dir).map_err(|e| {
                TcoError::Environment(format!(
                    "Failed to create {} directory ({e})! Make sure the directory has write permissions or create it yourself.",
                    config.output_dir.display()
                ))
            })?;
        }

        let files = Self::discover_files(&config.input_dir, &config.extension)?;
        log::info!("Found {} TCO files", files.len());

        Ok(Self { config, files })
    }

    fn discover_files(input_dir: &Path, extension: &str) -> Result<Vec<TcoFile>, TcoError> {
        let pattern = format!(
            "{}/*.{}",
            Pattern::escape(&input_dir.to_string_lossy()),
            Pattern::escape(extension)
        );
        let entries = glob(&pattern)
            .map_err(|e| TcoError::Environment(format!("Invalid input pattern '{pattern}': {e}")))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| TcoError::Environment(format!("{e}")))?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths.into_iter().map(TcoFile::new).collect())
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// The discovered cache files, sorted by path.
    pub fn files(&self) -> &[TcoFile] {
        &self.files
    }

    /// Dumps every discovered file and waits for all workers to finish.
    pub fn run(&self) -> DumpSummary {
        let report = ErrorReport::new();
        if self.files.is_empty() {
            return DumpSummary {
                discovered: 0,
                written: 0,
                report,
            };
        }

        let workers = self.config.worker_count().min(self.files.len());
        log::info!("Using {workers} threads");

        let output_dir = self.config.output_dir.as_path();
        let written = thread::scope(|scope| {
            let handles: Vec<_> = partition(self.files.len(), workers)
                .into_iter()
                .enumerate()
                .map(|(worker, range)| {
                    log::debug!("Worker {worker} takes files {range:?}");
                    let chunk = &self.files[range];
                    let report = &report;
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .filter(|file| file.process(output_dir, report))
                            .count()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        log::error!("A dump worker panicked, its remaining files were skipped");
                        0
                    })
                })
                .sum::<usize>()
        });

        DumpSummary {
            discovered: self.files.len(),
            written,
            report,
        }
    }
}

/// Splits `len` items into `workers` contiguous ranges whose sizes differ by at most one.
///
/// Empty ranges are left out, so fewer ranges than workers are returned when there are
/// fewer items than workers.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = len / workers;
    let extra = len % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let size = base + usize::from(worker < extra);
        if size == 0 {
            break;
        }
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_every_item_once() {
        for len in 0..40 {
            for workers in 1..12 {
                let ranges = partition(len, workers);
                assert!(ranges.len() <= workers);

                let mut next = 0;
                for range in &ranges {
                    assert_eq!(range.start, next);
                    next = range.end;
                }
                assert_eq!(next, len);

                let sizes: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
                if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
                    assert!(max - min <= 1, "len {len} workers {workers}: {sizes:?}");
                    assert!(*min > 0);
                }
            }
        }
    }

    #[test]
    fn partition_with_zero_workers_uses_one() {
        assert_eq!(partition(5, 0), vec![0..5]);
    }

    #[test]
    fn partition_spreads_remainder_over_first_chunks() {
        assert_eq!(partition(10, 4), vec![0..3, 3..6, 6..8, 8..10]);
    }
}
