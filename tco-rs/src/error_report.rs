use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A failure recorded against a single cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    /// The file name, without its directory.
    pub file_name: String,
    /// A description of what went wrong.
    pub message: String,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File: '{}': {}", self.file_name, self.message)
    }
}

/// An append-only list of per-file failures, shared by every worker of a run.
#[derive(Debug, Default)]
pub struct ErrorReport {
    errors: Mutex<Vec<FileError>>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the failure and appends it to the report.
    pub fn record(&self, file_name: &str, message: impl fmt::Display) {
        let error = FileError {
            file_name: file_name.to_string(),
            message: message.to_string(),
        };
        log::error!("{error}");
        self.lock().push(error);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a copy of the recorded failures, in the order they were recorded.
    pub fn errors(&self) -> Vec<FileError> {
        self.lock().clone()
    }

    pub fn into_errors(self) -> Vec<FileError> {
        self.errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FileError>> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TcoError;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn formats_file_and_message() {
        let report = ErrorReport::new();
        report.record("a.tco", TcoError::UnsupportedLayout(99));
        assert_eq!(
            report.errors()[0].to_string(),
            "File: 'a.tco': TCO Layout (99) is not currently supported"
        );
    }

    #[test]
    fn collects_from_many_threads() {
        let report = Arc::new(ErrorReport::new());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let report = Arc::clone(&report);
                thread::spawn(move || {
                    for i in 0..25 {
                        report.record(&format!("{worker}-{i}.tco"), "failed");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(report.len(), 200);
    }
}
