/// Represents all possible errors that can occur while dumping a TCO texture cache.
///
/// Every variant except [`TcoError::Environment`] is scoped to a single cache file: the
/// pipeline records it against the file name and moves on to the next file.
#[derive(Debug)]
pub enum TcoError {
    /// The input or output directory is missing or could not be created.
    Environment(String),
    /// A read would have run to or past the end of the buffer.
    Truncated(String),
    /// A header carried an unexpected flag or size.
    MalformedHeader(String),
    /// The payload could not be decompressed, or a block-compressed texture could not be decoded.
    DecompressionFailed(String),
    /// The texture descriptor declared a pixel layout that cannot be converted, stores the raw value.
    UnsupportedLayout(i32),
    /// The decoded image could not be written to disk.
    WriteFailed(String),
    /// Represents an error that occurs during I/O operations.
    Io(std::io::Error),
}

impl std::fmt::Display for TcoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TcoError::Environment(err) => write!(f, "{err}"),
            TcoError::Truncated(err) => write!(f, "Truncated data: {err}"),
            TcoError::MalformedHeader(err) => write!(f, "Malformed header: {err}"),
            TcoError::DecompressionFailed(err) => write!(f, "Decompression failed: {err}"),
            TcoError::UnsupportedLayout(layout) => {
                write!(f, "TCO Layout ({layout}) is not currently supported")
            }
            TcoError::WriteFailed(err) => write!(f, "Failed to write image to disk: {err}"),
            TcoError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for TcoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TcoError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TcoError {
    fn from(error: std::io::Error) -> Self {
        TcoError::Io(error)
    }
}
