use std::path::PathBuf;

use thiserror::Error;

/// Error type for dataset construction and lookup.
///
/// All failures are terminal: nothing is retried internally and a malformed
/// annotation file fails construction wholesale rather than dropping lines.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The annotation file could not be opened or read at construction.
    #[error("invalid dataset configuration, cannot read `{path}`: {source}")]
    Configuration {
        /// Resolved annotation file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An annotation line could not be parsed.
    #[error("malformed annotation record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the annotation file.
        line: usize,
        /// What failed to parse.
        reason: String,
    },

    /// The image referenced by a record is missing or not decodable.
    #[error("image resource not found at `{path}`: {source}")]
    ResourceNotFound {
        /// Resolved image path.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// The requested index is outside the dataset.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Dataset length.
        len: usize,
    },

    /// Transform outputs could not be stacked into a batch.
    ///
    /// Raised for an empty crop set or for crops of mismatched shapes.
    #[error("cannot stack crops into a batch: {0}")]
    Stack(#[source] ndarray::ShapeError),
}
