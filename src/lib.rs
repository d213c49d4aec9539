#![warn(missing_docs)]

//! # VOC Multi-Label Dataset
//!
//! Dataset utilities for multi-label image classification on the Pascal VOC
//! labels-only layout: an annotation file maps image identifiers to the set of
//! categories present in each image, and images live in a `JPEGImages`
//! directory next to it.
//!
//! The core type is [`VocMultiLabelDataset`](vision::VocMultiLabelDataset),
//! which parses the annotation file eagerly into indicator label vectors and
//! decodes, resizes and transforms images lazily on lookup. Image transforms
//! are caller-supplied through the [`Transform`](vision::Transform) trait and
//! may be stochastic.
//!
//! ```no_run
//! use voc_multilabel::vision::{Normalize, Split, VocDatasetConfig};
//! use voc_multilabel::Dataset;
//!
//! let dataset = VocDatasetConfig::new("dataset", Split::Train)
//!     .init(Normalize::imagenet())
//!     .unwrap();
//! let item = dataset.get(0).unwrap();
//! assert_eq!(item.label.len(), 20);
//! ```

/// Dataset abstraction: the [`Dataset`] trait, in-memory storage and iteration.
pub mod dataset;

/// Error types shared across the crate.
pub mod error;

/// Single-image inference driver and the model boundary.
pub mod inference;

/// In-memory scalar metric logger.
pub mod logger;

/// Step-decay learning rate schedule.
pub mod lr_scheduler;

/// Vision datasets and image transforms.
pub mod vision;

pub use dataset::{Dataset, DatasetIterator, InMemDataset};
pub use error::DatasetError;
