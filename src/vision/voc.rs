use std::fs;
use std::path::PathBuf;

use image::imageops::{self, FilterType};
use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::Transform;
use crate::{Dataset, DatasetError, InMemDataset};

/// Pascal VOC category vocabulary, in declaration order.
///
/// The vocabulary is closed and immutable; a category's index is its position
/// in this array.
pub const CLASSES: [&str; 20] = [
    "person",
    "bird",
    "cat",
    "cow",
    "dog",
    "horse",
    "sheep",
    "aeroplane",
    "bicycle",
    "boat",
    "bus",
    "car",
    "motorbike",
    "train",
    "bottle",
    "chair",
    "diningtable",
    "pottedplant",
    "sofa",
    "tvmonitor",
];

/// Number of categories in the vocabulary.
pub const NUM_CLASSES: usize = CLASSES.len();

/// Side length of the square raster handed to transforms.
pub const IMAGE_SIZE: u32 = 224;

const ANNOTATION_FILE: &str = "annotations.txt";
const IMAGE_DIR: &str = "JPEGImages";

/// Returns the index of a category name in the vocabulary, if present.
pub fn class_index(name: &str) -> Option<usize> {
    CLASSES.iter().position(|class| *class == name)
}

/// Dataset split.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training split.
    Train,
    /// Test split.
    Test,
}

impl Split {
    /// Name of the split directory under the dataset root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

/// One parsed annotation line: an image identifier and its indicator label
/// vector of length [`NUM_CLASSES`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    /// Image identifier, without extension.
    pub name: String,
    /// Indicator vector with 1.0 at the positions of present categories.
    pub label: Array1<f32>,
}

/// Transformed image part of a [VOC item](VocItem).
#[derive(Debug, Clone, PartialEq)]
pub enum Crops<O> {
    /// The transform was applied once (`random_crops == 0`).
    Single(O),
    /// The transform was applied `random_crops` times to the same raster;
    /// outputs are stacked along a new leading axis.
    Stacked(Vec<O>),
}

/// Item returned by the [VOC dataset](VocMultiLabelDataset).
#[derive(Debug, Clone, PartialEq)]
pub struct VocItem<O> {
    /// Transformed image.
    pub image: Crops<O>,
    /// Indicator label vector of length [`NUM_CLASSES`].
    pub label: Array1<f32>,
}

/// Configuration for a [VOC dataset](VocMultiLabelDataset).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VocDatasetConfig {
    /// Dataset root directory.
    root: PathBuf,
    /// Split to load.
    split: Split,
    /// Number of independent transform applications per lookup.
    /// 0 means "apply the transform once". Default: 0.
    #[serde(default)]
    random_crops: usize,
}

impl VocDatasetConfig {
    /// Creates a configuration for the given root directory and split.
    pub fn new<P: Into<PathBuf>>(root: P, split: Split) -> Self {
        Self {
            root: root.into(),
            split,
            random_crops: 0,
        }
    }

    /// Sets the number of independent transform applications per lookup,
    /// used for test-time multi-crop averaging.
    pub fn with_random_crops(mut self, random_crops: usize) -> Self {
        self.random_crops = random_crops;
        self
    }

    /// Initializes a [VOC dataset](VocMultiLabelDataset) with the given
    /// transform, parsing the split's annotation file eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Configuration`] if the annotation file cannot
    /// be read, or [`DatasetError::MalformedRecord`] if any line fails to
    /// parse. Image presence is not checked here; a missing image surfaces on
    /// lookup as [`DatasetError::ResourceNotFound`].
    pub fn init<T: Transform>(self, transform: T) -> Result<VocMultiLabelDataset<T>, DatasetError> {
        VocMultiLabelDataset::new(self, transform)
    }
}

/// Multi-label image classification dataset on the VOC labels-only layout.
///
/// Expected directory tree:
///
/// ```text
/// <root>/<split>/annotations.txt
/// <root>/<split>/JPEGImages/<identifier>.jpg
/// ```
///
/// Each annotation line holds an identifier followed by zero or more category
/// indices. Records are parsed once at construction, in file order, into
/// indicator label vectors; lookups decode the image, resize it to a
/// [`IMAGE_SIZE`]-sided square with bilinear filtering and apply the
/// caller-supplied transform. Labels may name zero, one or several categories
/// per image; the vector encodes set membership, not a single class.
#[derive(Debug)]
pub struct VocMultiLabelDataset<T> {
    records: InMemDataset<AnnotationRecord>,
    image_dir: PathBuf,
    transform: T,
    random_crops: usize,
}

impl<T: Transform> VocMultiLabelDataset<T> {
    fn new(config: VocDatasetConfig, transform: T) -> Result<Self, DatasetError> {
        let split_dir = config.root.join(config.split.dir_name());
        let annotation_file = split_dir.join(ANNOTATION_FILE);

        let content =
            fs::read_to_string(&annotation_file).map_err(|source| DatasetError::Configuration {
                path: annotation_file.clone(),
                source,
            })?;

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            records.push(parse_record(line, index + 1)?);
        }

        debug!(
            "loaded {} annotation records from `{}`",
            records.len(),
            annotation_file.display()
        );

        Ok(Self {
            records: InMemDataset::new(records),
            image_dir: split_dir.join(IMAGE_DIR),
            transform,
            random_crops: config.random_crops,
        })
    }

    /// Returns the identifier stored for the given index.
    pub fn identifier(&self, index: usize) -> Result<String, DatasetError> {
        self.records.get(index).map(|record| record.name)
    }

    /// Returns the label vector stored for the given index, as parsed at
    /// construction.
    pub fn label(&self, index: usize) -> Result<Array1<f32>, DatasetError> {
        self.records.get(index).map(|record| record.label)
    }
}

/// Parses one non-empty annotation line.
fn parse_record(line: &str, line_number: usize) -> Result<AnnotationRecord, DatasetError> {
    let mut tokens = line.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| DatasetError::MalformedRecord {
            line: line_number,
            reason: "missing identifier".to_string(),
        })?;

    let mut label = Array1::zeros(NUM_CLASSES);
    for token in tokens {
        let index: usize = token
            .parse()
            .map_err(|_| DatasetError::MalformedRecord {
                line: line_number,
                reason: format!("invalid category index `{token}`"),
            })?;
        if index >= NUM_CLASSES {
            return Err(DatasetError::MalformedRecord {
                line: line_number,
                reason: format!("category index {index} outside [0, {NUM_CLASSES})"),
            });
        }
        label[index] = 1.0;
    }

    Ok(AnnotationRecord {
        name: name.to_string(),
        label,
    })
}

impl<T: Transform> Dataset<VocItem<T::Output>> for VocMultiLabelDataset<T> {
    fn get(&self, index: usize) -> Result<VocItem<T::Output>, DatasetError> {
        let record = self.records.get(index)?;

        let path = self.image_dir.join(format!("{}.jpg", record.name));
        let image = image::open(&path)
            .map_err(|source| DatasetError::ResourceNotFound {
                path: path.clone(),
                source,
            })?
            .into_rgb8();

        // Unconditional square resize; any crop/scale augmentation belongs to
        // the supplied transform.
        let image = imageops::resize(&image, IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle);

        let image = if self.random_crops == 0 {
            Crops::Single(self.transform.apply(&image))
        } else {
            Crops::Stacked(
                (0..self.random_crops)
                    .map(|_| self.transform.apply(&image))
                    .collect(),
            )
        };

        Ok(VocItem {
            image,
            label: record.label,
        })
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
