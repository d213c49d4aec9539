use std::path::Path;

use image::imageops::{self, FilterType};
use log::debug;
use ndarray::{stack, Array1, Array2, Array3, Array4, ArrayView4, Axis};

use crate::vision::{Transform, IMAGE_SIZE};
use crate::DatasetError;

/// The model boundary.
///
/// Implementations take a `[batch, 3, 224, 224]` float batch and return one
/// unnormalized score per category for every batch element, shaped
/// `[batch, NUM_CLASSES]`.
pub trait Classifier {
    /// Runs a forward pass over the batch.
    fn forward(&self, batch: ArrayView4<'_, f32>) -> Array2<f32>;
}

/// Stacks transform outputs along a new leading axis into a batch.
///
/// # Errors
///
/// Returns [`DatasetError::Stack`] if `crops` is empty or the crops have
/// mismatched shapes.
pub fn stack_crops(crops: &[Array3<f32>]) -> Result<Array4<f32>, DatasetError> {
    let views: Vec<_> = crops.iter().map(|crop| crop.view()).collect();
    stack(Axis(0), &views).map_err(DatasetError::Stack)
}

/// Classifies a single image file.
///
/// The image is decoded, converted to RGB, resized to a square of
/// [`IMAGE_SIZE`] with bilinear filtering and transformed `max(crops, 1)`
/// independent times; the stacked batch goes through the classifier and the
/// per-crop scores are averaged into one vector.
///
/// # Errors
///
/// Returns [`DatasetError::ResourceNotFound`] if the file is missing or not
/// decodable, or [`DatasetError::Stack`] if the transform outputs cannot be
/// batched.
pub fn classify_file<C, T, P>(
    classifier: &C,
    path: P,
    transform: &T,
    crops: usize,
) -> Result<Array1<f32>, DatasetError>
where
    C: Classifier,
    T: Transform<Output = Array3<f32>>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| DatasetError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    let image = imageops::resize(&image, IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle);

    let crops = crops.max(1);
    let batch: Vec<Array3<f32>> = (0..crops).map(|_| transform.apply(&image)).collect();
    let batch = stack_crops(&batch)?;

    let scores = classifier.forward(batch.view());
    debug!(
        "classified `{}` with {crops} crops, {} scores per crop",
        path.display(),
        scores.ncols()
    );

    Ok(scores.sum_axis(Axis(0)) / crops as f32)
}
