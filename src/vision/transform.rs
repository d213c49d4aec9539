use image::{imageops, RgbImage};
use ndarray::Array3;
use rand::Rng;

/// Per-channel mean used to train most ImageNet models.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Per-channel standard deviation used to train most ImageNet models.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// A caller-supplied image transform.
///
/// Transforms are opaque to the dataset and may be stochastic; the dataset
/// applies them fresh on every lookup and never memoizes their output.
pub trait Transform: Send + Sync {
    /// Output of the transform.
    type Output: Send + Sync;

    /// Applies the transform to the given image.
    fn apply(&self, image: &RgbImage) -> Self::Output;
}

/// Flips the image horizontally with the given probability.
#[derive(Debug, Clone)]
pub struct RandomHorizontalFlip {
    probability: f64,
}

impl RandomHorizontalFlip {
    /// Creates a new random horizontal flip.
    ///
    /// `probability` must be in `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl Default for RandomHorizontalFlip {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Transform for RandomHorizontalFlip {
    type Output = RgbImage;

    fn apply(&self, image: &RgbImage) -> RgbImage {
        if rand::thread_rng().gen_bool(self.probability) {
            imageops::flip_horizontal(image)
        } else {
            image.clone()
        }
    }
}

/// Converts an image to a `[3, height, width]` float array scaled to `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct ToTensor;

impl Transform for ToTensor {
    type Output = Array3<f32>;

    fn apply(&self, image: &RgbImage) -> Array3<f32> {
        let (width, height) = image.dimensions();
        Array3::from_shape_fn(
            (3, height as usize, width as usize),
            |(channel, y, x)| image.get_pixel(x as u32, y as u32)[channel] as f32 / 255.0,
        )
    }
}

/// Converts an image to a `[3, height, width]` float array and normalizes
/// each channel with the given mean and standard deviation.
#[derive(Debug, Clone)]
pub struct Normalize {
    mean: [f32; 3],
    std: [f32; 3],
}

impl Normalize {
    /// Creates a new normalization transform.
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Self {
        Self { mean, std }
    }

    /// Creates a normalization transform with the ImageNet statistics.
    pub fn imagenet() -> Self {
        Self::new(IMAGENET_MEAN, IMAGENET_STD)
    }
}

impl Transform for Normalize {
    type Output = Array3<f32>;

    fn apply(&self, image: &RgbImage) -> Array3<f32> {
        let mut tensor = ToTensor.apply(image);
        for (channel, mut plane) in tensor.outer_iter_mut().enumerate() {
            plane.mapv_inplace(|x| (x - self.mean[channel]) / self.std[channel]);
        }
        tensor
    }
}

/// Chains an image-to-image transform with a second transform.
#[derive(Debug, Clone)]
pub struct Compose<A, B> {
    first: A,
    second: B,
}

impl<A, B> Compose<A, B> {
    /// Creates a new composed transform applying `first` then `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Transform for Compose<A, B>
where
    A: Transform<Output = RgbImage>,
    B: Transform,
{
    type Output = B::Output;

    fn apply(&self, image: &RgbImage) -> B::Output {
        self.second.apply(&self.first.apply(image))
    }
}
