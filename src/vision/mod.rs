mod transform;
mod voc;

pub use transform::*;
pub use voc::*;
