pub mod extractor;
pub mod stroke;
pub mod templates;

pub use extractor::{FeatureEncoding, FeatureExtractor, FeatureVector};
pub use stroke::{Point, Stroke};
pub use templates::Shape;
