pub mod builder;
pub mod synthetic;

pub use builder::{BuiltDataset, Dataset, DatasetBuilder, DropReason, LabeledExample};
pub use synthetic::template_examples;
