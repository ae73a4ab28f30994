use rand::Rng;

use crate::dataset::builder::LabeledExample;
use crate::error::{EngineError, Result};
use crate::features::templates::Shape;

const TEMPLATE_POINTS: usize = 32;

/// `per_class` jittered template drawings for every label, interleaved by
/// class so any prefix stays balanced.
///
/// # Errors
/// `Validation` if a label has no drawable template.
pub fn template_examples<R: Rng + ?Sized>(
    labels: &[String],
    per_class: usize,
    rng: &mut R,
) -> Result<Vec<LabeledExample>> {
    let shapes = labels
        .iter()
        .map(|label| {
            Shape::from_label(label)
                .ok_or_else(|| EngineError::validation(format!("no template for label '{label}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut examples = Vec::with_capacity(shapes.len() * per_class);
    for _ in 0..per_class {
        for shape in &shapes {
            examples.push(LabeledExample::new(shape.jittered(rng, TEMPLATE_POINTS), shape.label()));
        }
    }
    Ok(examples)
}
