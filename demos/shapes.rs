use rand::{rngs::StdRng, SeedableRng};

use tensor_forge::architecture::{simulate, ComponentKind, ComponentSpec};
use tensor_forge::dataset::{template_examples, DatasetBuilder};
use tensor_forge::level::LevelCatalog;
use tensor_forge::result::build_training_result;
use tensor_forge::train::{TrainConfig, Trainer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = LevelCatalog::builtin();
    let level = catalog.get(1).ok_or("level 1 missing")?;

    let mut rng = StdRng::seed_from_u64(2024);
    let examples = template_examples(&level.class_labels, 10, &mut rng)?;
    let built = DatasetBuilder::for_level(level)?.build(&examples)?;
    println!("{} examples, {} classes", built.dataset.len(), built.dataset.class_count());

    let mut trainer = Trainer::for_dataset(&built.dataset, TrainConfig::for_level(level), Some(2024));
    let run = trainer.run(&built.dataset)?;
    for p in run.curve.iter().step_by(5) {
        println!("Epoch {}: loss = {:.6}, accuracy = {:.3}", p.epoch, p.loss, p.accuracy);
    }

    let result = build_training_result(trainer.network(), &built.dataset, &run, built.dropped.len());
    println!("{}", result.message);

    let chain = vec![
        ComponentSpec::new("neural_layer", "Neural Layer", ComponentKind::Layer),
        ComponentSpec::new("activation_relu", "ReLU Activation", ComponentKind::Activation),
        ComponentSpec::new("dense_layer", "Dense Layer", ComponentKind::Layer),
    ];
    let level2 = catalog.get(2).ok_or("level 2 missing")?;
    let sim = simulate(&chain, level2)?;
    println!("Sizes {:?} -> score {:.2}: {}", sim.layer_sizes, sim.score, sim.message);
    Ok(())
}
