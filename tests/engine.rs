use rand::{rngs::StdRng, SeedableRng};

use tensor_forge::architecture::{ComponentKind, ComponentSpec, Severity};
use tensor_forge::dataset::{template_examples, LabeledExample};
use tensor_forge::education::HintKind;
use tensor_forge::engine::{self, Engine, HintRequest, SimulateRequest, TrainRequest};
use tensor_forge::features::Shape;
use tensor_forge::level::{LevelCatalog, LevelConfig};
use tensor_forge::EngineError;

fn quick_level() -> LevelConfig {
    let mut level = LevelConfig::new(10, "quick", 16, &["circle", "square", "triangle"]);
    level.max_epochs = 25;
    level
}

fn chain(ids: &[(&str, ComponentKind)]) -> Vec<ComponentSpec> {
    ids.iter().map(|&(id, kind)| ComponentSpec::new(id, id, kind)).collect()
}

#[test]
fn trains_on_builtin_level_end_to_end() {
    let catalog = LevelCatalog::builtin();
    let level = catalog.get(1).unwrap();
    let examples = template_examples(&level.class_labels, 6, &mut StdRng::seed_from_u64(9)).unwrap();
    let engine = Engine::new(catalog.clone());

    let result = engine.train(&TrainRequest::new(examples, 1).with_seed(9)).unwrap();

    assert_eq!(result.examples_used, 18);
    assert_eq!(result.examples_dropped, 0);
    assert!(result.epochs_run >= 1 && result.epochs_run <= level.max_epochs);
    assert_eq!(result.curve.len(), result.epochs_run);
    assert!(result.curve.windows(2).all(|w| w[1].epoch == w[0].epoch + 1));
    assert!((0.0..=1.0).contains(&result.accuracy));
    assert_eq!(result.success, result.accuracy >= level.target_accuracy);
    assert_eq!(result.sample_predictions.len(), 5);
    let firsts: Vec<&str> = result.sample_predictions[..3].iter().map(|s| s.true_label.as_str()).collect();
    assert_eq!(firsts, vec!["circle", "square", "triangle"]);
}

#[test]
fn five_circles_only_still_trains() {
    let examples: Vec<LabeledExample> = (0..5)
        .map(|i| LabeledExample::new(Shape::Circle.stroke(50.0 + i as f64, 50.0, 20.0, 24), "circle"))
        .collect();
    let result = engine::train(&TrainRequest::new(examples, 10).with_seed(1), &quick_level()).unwrap();

    assert_eq!(result.examples_used, 5);
    assert!(!result.curve.is_empty());
    assert!(result.sample_predictions.iter().all(|s| s.true_label == "circle"));
    assert!(result.feedback.iter().any(|f| f.contains("square or triangle")));
}

#[test]
fn unusable_input_is_reported_not_trained() {
    let examples = vec![
        LabeledExample::new(Shape::Circle.stroke(0.0, 0.0, 10.0, 20), "circle"),
        LabeledExample::new(vec![[0.0, 0.0], [1.0, 1.0]], "square"),
        LabeledExample::new(Shape::Square.stroke(0.0, 0.0, 10.0, 20), "pentagon"),
    ];
    let err = engine::train(&TrainRequest::new(examples, 10), &quick_level()).unwrap_err();
    match err {
        EngineError::InsufficientData { needed, found, missing, .. } => {
            assert_eq!((needed, found, missing), (3, 1, 2));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn concurrent_runs_with_one_seed_agree() {
    let level = quick_level();
    let examples = template_examples(&level.class_labels, 4, &mut StdRng::seed_from_u64(5)).unwrap();
    let request = TrainRequest::new(examples, 10).with_seed(77);

    let (a, b) = std::thread::scope(|s| {
        let a = s.spawn(|| engine::train(&request, &level).unwrap());
        let b = s.spawn(|| engine::train(&request, &level).unwrap());
        (a.join().unwrap(), b.join().unwrap())
    });
    assert_eq!(a, b);
}

#[test]
fn layer_activation_layer_is_reproducible() {
    let engine = Engine::default();
    let request = SimulateRequest {
        components: chain(&[
            ("neural_layer", ComponentKind::Layer),
            ("activation_relu", ComponentKind::Activation),
            ("dense_layer", ComponentKind::Layer),
        ]),
        level_id: 2,
    };
    let first = engine.simulate(&request).unwrap();
    let second = engine.simulate(&request).unwrap();

    assert_eq!(first.score.to_bits(), second.score.to_bits());
    assert_eq!(first, second);
    assert_eq!(first.score, 0.85);
    assert!(first.success);
    assert_eq!(first.layer_sizes, vec![100, 50, 50, 25]);
}

#[test]
fn two_component_chains_fail_on_every_level() {
    let engine = Engine::default();
    for level_id in engine.catalog().ids() {
        let request = SimulateRequest {
            components: chain(&[("neural_layer", ComponentKind::Layer), ("activation_relu", ComponentKind::Activation)]),
            level_id,
        };
        assert!(!engine.simulate(&request).unwrap().success, "level {level_id}");
    }
}

#[test]
fn components_outside_the_level_are_flagged() {
    let engine = Engine::default();
    let request = SimulateRequest {
        components: chain(&[
            ("neural_layer", ComponentKind::Layer),
            ("activation_relu", ComponentKind::Activation),
            ("dropout", ComponentKind::Regularization),
        ]),
        level_id: 1,
    };
    let result = engine.simulate(&request).unwrap();
    assert!(!result.success);
    let issue = result.issues.iter().find(|i| i.severity == Severity::Error).unwrap();
    assert_eq!(issue.component_id.as_deref(), Some("dropout"));
}

#[test]
fn unknown_level_differs_between_train_and_simulate() {
    let engine = Engine::default();
    assert!(matches!(
        engine.train(&TrainRequest::new(Vec::new(), 0)),
        Err(EngineError::Validation(_))
    ));
    let result = engine
        .simulate(&SimulateRequest { components: Vec::new(), level_id: 0 })
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.score, 0.0);
}

#[test]
fn catalog_round_trips_through_json() {
    let catalog = LevelCatalog::builtin();
    let json = serde_json::to_string(&catalog).unwrap();
    assert_eq!(LevelCatalog::from_json_str(&json).unwrap(), catalog);

    let dup = r#"{"levels": [
        {"id": 1, "title": "a", "feature_length": 16, "class_labels": ["x"]},
        {"id": 1, "title": "b", "feature_length": 16, "class_labels": ["y"]}
    ]}"#;
    assert!(LevelCatalog::from_json_str(dup).is_err());
}

#[test]
fn tensor_operation_chain_passes_pattern_level() {
    let engine = Engine::default();
    let request = SimulateRequest {
        components: chain(&[
            ("neural_layer", ComponentKind::Layer),
            ("tensor_add", ComponentKind::Operation),
            ("tensor_multiply", ComponentKind::Operation),
        ]),
        level_id: 3,
    };
    let result = engine.simulate(&request).unwrap();
    assert!(result.success, "{}", result.message);
    assert_eq!(result.score, 0.80);
    assert!(!result.message.contains("Dropout"));
}

#[test]
fn hints_get_more_direct_with_attempts() {
    let engine = Engine::default();
    let partial = chain(&[("neural_layer", ComponentKind::Layer)]);
    let ask = |attempt_count| {
        engine
            .hint(&HintRequest { level_id: 3, components: Some(partial.clone()), attempt_count })
            .unwrap()
    };

    let first = ask(1);
    let fifth = ask(5);
    assert_eq!(first.kind, HintKind::Structure);
    assert_eq!((first.difficulty, fifth.difficulty), (1, 5));
    assert_eq!(first.visual_highlight, fifth.visual_highlight);
    assert_ne!(first.content, fifth.content);
    assert_eq!(ask(12).difficulty, 5);
}

