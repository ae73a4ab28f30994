use serde::{Deserialize, Serialize};

use crate::architecture::component::{ComponentKind, ComponentSpec};
use crate::error::{EngineError, Result};
use crate::level::config::{satisfies_requirement, LevelConfig, SimulationRules};

// Score is kept in whole points (hundredths) so identical chains produce
// bit-identical scores.
const BASE_POINTS: i64 = 60;
const ACTIVATION_POINTS: i64 = 15;
const REGULARIZATION_POINTS: i64 = 10;
const EXTRA_LAYER_POINTS: i64 = 10;
const MAX_EXTRA_LAYERS: usize = 2;
const EXTRA_COMPONENT_POINTS: i64 = 5;
const MAX_EXTRA_COMPONENTS: usize = 2;
const OPERATION_POINTS: i64 = 10;
const MAX_SCORED_OPERATIONS: usize = 2;
const WARNING_PENALTY: i64 = 5;
const MAX_POINTS: i64 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks scoring.
    Error,
    /// Costs points.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: String,
    pub component_id: Option<String>,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    fn new(code: &str, component_id: Option<&str>, message: String, severity: Severity) -> Self {
        ValidationIssue {
            code: code.to_owned(),
            component_id: component_id.map(str::to_owned),
            message,
            severity,
        }
    }

    /// Ordering problems that cost points but do not block scoring.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self.code.as_str(),
            "activation_before_layer" | "regularization_before_layer" | "repeated_activation"
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub success: bool,
    pub score: f64,
    pub message: String,
    /// Nominal input width, then the running width after each component.
    pub layer_sizes: Vec<usize>,
    #[serde(default)]
    pub issues: Vec<ValidationIssue>,
    #[serde(default)]
    pub feedback: Vec<String>,
}

impl SimulationResult {
    /// Unscored outcome carrying only a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        SimulationResult {
            success: false,
            score: 0.0,
            message: message.into(),
            layer_sizes: Vec::new(),
            issues: Vec::new(),
            feedback: Vec::new(),
        }
    }
}

/// Validates, propagates and scores a component chain for `level`.
///
/// Chains that are too short, have no layer, use components outside the
/// level's catalog or miss a required component come back with
/// `success: false` and a corrective message.
/// Only a zero nominal input size is a hard error.
pub fn simulate(components: &[ComponentSpec], level: &LevelConfig) -> Result<SimulationResult> {
    let nominal = level.nominal_input_size();
    if nominal == 0 {
        return Err(EngineError::validation("nominal input size must be at least 1"));
    }
    let rules = &level.simulation;

    let issues = validate_chain(components, level);
    let layer_sizes = propagate_sizes(components, nominal, rules.width_floor);
    let feedback = feedback(components);

    let unscored = |message: String, issues: Vec<ValidationIssue>| SimulationResult {
        success: false,
        score: 0.0,
        message,
        layer_sizes: layer_sizes.clone(),
        issues,
        feedback: feedback.clone(),
    };

    if components.is_empty() {
        return Ok(unscored(
            "No components added yet. Try adding some components from the library!".to_owned(),
            issues,
        ));
    }
    if !components.iter().any(|c| c.kind == ComponentKind::Layer) {
        return Ok(unscored(
            "Your network needs at least one layer component to process data.".to_owned(),
            issues,
        ));
    }
    if components.len() < rules.min_components {
        let missing = rules.min_components - components.len();
        return Ok(unscored(
            format!(
                "Need at least {} components, you have {}: add {} more.",
                rules.min_components,
                components.len(),
                missing
            ),
            issues,
        ));
    }
    let errors: Vec<&str> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .map(|i| i.message.as_str())
        .collect();
    if !errors.is_empty() {
        let message = errors.join("; ");
        return Ok(unscored(message, issues));
    }

    let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();
    let points = score_points(components, level, warnings);
    let score = points as f64 / 100.0;
    let success = score >= rules.target_score;

    let message = if success {
        format!(
            "Excellent network! Your {}-component network reached {}% efficiency.",
            components.len(),
            points
        )
    } else {
        let lacks = |kind| offers(level, kind) && !has_kind(components, kind);
        let mut missing = Vec::new();
        if lacks(ComponentKind::Activation) {
            missing.push("an Activation Function");
        }
        if lacks(ComponentKind::Regularization) {
            missing.push("Regularization such as Dropout");
        }
        if offers(level, ComponentKind::Operation)
            && distinct_operations(components) < MAX_SCORED_OPERATIONS
        {
            missing.push("a Tensor Operation");
        }
        if offers(level, ComponentKind::Layer)
            && count_kind(components, ComponentKind::Layer) < 1 + MAX_EXTRA_LAYERS
        {
            missing.push("another Layer");
        }
        let suggestion = if missing.is_empty() {
            "fewer out-of-order components".to_owned()
        } else {
            missing.join(", ")
        };
        format!(
            "Network needs improvement: {}% efficiency, {}% needed. Consider adding {}.",
            points,
            (rules.target_score * 100.0).round(),
            suggestion
        )
    };

    Ok(SimulationResult { success, score, message, layer_sizes, issues, feedback })
}

/// Checks a chain against the level's catalog and requirements and flags
/// ordering problems. Errors block scoring; warnings cost points.
pub fn validate_chain(components: &[ComponentSpec], level: &LevelConfig) -> Vec<ValidationIssue> {
    let mut issues = catalog_issues(components, level);
    issues.extend(required_issues(components, level));
    issues.extend(ordering_issues(components));
    issues
}

/// Whether the level lets players use `kind`. An empty catalog allows all.
fn offers(level: &LevelConfig, kind: ComponentKind) -> bool {
    level.component_catalog.is_empty() || level.component_catalog.iter().any(|c| c.kind == kind)
}

fn distinct_operations(components: &[ComponentSpec]) -> usize {
    let mut ids: Vec<&str> = components
        .iter()
        .filter(|c| c.kind == ComponentKind::Operation)
        .map(|c| c.id.as_str())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

fn has_kind(components: &[ComponentSpec], kind: ComponentKind) -> bool {
    components.iter().any(|c| c.kind == kind)
}

fn count_kind(components: &[ComponentSpec], kind: ComponentKind) -> usize {
    components.iter().filter(|c| c.kind == kind).count()
}

/// Closed-form efficiency in whole points, clamped to `[0, MAX_POINTS]`.
/// Tensor operations only score on levels that offer them.
fn score_points(components: &[ComponentSpec], level: &LevelConfig, warnings: usize) -> i64 {
    let rules: &SimulationRules = &level.simulation;
    let layers = count_kind(components, ComponentKind::Layer);
    let extra_layers = layers.saturating_sub(1).min(MAX_EXTRA_LAYERS);
    let extra_components = components
        .len()
        .saturating_sub(rules.min_components)
        .min(MAX_EXTRA_COMPONENTS);

    let mut points = BASE_POINTS;
    if has_kind(components, ComponentKind::Activation) {
        points += ACTIVATION_POINTS;
    }
    if has_kind(components, ComponentKind::Regularization) {
        points += REGULARIZATION_POINTS;
    }
    if offers(level, ComponentKind::Operation) {
        let scored = distinct_operations(components).min(MAX_SCORED_OPERATIONS);
        points += OPERATION_POINTS * scored as i64;
    }
    points += EXTRA_LAYER_POINTS * extra_layers as i64;
    points += EXTRA_COMPONENT_POINTS * extra_components as i64;
    points -= WARNING_PENALTY * warnings as i64;
    points.clamp(0, MAX_POINTS)
}

/// Each layer halves the running width down to `floor`; every other kind
/// passes it through.
pub fn propagate_sizes(components: &[ComponentSpec], nominal: usize, floor: usize) -> Vec<usize> {
    let mut sizes = Vec::with_capacity(components.len() + 1);
    let mut running = nominal;
    sizes.push(running);
    for c in components {
        if c.kind == ComponentKind::Layer {
            running = (running / 2).max(floor).min(running);
        }
        sizes.push(running);
    }
    sizes
}

fn catalog_issues(components: &[ComponentSpec], level: &LevelConfig) -> Vec<ValidationIssue> {
    if level.component_catalog.is_empty() {
        return Vec::new();
    }
    components
        .iter()
        .filter_map(|c| match level.catalog_entry(&c.id) {
            None => Some(ValidationIssue::new(
                "unknown_component",
                Some(&c.id),
                format!("'{}' is not available in this level", c.name),
                Severity::Error,
            )),
            Some(entry) if entry.kind != c.kind => Some(ValidationIssue::new(
                "kind_mismatch",
                Some(&c.id),
                format!(
                    "'{}' is a {} component, not {}",
                    c.name,
                    entry.kind.as_str(),
                    c.kind.as_str()
                ),
                Severity::Error,
            )),
            Some(_) => None,
        })
        .collect()
}

fn required_issues(components: &[ComponentSpec], level: &LevelConfig) -> Vec<ValidationIssue> {
    level
        .simulation
        .required_components
        .iter()
        .filter(|required| !components.iter().any(|c| satisfies_requirement(&c.id, required)))
        .map(|required| {
            ValidationIssue::new(
                "missing_required_component",
                Some(required.as_str()),
                format!("Missing required component: {required}"),
                Severity::Error,
            )
        })
        .collect()
}

fn ordering_issues(components: &[ComponentSpec]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_layer = false;
    let mut previous: Option<ComponentKind> = None;

    for c in components {
        match c.kind {
            ComponentKind::Layer => seen_layer = true,
            ComponentKind::Activation if !seen_layer => issues.push(ValidationIssue::new(
                "activation_before_layer",
                Some(&c.id),
                "Activation functions work best after a layer".to_owned(),
                Severity::Warning,
            )),
            ComponentKind::Activation if previous == Some(ComponentKind::Activation) => {
                issues.push(ValidationIssue::new(
                    "repeated_activation",
                    Some(&c.id),
                    "Two activations in a row add nothing; put a layer between them".to_owned(),
                    Severity::Warning,
                ))
            }
            ComponentKind::Regularization if !seen_layer => issues.push(ValidationIssue::new(
                "regularization_before_layer",
                Some(&c.id),
                "Regularization should follow the layer it protects".to_owned(),
                Severity::Warning,
            )),
            _ => {}
        }
        previous = Some(c.kind);
    }
    issues
}

fn feedback(components: &[ComponentSpec]) -> Vec<String> {
    let mut notes = Vec::new();
    notes.push(
        match components.len() {
            0 | 1 => "Great start! Single components are the building blocks of AI.",
            2 | 3 => "Nice architecture! Multiple components allow for more sophisticated processing.",
            _ => "Impressive network depth! Deep networks can learn complex patterns.",
        }
        .to_owned(),
    );
    if has_kind(components, ComponentKind::Activation) {
        notes.push("Activations let the network bend straight lines into curves.".to_owned());
    }
    if has_kind(components, ComponentKind::Regularization) {
        notes.push("Regularization keeps the network from memorising its training data.".to_owned());
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(id: &str) -> ComponentSpec {
        ComponentSpec::new(id, id, ComponentKind::Layer)
    }
    fn act(id: &str) -> ComponentSpec {
        ComponentSpec::new(id, id, ComponentKind::Activation)
    }
    fn reg(id: &str) -> ComponentSpec {
        ComponentSpec::new(id, id, ComponentKind::Regularization)
    }
    fn op(id: &str) -> ComponentSpec {
        ComponentSpec::new(id, id, ComponentKind::Operation)
    }

    fn pattern_level() -> LevelConfig {
        let mut lvl = LevelConfig::new(3, "patterns", 100, &["a", "b"]);
        lvl.component_catalog = vec![
            layer("neural_layer"),
            act("activation_relu"),
            layer("dense_layer"),
            op("tensor_add"),
            op("tensor_multiply"),
        ];
        lvl.simulation.target_score = 0.75;
        lvl.simulation.required_components =
            vec!["neural_layer".into(), "tensor_add".into(), "tensor_multiply".into()];
        lvl
    }

    fn level() -> LevelConfig {
        LevelConfig::new(2, "test", 64, &["a", "b"])
    }

    #[test]
    fn two_components_never_succeed() {
        for chain in [vec![layer("l"), act("a")], vec![layer("l"), layer("m")], vec![reg("r"), layer("l")]] {
            let r = simulate(&chain, &level()).unwrap();
            assert!(!r.success);
            assert_eq!(r.score, 0.0);
            assert!(r.message.contains("add 1 more"));
        }
    }

    #[test]
    fn chain_without_layer_is_rejected() {
        let r = simulate(&[act("a"), reg("r"), act("b")], &level()).unwrap();
        assert!(!r.success);
        assert!(r.message.contains("at least one layer"));
    }

    #[test]
    fn layer_activation_layer_scores_85() {
        let r = simulate(&[layer("l1"), act("a"), layer("l2")], &level()).unwrap();
        assert_eq!(r.score, 0.85);
        assert!(r.success);
        assert_eq!(r.layer_sizes, vec![64, 32, 32, 16]);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn ordering_warnings_cost_points() {
        let r = simulate(&[act("a"), layer("l1"), act("b"), act("c")], &level()).unwrap();
        let codes: Vec<&str> = r.issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["activation_before_layer", "repeated_activation"]);
        // 60 + 15 activation + 5 extra component - 10 warnings
        assert_eq!(r.score, 0.70);
        assert!(!r.success);
    }

    #[test]
    fn score_is_capped() {
        let chain = vec![layer("a"), act("b"), reg("c"), layer("d"), layer("e"), layer("f"), act("g")];
        let r = simulate(&chain, &level()).unwrap();
        assert_eq!(r.score, 0.95);
    }

    #[test]
    fn width_never_drops_below_floor() {
        let sizes = propagate_sizes(&[layer("a"), layer("b"), layer("c")], 6, 2);
        assert_eq!(sizes, vec![6, 3, 2, 2]);
        assert_eq!(propagate_sizes(&[layer("a")], 1, 2), vec![1, 1]);
    }

    #[test]
    fn catalog_mismatches_block_scoring() {
        let mut lvl = level();
        lvl.component_catalog = vec![layer("neural_layer"), act("activation_relu")];
        let chain = vec![
            layer("neural_layer"),
            act("activation_relu"),
            ComponentSpec::new("neural_layer", "Neural", ComponentKind::Regularization),
            layer("laser"),
        ];
        let r = simulate(&chain, &lvl).unwrap();
        assert!(!r.success);
        let codes: Vec<&str> = r.issues.iter().map(|i| i.code.as_str()).collect();
        assert!(codes.contains(&"kind_mismatch"));
        assert!(codes.contains(&"unknown_component"));
    }

    #[test]
    fn zero_nominal_input_is_a_hard_error() {
        let mut lvl = level();
        lvl.nominal_input_size = Some(0);
        let err = simulate(&[layer("l1"), act("a"), layer("l2")], &lvl).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn operations_score_on_levels_that_offer_them() {
        let chain = vec![layer("neural_layer"), op("tensor_add"), op("tensor_multiply")];
        let r = simulate(&chain, &pattern_level()).unwrap();
        // 60 base + 2 x 10 for distinct operations
        assert_eq!(r.score, 0.80);
        assert!(r.success);
        assert!(r.issues.is_empty());

        // Repeating one operation earns it once.
        let mut lvl = pattern_level();
        lvl.simulation.required_components.clear();
        let r = simulate(&[layer("neural_layer"), op("tensor_add"), op("tensor_add")], &lvl).unwrap();
        assert_eq!(r.score, 0.70);
        assert!(!r.success);
    }

    #[test]
    fn missing_required_components_block_scoring() {
        let chain = vec![layer("neural_layer"), act("activation_relu"), layer("dense_layer")];
        let r = simulate(&chain, &pattern_level()).unwrap();
        assert!(!r.success);
        assert_eq!(r.score, 0.0);
        let missing: Vec<Option<&str>> = r
            .issues
            .iter()
            .filter(|i| i.code == "missing_required_component")
            .map(|i| i.component_id.as_deref())
            .collect();
        assert_eq!(missing, vec![Some("tensor_add"), Some("tensor_multiply")]);
        assert!(r.issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn suggestions_only_name_components_the_level_offers() {
        let mut lvl = level();
        lvl.component_catalog = vec![layer("neural_layer"), act("activation_relu"), op("tensor_add")];
        let chain = vec![layer("neural_layer"), layer("neural_layer"), layer("neural_layer")];
        let r = simulate(&chain, &lvl).unwrap();
        assert!(!r.success);
        assert!(r.message.contains("an Activation Function"));
        assert!(r.message.contains("a Tensor Operation"));
        assert!(!r.message.contains("Dropout"));
        assert!(!r.message.contains("another Layer"));
    }

    #[test]
    fn identical_chains_give_identical_results() {
        let chain = vec![layer("l1"), act("a"), reg("r"), layer("l2")];
        assert_eq!(simulate(&chain, &level()).unwrap(), simulate(&chain, &level()).unwrap());
    }
}
