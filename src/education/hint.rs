use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::architecture::component::{ComponentKind, ComponentSpec};
use crate::architecture::simulator::{validate_chain, ValidationIssue};
use crate::level::config::{satisfies_requirement, LevelConfig};

const MAX_DIFFICULTY: u8 = 5;

const ENCOURAGEMENTS: [&str; 5] = [
    "You're on the right track! Try fine-tuning your approach.",
    "Great progress! Your AI architecture looks promising.",
    "Almost there! Consider if any components could work better together.",
    "Nice work! Your network structure shows good understanding.",
    "Excellent attempt! Small adjustments might give you that extra boost.",
];

const FALLBACK: &str = "Try experimenting with different components from the library!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Concept,
    Structure,
    Encouragement,
    General,
}

/// One piece of advice. `difficulty` runs from 1 (gentle nudge) to 5 (the
/// answer spelled out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub difficulty: u8,
    /// Component id the UI may highlight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_highlight: Option<String>,
}

impl Hint {
    fn new(content: impl Into<String>, kind: HintKind, difficulty: u8) -> Self {
        Hint { content: content.into(), kind, difficulty, visual_highlight: None }
    }
}

/// What is wrong with an attempt, most pressing first within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintAnalysis {
    pub missing_components: Vec<String>,
    pub concept_gaps: Vec<String>,
    pub misordered: Vec<String>,
    pub attempt_count: u32,
}

/// Hints get more direct with every attempt, up to 5.
pub fn difficulty_for(attempt_count: u32) -> u8 {
    attempt_count.clamp(1, MAX_DIFFICULTY as u32) as u8
}

pub fn analyze(
    components: &[ComponentSpec],
    issues: &[ValidationIssue],
    level: &LevelConfig,
    attempt_count: u32,
) -> HintAnalysis {
    let mut analysis = HintAnalysis { attempt_count, ..HintAnalysis::default() };

    for issue in issues {
        let target = issue.component_id.clone().unwrap_or_default();
        if issue.code == "missing_required_component" {
            analysis.missing_components.push(target);
        } else if issue.is_ordering() {
            analysis.misordered.push(target);
        }
    }

    match components.len() {
        0 => analysis.concept_gaps.push("basic_assembly".to_owned()),
        1 => analysis.concept_gaps.push("network_depth".to_owned()),
        _ => {}
    }
    let has = |kind: ComponentKind| components.iter().any(|c| c.kind == kind);
    for concept in &level.concepts {
        let gap = match concept.as_str() {
            "neural_networks" => !has(ComponentKind::Layer),
            "activation" => !has(ComponentKind::Activation),
            _ => false,
        };
        if gap {
            analysis.concept_gaps.push(concept.clone());
        }
    }
    analysis
}

/// Picks one hint: missing component, then concept gap, then ordering, then
/// encouragement.
pub fn generate(analysis: &HintAnalysis, level: &LevelConfig) -> Hint {
    let difficulty = difficulty_for(analysis.attempt_count);

    let hint = if let Some(id) = analysis.missing_components.first() {
        missing_component_hint(id, level, difficulty)
    } else if let Some(concept) = analysis.concept_gaps.first() {
        concept_hint(concept, difficulty)
    } else if !analysis.misordered.is_empty() {
        ordering_hint(difficulty)
    } else {
        let pick = (analysis.attempt_count.max(1) as usize - 1) % ENCOURAGEMENTS.len();
        Hint::new(ENCOURAGEMENTS[pick], HintKind::Encouragement, difficulty)
    };
    debug!(level = level.id, kind = ?hint.kind, difficulty, "hint selected");
    hint
}

/// Contextual hint for a chain, or the level's first introductory hint when
/// there is no chain yet.
pub fn hint_for(
    components: Option<&[ComponentSpec]>,
    level: &LevelConfig,
    attempt_count: u32,
) -> Hint {
    match components {
        Some(components) => {
            let issues = validate_chain(components, level);
            generate(&analyze(components, &issues, level, attempt_count), level)
        }
        None => match level.hints.first() {
            Some(intro) => Hint::new(intro.clone(), HintKind::Concept, 1),
            None => Hint::new(FALLBACK, HintKind::General, 1),
        },
    }
}

fn display_name(required: &str, level: &LevelConfig) -> String {
    if let Some(entry) = level
        .component_catalog
        .iter()
        .find(|c| satisfies_requirement(&c.id, required))
    {
        return entry.name.clone();
    }
    required
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn missing_component_hint(required: &str, level: &LevelConfig, difficulty: u8) -> Hint {
    let name = display_name(required, level);
    let content = match difficulty {
        1..=2 => format!("Your AI might benefit from including a {name}."),
        3..=4 => format!("Try adding a {name} component to your network."),
        _ => format!("You need to add a {name} component. Look for it in the component library."),
    };
    let highlight = level
        .component_catalog
        .iter()
        .find(|c| satisfies_requirement(&c.id, required))
        .map_or_else(|| required.to_owned(), |c| c.id.clone());
    Hint { visual_highlight: Some(highlight), ..Hint::new(content, HintKind::Structure, difficulty) }
}

fn concept_hint(concept: &str, difficulty: u8) -> Hint {
    let ladder: &[&str] = match concept {
        "basic_assembly" => &[
            "Try dragging a component from the library to get started!",
            "Start by adding some components to build your AI network.",
            "Click and drag components from the left panel into the center area.",
        ],
        "network_depth" => &[
            "Consider adding more components to make your network more sophisticated.",
            "Deeper networks with multiple components often perform better.",
            "Try stacking more layers to give your AI more processing power.",
        ],
        "neural_networks" => &[
            "Every AI needs a brain! Try adding a Neural Layer.",
            "Neural networks need neurons - add a Neural Layer component.",
            "Start with a Neural Layer as the foundation of your AI.",
        ],
        "activation" => &[
            "Your network needs non-linearity - try adding an Activation Function.",
            "Add an Activation Function to help your AI learn complex patterns.",
            "Activation Functions are essential - they help neurons make decisions.",
        ],
        other => {
            return Hint::new(
                format!("Consider the concept of {other} for this level."),
                HintKind::Concept,
                difficulty,
            )
        }
    };
    let step = (difficulty as usize).saturating_sub(1).min(ladder.len() - 1);
    Hint::new(ladder[step], HintKind::Concept, difficulty)
}

fn ordering_hint(difficulty: u8) -> Hint {
    let content = match difficulty {
        1..=2 => "Check the order of your components - some work better in specific sequences.",
        3..=4 => "Try rearranging your components. Activation functions usually come after layers.",
        _ => "Components have an optimal order: Layer → Activation → Layer → etc.",
    };
    Hint::new(content, HintKind::Structure, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::catalog::LevelCatalog;

    fn spec(id: &str, kind: ComponentKind) -> ComponentSpec {
        ComponentSpec::new(id, id, kind)
    }

    fn level(id: u32) -> LevelConfig {
        LevelCatalog::builtin().get(id).cloned().unwrap()
    }

    #[test]
    fn difficulty_grows_with_attempts_and_caps_at_five() {
        assert_eq!(difficulty_for(0), 1);
        assert_eq!(difficulty_for(1), 1);
        assert_eq!(difficulty_for(3), 3);
        assert_eq!(difficulty_for(40), 5);
    }

    #[test]
    fn missing_component_comes_first() {
        let lvl = level(3);
        let chain = vec![spec("neural_layer", ComponentKind::Layer)];
        let hint = hint_for(Some(&chain), &lvl, 1);
        assert_eq!(hint.kind, HintKind::Structure);
        assert_eq!(hint.visual_highlight.as_deref(), Some("tensor_add"));
        assert_eq!(hint.content, "Your AI might benefit from including a Tensor Add.");

        let direct = hint_for(Some(&chain), &lvl, 9);
        assert_eq!(direct.difficulty, 5);
        assert!(direct.content.starts_with("You need to add a Tensor Add"));
    }

    #[test]
    fn thin_chain_gets_a_concept_hint() {
        let mut lvl = level(2);
        lvl.simulation.required_components.clear();
        let chain = vec![spec("neural_layer", ComponentKind::Layer)];
        let hint = hint_for(Some(&chain), &lvl, 2);
        assert_eq!(hint.kind, HintKind::Concept);
        assert_eq!(hint.content, "Deeper networks with multiple components often perform better.");
    }

    #[test]
    fn ordering_problem_gets_a_structure_hint() {
        let lvl = level(2);
        let chain = vec![
            spec("activation_relu", ComponentKind::Activation),
            spec("neural_layer", ComponentKind::Layer),
            spec("dense_layer", ComponentKind::Layer),
        ];
        let hint = hint_for(Some(&chain), &lvl, 5);
        assert_eq!(hint.kind, HintKind::Structure);
        assert!(hint.content.contains("Layer → Activation"));
        assert_eq!(hint.visual_highlight, None);
    }

    #[test]
    fn clean_chain_is_encouraged() {
        let lvl = level(2);
        let chain = vec![
            spec("neural_layer", ComponentKind::Layer),
            spec("activation_relu", ComponentKind::Activation),
            spec("dense_layer", ComponentKind::Layer),
        ];
        let first = hint_for(Some(&chain), &lvl, 1);
        assert_eq!(first.kind, HintKind::Encouragement);
        assert_eq!(first.content, ENCOURAGEMENTS[0]);
        assert_eq!(hint_for(Some(&chain), &lvl, 2).content, ENCOURAGEMENTS[1]);
    }

    #[test]
    fn no_chain_uses_the_level_introduction() {
        let hint = hint_for(None, &level(1), 3);
        assert_eq!(hint.kind, HintKind::Concept);
        assert_eq!(hint.difficulty, 1);
        assert!(hint.content.contains("Neural Layer"));

        let bare = LevelConfig::new(9, "bare", 16, &["a"]);
        assert_eq!(hint_for(None, &bare, 1).kind, HintKind::General);
    }

    #[test]
    fn names_fall_back_to_title_case() {
        let bare = LevelConfig::new(9, "bare", 16, &["a"]);
        assert_eq!(display_name("tensor_multiply", &bare), "Tensor Multiply");
        assert_eq!(display_name("activation", &level(2)), "ReLU Activation");
    }
}
