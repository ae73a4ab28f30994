use serde::{Deserialize, Serialize};

/// What a component does to the data flowing through the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Dense/neural layer; narrows the running width.
    Layer,
    /// Non-linearity; width unchanged.
    Activation,
    /// Dropout and friends; width unchanged.
    Regularization,
    /// Element-wise tensor operation (add, multiply); width unchanged.
    Operation,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Layer => "layer",
            ComponentKind::Activation => "activation",
            ComponentKind::Regularization => "regularization",
            ComponentKind::Operation => "operation",
        }
    }
}

/// One building block the player dropped into the chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub id: String,
    pub name: String,
    pub kind: ComponentKind,
}

impl ComponentSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ComponentKind) -> Self {
        ComponentSpec { id: id.into(), name: name.into(), kind }
    }
}
