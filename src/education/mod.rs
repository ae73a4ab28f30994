pub mod hint;

pub use hint::{analyze, difficulty_for, generate, hint_for, Hint, HintAnalysis, HintKind};
