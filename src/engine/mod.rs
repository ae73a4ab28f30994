pub mod attempt;
pub mod engine;
pub mod request;

pub use attempt::AttemptState;
pub use engine::{hint, simulate, train, Engine};
pub use request::{HintRequest, SimulateRequest, TrainRequest};
