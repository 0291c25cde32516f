pub mod types;
pub mod catalog;
pub mod fairness;
pub mod selector;
pub mod builder;

pub use types::{Pair, PlayerId, Schedule};
pub use fairness::FairnessState;
pub use builder::{generate_schedule, generate_schedule_with_state};
