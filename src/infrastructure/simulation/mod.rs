pub mod jitter_model;

pub use jitter_model::{FixedJitter, NoJitter, SeededJitter, UniformJitter};
