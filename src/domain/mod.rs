// Upstream feed data model
pub mod game;

// Prediction output and detector findings
pub mod prediction;

// Stored prediction history
pub mod history;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Domain-specific error types
pub mod errors;
