// Pattern detectors and the prediction fold
pub mod predictor;

// Request orchestration
pub mod prediction_service;
