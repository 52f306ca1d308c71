pub mod advice;
pub mod brackets;
pub mod carency;
pub mod compatibility;
pub mod dosage;
pub mod environmental_factor;
pub mod safety;

pub use advice::{Severity, WeatherAdvice};
pub use dosage::DosageEngine;
