use serde::{Deserialize, Serialize};

/// A physical value together with the unit symbol it is stored in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement<T> {
    pub value: T,
    pub unit: String,
}

impl<T> Measurement<T> {
    pub fn new(value: T, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

impl Measurement<f64> {
    /// Scales the value by `factor` and relabels it with `unit`.
    pub fn converted(&self, factor: f64, unit: &str) -> Self {
        Self {
            value: self.value * factor,
            unit: unit.to_string(),
        }
    }
}

pub type Quantity = Measurement<f64>;
