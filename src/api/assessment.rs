use serde::{Deserialize, Serialize};

use crate::global_variables::{MAX_CONGESTION, MIN_CONGESTION};

/// Coarse severity band for a congestion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Moderate,
    Medium,
    High,
}

impl Severity {
    pub fn from_level(level: u8) -> Self {
        match level {
            80.. => Severity::High,
            60..=79 => Severity::Medium,
            40..=59 => Severity::Moderate,
            _ => Severity::Low,
        }
    }

    pub fn estimated_delay(self) -> &'static str {
        match self {
            Severity::High => "15-25 minutes",
            Severity::Medium => "8-15 minutes",
            Severity::Moderate => "3-8 minutes",
            Severity::Low => "0-3 minutes",
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            Severity::High => "Avoid this route. Consider alternative paths.",
            Severity::Medium => "Heavy traffic expected. Allow extra time.",
            Severity::Moderate => "Moderate traffic. Plan accordingly.",
            Severity::Low => "Light traffic. Good time to travel.",
        }
    }
}

/// Rounds a predicted level to the whole number reported to clients.
pub fn rounded_level(prediction: f64) -> u8 {
    if !prediction.is_finite() {
        return MIN_CONGESTION as u8;
    }
    prediction.round().clamp(MIN_CONGESTION, MAX_CONGESTION) as u8
}
