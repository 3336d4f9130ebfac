use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Confidence reported when neither the filename nor the data matched.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Fibonacci,
    SineWave,
    Exponential,
    Unknown,
}

impl PatternType {
    /// Fixed confidence attached to each pattern. Never interpolated.
    pub fn confidence(self) -> f64 {
        match self {
            PatternType::Fibonacci => 0.85,
            PatternType::SineWave => 0.90,
            PatternType::Exponential => 0.88,
            PatternType::Unknown => FALLBACK_CONFIDENCE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::Fibonacci => "fibonacci",
            PatternType::SineWave => "sine_wave",
            PatternType::Exponential => "exponential",
            PatternType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fibonacci" => Ok(PatternType::Fibonacci),
            "sine_wave" => Ok(PatternType::SineWave),
            "exponential" => Ok(PatternType::Exponential),
            "unknown" => Ok(PatternType::Unknown),
            _ => Err(format!("Unknown pattern type: {}", s)),
        }
    }
}

/// A positive answer from one of the classification strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch {
    pub pattern_type: PatternType,
    pub confidence: f64,
}

impl PatternMatch {
    pub fn new(pattern_type: PatternType) -> Self {
        Self {
            pattern_type,
            confidence: pattern_type.confidence(),
        }
    }
}
