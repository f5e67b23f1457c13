// src/scoring/severity.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A DASS-Y scale. `Total` is the pseudo-scale over the sum of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Depression,
    Anxiety,
    Stress,
    Total,
}

impl Scale {
    /// The three scales that own questionnaire items.
    pub const SUBSCALES: [Scale; 3] = [Scale::Depression, Scale::Anxiety, Scale::Stress];

    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Depression => "depression",
            Scale::Anxiety => "anxiety",
            Scale::Stress => "stress",
            Scale::Total => "total",
        }
    }

    /// Severity bands for this scale.
    pub fn bands(self) -> &'static SeverityBands {
        match self {
            Scale::Depression => &DEPRESSION_BANDS,
            Scale::Anxiety => &ANXIETY_BANDS,
            Scale::Stress => &STRESS_BANDS,
            Scale::Total => &TOTAL_BANDS,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity label, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
    ExtremelySevere,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Normal,
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
        Severity::ExtremelySevere,
    ];

    /// Key used in stored report rows (`normal`, ..., `extremelySevere`).
    pub fn as_key(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::ExtremelySevere => "extremelySevere",
        }
    }

    /// Human readable label shown to students and counselors.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::ExtremelySevere => "Extremely Severe",
        }
    }

    /// Normal and mild results are treated as "safe" on the counselor dashboard.
    pub fn is_safe(self) -> bool {
        matches!(self, Severity::Normal | Severity::Mild)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity level '{}'", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Accepts both the stored key and the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_key().to_ascii_lowercase() == normalized)
            .ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

/// Five contiguous bands starting at 0. Only the first four upper bounds are stored;
/// the last band is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityBands {
    upper_bounds: [u32; 4],
}

pub const DEPRESSION_BANDS: SeverityBands = SeverityBands::new([6, 8, 13, 16]);
pub const ANXIETY_BANDS: SeverityBands = SeverityBands::new([5, 7, 12, 15]);
pub const STRESS_BANDS: SeverityBands = SeverityBands::new([11, 13, 16, 18]);
pub const TOTAL_BANDS: SeverityBands = SeverityBands::new([23, 29, 39, 46]);

impl SeverityBands {
    /// Inclusive upper bounds for normal, mild, moderate and severe, in ascending order.
    pub const fn new(upper_bounds: [u32; 4]) -> Self {
        Self { upper_bounds }
    }

    /// First band (normal -> extremely severe) whose upper bound is >= `score`.
    pub fn classify(&self, score: u32) -> Severity {
        Severity::ALL
            .into_iter()
            .zip(self.upper_bounds)
            .find(|(_, upper)| score <= *upper)
            .map(|(severity, _)| severity)
            .unwrap_or(Severity::ExtremelySevere)
    }

    /// Inclusive `(lower, upper)` range of a band; `upper` is `None` for the open band.
    pub fn range(&self, severity: Severity) -> (u32, Option<u32>) {
        let index = Severity::ALL
            .iter()
            .position(|s| *s == severity)
            .unwrap_or(Severity::ALL.len() - 1);

        let lower = match index {
            0 => 0,
            i => self.upper_bounds[i - 1] + 1,
        };
        (lower, self.upper_bounds.get(index).copied())
    }
}

/// Classifies a raw score on the given scale.
pub fn classify(score: u32, scale: Scale) -> Severity {
    scale.bands().classify(score)
}
