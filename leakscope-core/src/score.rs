//! Revenue protection score
//!
//! A 0-100 composite health indicator summarizing leak severity and trend.
//!
//! Global invariants enforced:
//! - Score is always clamped to [0, 100]
//! - Deterministic: same categories and total yield the same score
//! - The three contributing deltas are reported for display

use crate::leaks::{LeakCategory, Status, Trend};
use serde::{Deserialize, Serialize};

/// Calibration constants for the protection score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCalibration {
    /// Reference leak total at which the full leak penalty applies.
    pub reference_max_leak: f64,
    /// Maximum points deducted for leak severity.
    pub leak_penalty_weight: f64,
    /// Points deducted per critical category.
    pub critical_penalty: f64,
    /// Points added per improving category.
    pub improving_bonus: f64,
}

impl Default for ScoreCalibration {
    fn default() -> Self {
        ScoreCalibration {
            reference_max_leak: 99600.0,
            leak_penalty_weight: 40.0,
            critical_penalty: 5.0,
            improving_bonus: 2.0,
        }
    }
}

/// Qualitative score label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    #[serde(rename = "Strong Protection")]
    StrongProtection,
    #[serde(rename = "Good Coverage")]
    GoodCoverage,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

impl ScoreLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::StrongProtection => "Strong Protection",
            ScoreLabel::GoodCoverage => "Good Coverage",
            ScoreLabel::NeedsAttention => "Needs Attention",
        }
    }

    fn for_score(score: f64) -> ScoreLabel {
        if score >= 80.0 {
            ScoreLabel::StrongProtection
        } else if score >= 60.0 {
            ScoreLabel::GoodCoverage
        } else {
            ScoreLabel::NeedsAttention
        }
    }
}

/// Protection score with its contributing deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtectionScore {
    /// Rounded score, clamped to [0, 100].
    pub score: f64,
    pub label: ScoreLabel,
    /// Points deducted for leak severity (positive number).
    pub leak_penalty: f64,
    /// Points deducted for critical categories (positive number).
    pub critical_penalty: f64,
    /// Points added for improving categories.
    pub improving_bonus: f64,
}

impl Default for ProtectionScore {
    fn default() -> Self {
        ProtectionScore {
            score: 0.0,
            label: ScoreLabel::NeedsAttention,
            leak_penalty: 0.0,
            critical_penalty: 0.0,
            improving_bonus: 0.0,
        }
    }
}

/// Compute the protection score with default calibration.
pub fn compute_protection_score(categories: &[LeakCategory], total_leak: f64) -> ProtectionScore {
    compute_protection_score_with_calibration(categories, total_leak, &ScoreCalibration::default())
}

/// Compute the protection score with custom calibration.
///
/// Start at 100; deduct leak severity proportional to the reference
/// maximum; deduct per critical category; add per improving category;
/// clamp to [0, 100] and round. A leak total beyond the reference maximum
/// deducts more than the nominal weight, but the final clamp holds.
pub fn compute_protection_score_with_calibration(
    categories: &[LeakCategory],
    total_leak: f64,
    calibration: &ScoreCalibration,
) -> ProtectionScore {
    let leak_penalty =
        total_leak / calibration.reference_max_leak * calibration.leak_penalty_weight;
    let critical_count = categories
        .iter()
        .filter(|c| c.status == Status::Critical)
        .count() as f64;
    let improving_count = categories
        .iter()
        .filter(|c| c.trend == Trend::Improving)
        .count() as f64;

    let critical_penalty = critical_count * calibration.critical_penalty;
    let improving_bonus = improving_count * calibration.improving_bonus;

    let raw = 100.0 - leak_penalty - critical_penalty + improving_bonus;
    // The label reflects the unrounded value; rounding is display-only.
    let clamped = raw.clamp(0.0, 100.0);

    ProtectionScore {
        score: clamped.round(),
        label: ScoreLabel::for_score(clamped),
        leak_penalty,
        critical_penalty,
        improving_bonus,
    }
}
