//! Raw business inputs and defaulting
//!
//! Global invariants enforced:
//! - The engine never mutates caller-supplied inputs
//! - Missing fields are filled from documented defaults
//! - No range clamping at this layer (out-of-range values pass through)
//! - Non-numeric text supplied for a numeric field is preserved verbatim

use serde::{Deserialize, Serialize};

/// A numeric input field that tolerates non-numeric text.
///
/// Form-style editing is permissive: text that fails numeric coercion is
/// kept as-is rather than rejected. Arithmetic over a `Text` value yields
/// `NaN`, which propagates into the affected derived metric only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the field. `Text` coerces to `NaN`.
    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(_) => f64::NAN,
        }
    }

    /// Coerce raw text the way a form edit would: parse if possible,
    /// otherwise keep the text verbatim.
    pub fn coerce(raw: &str) -> FieldValue {
        match raw.trim().parse::<f64>() {
            Ok(n) => FieldValue::Number(n),
            Err(_) => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Number(0.0)
    }
}

/// Raw operational inputs for one business over one period.
///
/// All rate fields are expressed in percent (expected range `[0, 100]`,
/// not enforced). `calls_answered <= total_calls` is expected but not
/// enforced; violations produce a negative missed-call count downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInputs {
    pub business_name: String,
    pub current_month: String,
    pub total_calls: FieldValue,
    pub calls_answered: FieldValue,
    pub avg_job_value: FieldValue,
    /// Percent of answered leads that convert to paid jobs.
    pub close_rate: FieldValue,
    pub current_reviews: FieldValue,
    pub review_goal: FieldValue,
    /// Average minutes to respond to an inquiry.
    pub avg_response_time: FieldValue,
    pub after_hours_calls: FieldValue,
    pub after_hours_pickup_rate: FieldValue,
    pub on_job_calls: FieldValue,
    pub on_job_pickup_rate: FieldValue,
    pub follow_up_rate: FieldValue,
    pub no_follow_up_leads: FieldValue,
    pub has_website: bool,
}

impl Default for RawInputs {
    fn default() -> Self {
        RawInputs {
            business_name: "My Service Business".to_string(),
            current_month: "January 2026".to_string(),
            total_calls: 142.0.into(),
            calls_answered: 118.0.into(),
            avg_job_value: 1200.0.into(),
            close_rate: 53.5.into(),
            current_reviews: 38.0.into(),
            review_goal: 50.0.into(),
            avg_response_time: 11.0.into(),
            after_hours_calls: 18.0.into(),
            after_hours_pickup_rate: 10.0.into(),
            on_job_calls: 24.0.into(),
            on_job_pickup_rate: 30.0.into(),
            follow_up_rate: 75.0.into(),
            no_follow_up_leads: 8.0.into(),
            has_website: true,
        }
    }
}

impl RawInputs {
    /// Parse inputs from JSON, filling absent fields from defaults.
    ///
    /// This is a partial-input entry point: `{}` yields the full default
    /// input set. Values outside expected ranges are accepted unchanged.
    pub fn from_json(json: &str) -> anyhow::Result<RawInputs> {
        serde_json::from_str(json).map_err(Into::into)
    }
}
