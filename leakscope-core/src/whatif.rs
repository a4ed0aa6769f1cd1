//! What-if scenario math
//!
//! Recomputes monthly revenue under hypothesized response-time, review, and
//! website-conversion changes. Response and review effects compound
//! multiplicatively; the website contribution is a separate additive ratio
//! term. The mixed model is preserved as-is rather than unified.

use serde::{Deserialize, Serialize};

/// Baseline scenario constants (typical contractor business).
const MONTHLY_LEADS: f64 = 142.0;
const BASE_CONVERSION: f64 = 0.35;
const AVG_JOB_VALUE: f64 = 1500.0;
/// Review count at which the review multiplier is neutral.
const REVIEW_TARGET: f64 = 45.0;
/// Per-review conversion sensitivity at the target count.
const REVIEW_SENSITIVITY: f64 = 0.15;
/// Baseline website conversion rate.
const WEBSITE_BASE_CONVERSION: f64 = 0.08;
/// Share of leads arriving through the website.
const WEBSITE_LEAD_SHARE: f64 = 0.22;

/// Scenario levers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhatIfInputs {
    /// Hypothesized average response time in minutes.
    pub response_time: f64,
    /// Hypothesized review count.
    pub review_count: f64,
    /// Hypothesized website conversion rate in percent.
    pub website_conversion_pct: f64,
}

impl Default for WhatIfInputs {
    fn default() -> Self {
        WhatIfInputs {
            response_time: 8.0,
            review_count: REVIEW_TARGET,
            website_conversion_pct: WEBSITE_BASE_CONVERSION * 100.0,
        }
    }
}

/// Computed scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfScenario {
    pub base_revenue: f64,
    pub projected_revenue: f64,
    pub improvement: f64,
    /// Growth rate in percent, one decimal.
    pub improvement_percent: f64,
    pub response_multiplier: f64,
    pub review_multiplier: f64,
}

/// Tiered conversion multiplier for response time: fast responders earn a
/// lift, slow responders pay a penalty.
fn response_multiplier(minutes: f64) -> f64 {
    if minutes <= 5.0 {
        1.12
    } else if minutes <= 15.0 {
        1.0
    } else if minutes <= 30.0 {
        0.92
    } else {
        0.85
    }
}

/// Linear conversion multiplier around the review target: each review away
/// from the target moves conversion by `REVIEW_SENSITIVITY / target`.
fn review_multiplier(review_count: f64) -> f64 {
    1.0 + ((review_count - REVIEW_TARGET) / REVIEW_TARGET) * REVIEW_SENSITIVITY
}

/// Compute the what-if scenario.
pub fn compute_what_if(inputs: &WhatIfInputs) -> WhatIfScenario {
    let base_revenue = MONTHLY_LEADS * BASE_CONVERSION * AVG_JOB_VALUE;

    let response = response_multiplier(inputs.response_time);
    let review = review_multiplier(inputs.review_count);

    let website_base = MONTHLY_LEADS * WEBSITE_LEAD_SHARE;
    let website_revenue = website_base * (inputs.website_conversion_pct / 100.0) * AVG_JOB_VALUE;

    let projected_conversion = BASE_CONVERSION * response * review;
    // The website term scales by the ratio of the hypothesized rate to the
    // baseline rate; it does not compound with the conversion multipliers.
    let projected_revenue = MONTHLY_LEADS * projected_conversion * AVG_JOB_VALUE
        + website_revenue * (inputs.website_conversion_pct / WEBSITE_BASE_CONVERSION / 100.0);

    let improvement = projected_revenue - base_revenue;

    WhatIfScenario {
        base_revenue,
        projected_revenue,
        improvement,
        improvement_percent: crate::leaks::round1(improvement / base_revenue * 100.0),
        response_multiplier: response,
        review_multiplier: review,
    }
}
