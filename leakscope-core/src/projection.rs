//! Projection engine
//!
//! Counterfactual revenue under four independent improvement levers, plus
//! one combined scenario summing the lever deltas.
//!
//! Global invariants enforced:
//! - The website lever exists only when the business has a website; its
//!   absence contributes zero to the combined total
//! - Excluding the website lever changes only the combined total, never
//!   another lever's delta
//! - Lever deltas are intentionally summed without a double-counting
//!   correction (the levers are not independent in reality; this is a
//!   known simplification)

use crate::dashboard::Dashboard;
use serde::{Deserialize, Serialize};

/// Calibration constants shared by the levers.
const AVG_JOB_VALUE: f64 = 1200.0;
const CLOSE_RATE: f64 = 0.535;
/// Fraction of currently-answered calls recaptured by better pickup.
const ANSWER_CAPTURE_LIFT: f64 = 0.15;
/// Flat conversion lift from halving response time.
const RESPONSE_CONVERSION_LIFT: f64 = 0.12;
/// Flat lead-growth lift from reaching the review goal.
const REVIEW_LEAD_GROWTH: f64 = 0.24;
const REVIEW_TARGET: f64 = 50.0;
/// Website conversion rates: current baseline and optimized.
const WEBSITE_CURRENT_CONVERSION: f64 = 0.08;
const WEBSITE_IMPROVED_CONVERSION: f64 = 0.12;
/// Share of leads arriving through the website.
const WEBSITE_LEAD_SHARE: f64 = 0.22;

/// Answer-rate improvement lever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRateLever {
    /// Calls captured after picking up 15% more.
    pub captured: f64,
    /// Additional calls captured.
    pub improved: f64,
    pub revenue: f64,
}

/// Faster-response lever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLever {
    /// Projected response time after halving.
    pub response_time: f64,
    pub conversion_lift: f64,
    pub revenue: f64,
}

/// Review-growth lever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLever {
    pub target: f64,
    pub needed: f64,
    pub conversion_lift: f64,
    pub revenue: f64,
}

/// Website-conversion lever (present only with a website)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteLever {
    pub current: f64,
    pub improved: f64,
    pub uplift: f64,
    pub revenue: f64,
}

/// Combined all-actions scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedProjection {
    /// Capture rate after improvement, capped at 95.
    pub capture_rate_improved: f64,
    pub reviews_improved: f64,
    pub response_time_improved: f64,
    /// Monthly leak amount recovered (60% of the current total).
    pub leaks_reduced: f64,
    /// Sum of the included lever revenue deltas.
    pub monthly_revenue_lift: f64,
}

/// Full projection bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSet {
    pub improved_answer_rate: AnswerRateLever,
    pub faster_response: ResponseLever,
    pub more_reviews: ReviewLever,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub better_website: Option<WebsiteLever>,
    pub combined: CombinedProjection,
    /// Estimated current monthly revenue, for percentage displays.
    pub current_monthly_revenue: f64,
}

/// Compute the projection bundle from a computed (or imported) dashboard.
///
/// Reads current metrics from the dashboard the way presentation consumers
/// do: calls and answered from the header, reviews from the tracker,
/// response time from the phone channel, leak total from the aggregate.
pub fn project(dashboard: &Dashboard) -> ProjectionSet {
    let calls = dashboard.header_stats.total_calls;
    let answered = dashboard.header_stats.calls_answered;
    let capture_rate = dashboard.header_stats.capture_rate;
    let reviews = dashboard.reviews.current;
    let response_time = dashboard.response_time.phone_calls.average;
    let total_leak = dashboard.total_revenue_leak;

    let improved_answer_rate = AnswerRateLever {
        captured: (answered * (1.0 + ANSWER_CAPTURE_LIFT)).round(),
        improved: (answered * ANSWER_CAPTURE_LIFT).round(),
        revenue: (answered * ANSWER_CAPTURE_LIFT * AVG_JOB_VALUE * CLOSE_RATE).round(),
    };

    let faster_response = ResponseLever {
        response_time: (response_time * 0.5).round(),
        conversion_lift: RESPONSE_CONVERSION_LIFT,
        revenue: (calls * CLOSE_RATE * AVG_JOB_VALUE * RESPONSE_CONVERSION_LIFT).round(),
    };

    let more_reviews = ReviewLever {
        target: REVIEW_TARGET,
        needed: (REVIEW_TARGET - reviews).max(0.0),
        conversion_lift: REVIEW_LEAD_GROWTH,
        revenue: (calls * REVIEW_LEAD_GROWTH * AVG_JOB_VALUE * CLOSE_RATE).round(),
    };

    let better_website = dashboard.has_website.then(|| WebsiteLever {
        current: WEBSITE_CURRENT_CONVERSION,
        improved: WEBSITE_IMPROVED_CONVERSION,
        uplift: WEBSITE_IMPROVED_CONVERSION - WEBSITE_CURRENT_CONVERSION,
        revenue: (calls
            * WEBSITE_LEAD_SHARE
            * (WEBSITE_IMPROVED_CONVERSION - WEBSITE_CURRENT_CONVERSION)
            * AVG_JOB_VALUE)
            .round(),
    });

    let monthly_revenue_lift = improved_answer_rate.revenue
        + faster_response.revenue
        + more_reviews.revenue
        + better_website.as_ref().map_or(0.0, |w| w.revenue);

    let combined = CombinedProjection {
        capture_rate_improved: (capture_rate + 8.0).min(95.0),
        reviews_improved: REVIEW_TARGET,
        response_time_improved: (response_time * 0.4).round(),
        leaks_reduced: (total_leak * 0.6).round(),
        monthly_revenue_lift,
    };

    ProjectionSet {
        improved_answer_rate,
        faster_response,
        more_reviews,
        better_website,
        combined,
        current_monthly_revenue: calls * CLOSE_RATE * AVG_JOB_VALUE,
    }
}
