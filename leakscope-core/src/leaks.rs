//! Revenue-leak calculation
//!
//! Computes the seven leak categories from raw inputs with fixed formulas.
//!
//! Global invariants enforced:
//! - Deterministic category order
//! - The authoritative total is the sum of the three core leaks only
//!   (after-hours, on-job, no-follow-up); informational rows never feed it
//! - Percentage divisors substitute 1 for a zero total (no Infinity)
//! - No computation raises on bad numbers; NaN propagates into the
//!   affected category only

use crate::inputs::RawInputs;
use serde::{Deserialize, Serialize};

/// Category status classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    Warning,
    Good,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Critical => "critical",
            Status::Warning => "warning",
            Status::Good => "good",
        }
    }
}

/// Category trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }
}

/// One identified source of lost revenue with an estimated dollar impact.
///
/// `lost_opportunities` and `estimated_revenue` are whole-valued floats so
/// that NaN from a non-numeric input field can propagate instead of being
/// silently coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakCategory {
    pub id: String,
    pub name: String,
    pub lost_opportunities: f64,
    pub estimated_revenue: f64,
    /// Share of the authoritative total, in percent (one decimal).
    pub percentage: f64,
    pub status: Status,
    pub trend: Trend,
    pub trend_percent: f64,
    pub description: String,
}

/// The three core money-lost figures and their sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyLost {
    pub after_hours: f64,
    pub on_job: f64,
    pub follow_up: f64,
    pub total: f64,
}

/// Revenue threshold above which the after-hours category escalates to critical.
const AFTER_HOURS_CRITICAL_REVENUE: f64 = 5000.0;

/// Follow-up rate above which the no-follow-up category flips to good/improving.
const FOLLOW_UP_GOOD_RATE: f64 = 80.0;

/// Response time (minutes) above which slow-response escalates to critical.
const SLOW_RESPONSE_CRITICAL_MINUTES: f64 = 15.0;

/// Round to nearest whole currency unit (half away from zero).
fn round0(v: f64) -> f64 {
    v.round()
}

/// Round to one decimal place.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Substitute 1 for a zero denominator.
pub(crate) fn non_zero(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v
    }
}

/// Compute the three core money-lost figures.
///
/// Each figure is rounded to a whole currency unit before summing, so the
/// total is the sum of the displayed figures.
pub fn compute_money_lost(inputs: &RawInputs) -> MoneyLost {
    let avg_job = inputs.avg_job_value.as_f64();
    let close = inputs.close_rate.as_f64() / 100.0;

    let after_hours = round0(
        inputs.after_hours_calls.as_f64()
            * (1.0 - inputs.after_hours_pickup_rate.as_f64() / 100.0)
            * avg_job
            * close,
    );
    let on_job = round0(
        inputs.on_job_calls.as_f64()
            * (1.0 - inputs.on_job_pickup_rate.as_f64() / 100.0)
            * avg_job
            * close,
    );
    let follow_up = round0(
        inputs.no_follow_up_leads.as_f64()
            * avg_job
            * close
            * (1.0 - inputs.follow_up_rate.as_f64() / 100.0),
    );

    MoneyLost {
        after_hours,
        on_job,
        follow_up,
        total: after_hours + on_job + follow_up,
    }
}

/// Percentage share of the authoritative total, one decimal.
fn share(revenue: f64, total: f64) -> f64 {
    round1(revenue / non_zero(total) * 100.0)
}

/// Compute all seven leak categories in display order.
///
/// The first three (after-hours, on-job, no-follow-up) are the core
/// financial leaks whose revenues sum to the authoritative total. The
/// remaining four are informational rows with independent formulas and
/// fixed display percentages; they never feed the total.
pub fn compute_leak_categories(inputs: &RawInputs, money: &MoneyLost) -> Vec<LeakCategory> {
    let answered = inputs.calls_answered.as_f64();
    let avg_job = inputs.avg_job_value.as_f64();
    let close = inputs.close_rate.as_f64() / 100.0;
    let follow_up_rate = inputs.follow_up_rate.as_f64();
    let response_time = inputs.avg_response_time.as_f64();
    // Reviews above goal mean no gap, not a negative leak. Clamped with a
    // comparison rather than `max` so a NaN gap still propagates.
    let raw_review_gap = inputs.review_goal.as_f64() - inputs.current_reviews.as_f64();
    let review_gap = if raw_review_gap < 0.0 {
        0.0
    } else {
        raw_review_gap
    };

    let follow_up_good = follow_up_rate > FOLLOW_UP_GOOD_RATE;

    let mut categories = vec![
        LeakCategory {
            id: "after-hours".to_string(),
            name: "After-Hours Inquiries".to_string(),
            lost_opportunities: round0(
                inputs.after_hours_calls.as_f64()
                    * (1.0 - inputs.after_hours_pickup_rate.as_f64() / 100.0),
            ),
            estimated_revenue: money.after_hours,
            percentage: share(money.after_hours, money.total),
            status: if money.after_hours > AFTER_HOURS_CRITICAL_REVENUE {
                Status::Critical
            } else {
                Status::Warning
            },
            trend: Trend::Declining,
            trend_percent: -2.3,
            description: format!(
                "{} after-hours calls, picking up {}% of them",
                crate::format::format_number(inputs.after_hours_calls.as_f64()),
                crate::format::format_number(inputs.after_hours_pickup_rate.as_f64()),
            ),
        },
        LeakCategory {
            id: "missed-calls".to_string(),
            name: "Missed Calls During Jobs".to_string(),
            lost_opportunities: round0(
                inputs.on_job_calls.as_f64() * (1.0 - inputs.on_job_pickup_rate.as_f64() / 100.0),
            ),
            estimated_revenue: money.on_job,
            percentage: share(money.on_job, money.total),
            status: Status::Critical,
            trend: Trend::Declining,
            trend_percent: 1.5,
            description: format!(
                "{} calls while on jobs, picking up {}% of them",
                crate::format::format_number(inputs.on_job_calls.as_f64()),
                crate::format::format_number(inputs.on_job_pickup_rate.as_f64()),
            ),
        },
        LeakCategory {
            id: "no-followup".to_string(),
            name: "No Follow-Up".to_string(),
            lost_opportunities: round0(
                inputs.no_follow_up_leads.as_f64() * (1.0 - follow_up_rate / 100.0),
            ),
            estimated_revenue: money.follow_up,
            percentage: share(money.follow_up, money.total),
            status: if follow_up_good {
                Status::Good
            } else {
                Status::Warning
            },
            trend: if follow_up_good {
                Trend::Improving
            } else {
                Trend::Declining
            },
            trend_percent: if follow_up_good { -3.2 } else { 2.1 },
            description: format!(
                "Following up {}% of the time on {} leads",
                crate::format::format_number(follow_up_rate),
                crate::format::format_number(inputs.no_follow_up_leads.as_f64()),
            ),
        },
        LeakCategory {
            id: "slow-response".to_string(),
            name: "Slow Response Time".to_string(),
            lost_opportunities: round0(answered * 0.08),
            estimated_revenue: round0(answered * 0.08 * avg_job * close),
            percentage: 8.5,
            status: if response_time > SLOW_RESPONSE_CRITICAL_MINUTES {
                Status::Critical
            } else {
                Status::Warning
            },
            trend: Trend::Stable,
            trend_percent: 0.2,
            description: format!(
                "Average {} minute response time",
                crate::format::format_number(response_time)
            ),
        },
    ];

    // Website row changes shape entirely depending on whether a site exists.
    let (website_name, website_factor, website_pct, website_status, website_trend_pct, website_desc) =
        if inputs.has_website {
            (
                "Poor Website Conversion",
                0.1,
                10.6,
                Status::Warning,
                -1.1,
                "Website visitors not converting to calls".to_string(),
            )
        } else {
            (
                "No Website - Missing Lead Source",
                0.25,
                22.0,
                Status::Critical,
                -5.2,
                "Not having a website means you are missing 20-30% of potential leads".to_string(),
            )
        };

    categories.push(LeakCategory {
        id: "website-conversion".to_string(),
        name: website_name.to_string(),
        lost_opportunities: round0(answered * website_factor),
        estimated_revenue: round0(answered * website_factor * avg_job * close),
        percentage: website_pct,
        status: website_status,
        trend: Trend::Declining,
        trend_percent: website_trend_pct,
        description: website_desc,
    });

    categories.push(LeakCategory {
        id: "review-gap".to_string(),
        name: "Review Gap Impact".to_string(),
        lost_opportunities: round0(review_gap * 0.3),
        estimated_revenue: round0(review_gap * 0.3 * avg_job * close),
        percentage: 4.2,
        status: Status::Good,
        trend: Trend::Improving,
        trend_percent: -4.5,
        description: format!(
            "{} reviews short of goal",
            crate::format::format_number(review_gap)
        ),
    });

    // Unqualified leads carry zero revenue impact by design: the row tracks
    // wasted time, not lost revenue.
    categories.push(LeakCategory {
        id: "unqualified".to_string(),
        name: "Unqualified Leads".to_string(),
        lost_opportunities: round0(answered * 0.15),
        estimated_revenue: 0.0,
        percentage: 15.5,
        status: Status::Warning,
        trend: Trend::Stable,
        trend_percent: 0.1,
        description: "Time wasted on non-qualified leads".to_string(),
    });

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::FieldValue;

    #[test]
    fn test_money_lost_default_inputs() {
        let money = compute_money_lost(&RawInputs::default());
        // 18 * 0.9 * 1200 * 0.535 = 10400.4
        assert_eq!(money.after_hours, 10400.0);
        // 24 * 0.7 * 1200 * 0.535 = 10785.6
        assert_eq!(money.on_job, 10786.0);
        // 8 * 1200 * 0.535 * 0.25 = 1284.0
        assert_eq!(money.follow_up, 1284.0);
        assert_eq!(money.total, 22470.0);
    }

    #[test]
    fn test_total_excludes_informational_rows() {
        let inputs = RawInputs::default();
        let money = compute_money_lost(&inputs);
        let categories = compute_leak_categories(&inputs, &money);
        let core_sum: f64 = categories
            .iter()
            .take(3)
            .map(|c| c.estimated_revenue)
            .sum();
        assert_eq!(core_sum, money.total);
        // Informational rows carry revenue but never feed the total.
        let all_sum: f64 = categories.iter().map(|c| c.estimated_revenue).sum();
        assert!(all_sum > money.total);
    }

    #[test]
    fn test_zero_total_substitutes_unit_denominator() {
        let mut inputs = RawInputs::default();
        inputs.after_hours_calls = 0.0.into();
        inputs.on_job_calls = 0.0.into();
        inputs.no_follow_up_leads = 0.0.into();
        let money = compute_money_lost(&inputs);
        assert_eq!(money.total, 0.0);
        let categories = compute_leak_categories(&inputs, &money);
        for c in &categories {
            assert!(c.percentage.is_finite(), "{} percentage not finite", c.id);
        }
    }

    #[test]
    fn test_follow_up_rate_flips_status_above_80() {
        let mut inputs = RawInputs::default();
        inputs.follow_up_rate = 85.0.into();
        let money = compute_money_lost(&inputs);
        let categories = compute_leak_categories(&inputs, &money);
        let no_followup = categories.iter().find(|c| c.id == "no-followup").unwrap();
        assert_eq!(no_followup.status, Status::Good);
        assert_eq!(no_followup.trend, Trend::Improving);
        assert_eq!(no_followup.trend_percent, -3.2);
        // Exactly 80 does not flip.
        inputs.follow_up_rate = 80.0.into();
        let money = compute_money_lost(&inputs);
        let categories = compute_leak_categories(&inputs, &money);
        let no_followup = categories.iter().find(|c| c.id == "no-followup").unwrap();
        assert_eq!(no_followup.status, Status::Warning);
    }

    #[test]
    fn test_missing_website_changes_row_shape() {
        let mut inputs = RawInputs::default();
        inputs.has_website = false;
        let money = compute_money_lost(&inputs);
        let categories = compute_leak_categories(&inputs, &money);
        let website = categories
            .iter()
            .find(|c| c.id == "website-conversion")
            .unwrap();
        assert_eq!(website.name, "No Website - Missing Lead Source");
        assert_eq!(website.status, Status::Critical);
        // 118 * 0.25 = 29.5 rounds to 30
        assert_eq!(website.lost_opportunities, 30.0);
    }

    #[test]
    fn test_reviews_above_goal_zero_the_gap() {
        let mut inputs = RawInputs::default();
        inputs.current_reviews = 70.0.into();
        inputs.review_goal = 50.0.into();
        let money = compute_money_lost(&inputs);
        let categories = compute_leak_categories(&inputs, &money);
        let gap = categories.iter().find(|c| c.id == "review-gap").unwrap();
        assert_eq!(gap.lost_opportunities, 0.0);
        assert_eq!(gap.estimated_revenue, 0.0);
        assert_eq!(gap.description, "0 reviews short of goal");
    }

    #[test]
    fn test_text_review_goal_still_propagates_nan_into_gap() {
        let mut inputs = RawInputs::default();
        inputs.review_goal = FieldValue::Text("fifty".to_string());
        let money = compute_money_lost(&inputs);
        let categories = compute_leak_categories(&inputs, &money);
        let gap = categories.iter().find(|c| c.id == "review-gap").unwrap();
        assert!(gap.estimated_revenue.is_nan());
    }

    #[test]
    fn test_non_numeric_field_propagates_nan_locally() {
        let mut inputs = RawInputs::default();
        inputs.after_hours_calls = FieldValue::Text("many".to_string());
        let money = compute_money_lost(&inputs);
        assert!(money.after_hours.is_nan());
        assert!(money.on_job.is_finite());
        assert!(money.follow_up.is_finite());
        let categories = compute_leak_categories(&inputs, &money);
        let slow = categories.iter().find(|c| c.id == "slow-response").unwrap();
        assert!(slow.estimated_revenue.is_finite());
    }
}
