//! Derived dashboard views
//!
//! Every structure here is a proportional transformation of the raw inputs,
//! not an independent measurement: the synthetic trend, lead-source split,
//! and weekly cards exist to make a single point-in-time input set look
//! like a populated dashboard.
//!
//! Global invariants enforced:
//! - Views are strictly derived (never stored, always computed)
//! - Proportional constants are fixed; identical input yields identical views
//! - Division guards substitute 1 for zero denominators
//!
//! Struct defaults double as the documented fallback values used when a
//! bulk-JSON snapshot omits a field.

use crate::inputs::RawInputs;
use crate::leaks::{non_zero, round1, Status, Trend};
use serde::{Deserialize, Serialize};

/// Header call-volume stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderStats {
    pub total_calls: f64,
    pub calls_answered: f64,
    pub calls_missed: f64,
    /// Percent of total calls that were answered, one decimal.
    pub capture_rate: f64,
}

impl Default for HeaderStats {
    fn default() -> Self {
        HeaderStats {
            total_calls: 142.0,
            calls_answered: 118.0,
            calls_missed: 24.0,
            capture_rate: 83.1,
        }
    }
}

/// One stage of the inquiry-to-booked funnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStage {
    pub stage: String,
    pub count: f64,
    pub conversion: f64,
}

/// One point of the six-month synthetic trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: String,
    pub leads_capture: f64,
    pub response_time: f64,
    pub reviews: f64,
}

/// This-month-vs-last-month comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyComparison {
    pub this_month: f64,
    pub last_month: f64,
    pub change: f64,
}

impl Default for MonthlyComparison {
    fn default() -> Self {
        MonthlyComparison {
            this_month: 142.0,
            last_month: 125.0,
            change: 13.6,
        }
    }
}

/// One lead-source bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSource {
    pub source: String,
    pub leads: f64,
    pub conversion: f64,
}

/// Response timing for one contact channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTiming {
    /// Average minutes to respond on this channel.
    pub average: f64,
    pub status: Status,
}

/// Response-time-by-channel map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseTimes {
    pub phone_calls: ChannelTiming,
    pub text_messages: ChannelTiming,
    pub contact_forms: ChannelTiming,
    pub after_hours: ChannelTiming,
}

impl Default for ResponseTimes {
    fn default() -> Self {
        compute_response_times()
    }
}

/// Review tracker snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewTracker {
    pub current: f64,
    pub new_this_month: f64,
    pub requests_sent: f64,
    pub response_rate: f64,
    pub monthly_goal: f64,
    pub trend: Trend,
}

impl Default for ReviewTracker {
    fn default() -> Self {
        ReviewTracker {
            current: 38.0,
            new_this_month: 8.0,
            requests_sent: 24.0,
            response_rate: 33.0,
            monthly_goal: 50.0,
            trend: Trend::Improving,
        }
    }
}

/// One weekly comparison card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCard {
    pub label: String,
    pub this_week: f64,
    pub last_week: f64,
    /// Percent change, derived from the rounded card values.
    pub change: f64,
    pub icon: String,
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// One alert in the action-item feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub action: String,
}

/// Subscription tier display data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierStatus {
    pub current_tier: String,
    pub monthly_price: f64,
    pub features: Vec<String>,
    pub available_upgrades: Vec<TierUpgrade>,
}

/// One available tier upgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierUpgrade {
    pub tier: String,
    pub features: Vec<String>,
    pub price: f64,
}

impl Default for TierStatus {
    fn default() -> Self {
        TierStatus {
            current_tier: "Protection".to_string(),
            monthly_price: 99.0,
            features: vec![
                "24/7 Call Capture".to_string(),
                "SMS Tracking".to_string(),
                "Lead Follow-up Alerts".to_string(),
                "Basic Analytics".to_string(),
            ],
            available_upgrades: vec![TierUpgrade {
                tier: "Intelligence".to_string(),
                features: vec![
                    "+ Lead Scoring".to_string(),
                    "+ Competitor Analysis".to_string(),
                    "+ Advanced Reports".to_string(),
                ],
                price: 199.0,
            }],
        }
    }
}

/// Funnel stage fractions of answered calls (qualified, quoted).
const FUNNEL_QUALIFIED_FRACTION: f64 = 0.83;
const FUNNEL_QUOTED_FRACTION: f64 = 0.66;

/// Prior-month call volumes as fractions of the current month.
const TREND_CALL_FRACTIONS: [f64; 5] = [0.55, 0.65, 0.74, 0.83, 0.88];
/// Prior-month response times in minutes.
const TREND_RESPONSE_TIMES: [f64; 5] = [18.0, 16.0, 14.0, 12.0, 12.0];
/// Prior-month review counts as fractions of the current count.
const TREND_REVIEW_FRACTIONS: [f64; 5] = [0.34, 0.43, 0.54, 0.8, 0.92];
const TREND_MONTH_LABELS: [&str; 6] = ["Aug", "Sep", "Oct", "Nov", "Dec", "Jan"];

/// Lead-source buckets: name, fraction of answered calls, conversion percent.
const LEAD_SOURCE_BUCKETS: [(&str, f64, f64); 6] = [
    ("Google Search", 0.38, 76.0),
    ("Google Maps", 0.32, 82.0),
    ("Website Direct", 0.24, 68.0),
    ("Referrals", 0.15, 94.0),
    ("Social Media", 0.07, 50.0),
    ("Other", 0.04, 60.0),
];

/// Fixed per-channel average response times in minutes.
const CHANNEL_AVERAGES: [f64; 4] = [3.0, 8.0, 45.0, 480.0];

/// Classify a response time in minutes.
pub fn response_time_status(minutes: f64) -> Status {
    if minutes < 5.0 {
        Status::Good
    } else if minutes < 30.0 {
        Status::Warning
    } else {
        Status::Critical
    }
}

/// Compute header call-volume stats.
///
/// `calls_answered > total_calls` is not rejected; it yields a negative
/// missed count and a capture rate above 100.
pub fn compute_header_stats(inputs: &RawInputs) -> HeaderStats {
    let total = inputs.total_calls.as_f64();
    let answered = inputs.calls_answered.as_f64();
    HeaderStats {
        total_calls: total,
        calls_answered: answered,
        calls_missed: total - answered,
        capture_rate: round1(answered / non_zero(total) * 100.0),
    }
}

/// Compute the four-stage conversion funnel from answered calls.
pub fn compute_funnel(inputs: &RawInputs) -> Vec<FunnelStage> {
    let answered = inputs.calls_answered.as_f64();
    let booked = (answered * inputs.close_rate.as_f64() / 100.0).round();
    vec![
        FunnelStage {
            stage: "Total Inquiries".to_string(),
            count: answered,
            conversion: 100.0,
        },
        FunnelStage {
            stage: "Qualified Leads".to_string(),
            count: (answered * FUNNEL_QUALIFIED_FRACTION).round(),
            conversion: 83.1,
        },
        FunnelStage {
            stage: "Quotes Sent".to_string(),
            count: (answered * FUNNEL_QUOTED_FRACTION).round(),
            conversion: 79.7,
        },
        FunnelStage {
            stage: "Jobs Booked".to_string(),
            count: booked,
            conversion: 80.9,
        },
    ]
}

/// Synthesize the six-point monthly trend.
///
/// The prior five months are fixed fractions of the current month; only the
/// final point carries the authoritative input values. This is illustrative
/// extrapolation, not stored history.
pub fn compute_monthly_performance(inputs: &RawInputs) -> Vec<MonthlyPoint> {
    let total = inputs.total_calls.as_f64();
    let reviews = inputs.current_reviews.as_f64();
    let mut points: Vec<MonthlyPoint> = (0..5)
        .map(|i| MonthlyPoint {
            month: TREND_MONTH_LABELS[i].to_string(),
            leads_capture: (total * TREND_CALL_FRACTIONS[i]).round(),
            response_time: TREND_RESPONSE_TIMES[i],
            reviews: (reviews * TREND_REVIEW_FRACTIONS[i]).round(),
        })
        .collect();
    points.push(MonthlyPoint {
        month: TREND_MONTH_LABELS[5].to_string(),
        leads_capture: total,
        response_time: inputs.avg_response_time.as_f64(),
        reviews,
    });
    points
}

/// Compute the month-over-month comparison (last month = 88% of current).
pub fn compute_monthly_comparison(inputs: &RawInputs) -> MonthlyComparison {
    let total = inputs.total_calls.as_f64();
    MonthlyComparison {
        this_month: total,
        last_month: (total * 0.88).round(),
        change: 13.6,
    }
}

/// Split answered calls into the six fixed-proportion lead-source buckets.
pub fn compute_lead_sources(inputs: &RawInputs) -> Vec<LeadSource> {
    let answered = inputs.calls_answered.as_f64();
    LEAD_SOURCE_BUCKETS
        .iter()
        .map(|(source, fraction, conversion)| LeadSource {
            source: source.to_string(),
            leads: (answered * fraction).round(),
            conversion: *conversion,
        })
        .collect()
}

/// Build the response-time channel map with derived statuses.
pub fn compute_response_times() -> ResponseTimes {
    let channel = |average: f64| ChannelTiming {
        average,
        status: response_time_status(average),
    };
    ResponseTimes {
        phone_calls: channel(CHANNEL_AVERAGES[0]),
        text_messages: channel(CHANNEL_AVERAGES[1]),
        contact_forms: channel(CHANNEL_AVERAGES[2]),
        after_hours: channel(CHANNEL_AVERAGES[3]),
    }
}

/// Derive the review tracker snapshot from the current review count.
pub fn compute_review_tracker(inputs: &RawInputs) -> ReviewTracker {
    let current = inputs.current_reviews.as_f64();
    ReviewTracker {
        current,
        new_this_month: (current * 0.21).round(),
        requests_sent: (current * 0.63).round(),
        response_rate: 33.0,
        monthly_goal: inputs.review_goal.as_f64(),
        trend: Trend::Improving,
    }
}

/// Build one weekly card: current/4 against a discounted prior week, with
/// the change percentage derived from the rounded card values.
fn weekly_card(label: &str, monthly: f64, discount: f64, icon: &str) -> WeeklyCard {
    let this_week = (monthly / 4.0).round();
    let last_week = (monthly / 4.0 * discount).round();
    WeeklyCard {
        label: label.to_string(),
        this_week,
        last_week,
        change: round1((this_week - last_week) / non_zero(last_week) * 100.0),
        icon: icon.to_string(),
    }
}

/// Compute the four weekly comparison cards.
pub fn compute_weekly_summary(inputs: &RawInputs, total_leak: f64) -> Vec<WeeklyCard> {
    let reviews = inputs.current_reviews.as_f64();
    let review_this = (reviews * 0.08).round();
    let review_last = (reviews * 0.03).round();
    vec![
        weekly_card("Calls This Week", inputs.total_calls.as_f64(), 0.8, "Phone"),
        weekly_card(
            "Customers We Reached",
            inputs.calls_answered.as_f64(),
            0.83,
            "TrendingUp",
        ),
        WeeklyCard {
            label: "New Google Reviews".to_string(),
            this_week: review_this,
            last_week: review_last,
            change: round1((review_this - review_last) / non_zero(review_last) * 100.0),
            icon: "Star".to_string(),
        },
        weekly_card(
            "Money Protected This Week",
            total_leak,
            0.82,
            "DollarSign",
        ),
    ]
}

/// Build the four-alert action feed from current inputs.
pub fn compute_action_items(inputs: &RawInputs) -> Vec<ActionItem> {
    let missed = inputs.total_calls.as_f64() - inputs.calls_answered.as_f64();
    let reviews_needed = inputs.review_goal.as_f64() - inputs.current_reviews.as_f64();
    vec![
        ActionItem {
            id: "alert-1".to_string(),
            title: format!(
                "{} customers are waiting for your call",
                crate::format::format_number(missed)
            ),
            description: "They called but you missed it - quick callbacks could turn them into jobs"
                .to_string(),
            severity: Severity::Critical,
            action: "Call Them Now".to_string(),
        },
        ActionItem {
            id: "alert-2".to_string(),
            title: format!(
                "You are answering slower this week ({} min avg)",
                crate::format::format_number(inputs.avg_response_time.as_f64())
            ),
            description: "Try to pick up phones faster - it is costing you jobs".to_string(),
            severity: Severity::Warning,
            action: "Review".to_string(),
        },
        ActionItem {
            id: "alert-3".to_string(),
            title: format!(
                "{} more reviews needed to hit your goal",
                crate::format::format_number(reviews_needed)
            ),
            description: "Send Google review requests to recent customers - takes 1 minute each"
                .to_string(),
            severity: Severity::Info,
            action: "Send Now".to_string(),
        },
        ActionItem {
            id: "alert-4".to_string(),
            title: "Evening calls are missing - set up call forwarding".to_string(),
            description: "After-hours calls are going unanswered and costing revenue".to_string(),
            severity: Severity::Warning,
            action: "Setup".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_stats_default_inputs() {
        let stats = compute_header_stats(&RawInputs::default());
        assert_eq!(stats.calls_missed, 24.0);
        assert_eq!(stats.capture_rate, 83.1);
    }

    #[test]
    fn test_header_stats_zero_total_calls() {
        let mut inputs = RawInputs::default();
        inputs.total_calls = 0.0.into();
        inputs.calls_answered = 0.0.into();
        let stats = compute_header_stats(&inputs);
        assert!(stats.capture_rate.is_finite());
        assert_eq!(stats.capture_rate, 0.0);
    }

    #[test]
    fn test_header_stats_answered_above_total() {
        let mut inputs = RawInputs::default();
        inputs.total_calls = 100.0.into();
        inputs.calls_answered = 120.0.into();
        let stats = compute_header_stats(&inputs);
        assert_eq!(stats.calls_missed, -20.0);
        assert_eq!(stats.capture_rate, 120.0);
    }

    #[test]
    fn test_funnel_default_inputs() {
        let funnel = compute_funnel(&RawInputs::default());
        assert_eq!(funnel.len(), 4);
        assert_eq!(funnel[0].count, 118.0);
        assert_eq!(funnel[1].count, 98.0); // 118 * 0.83 = 97.94
        assert_eq!(funnel[2].count, 78.0); // 118 * 0.66 = 77.88
        assert_eq!(funnel[3].count, 63.0); // 118 * 0.535 = 63.13
        assert_eq!(funnel[3].stage, "Jobs Booked");
    }

    #[test]
    fn test_monthly_trend_shape() {
        let points = compute_monthly_performance(&RawInputs::default());
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].leads_capture, 78.0); // 142 * 0.55 = 78.1
        assert_eq!(points[4].leads_capture, 125.0); // 142 * 0.88 = 124.96
        // Final point carries the authoritative inputs.
        assert_eq!(points[5].leads_capture, 142.0);
        assert_eq!(points[5].response_time, 11.0);
        assert_eq!(points[5].reviews, 38.0);
    }

    #[test]
    fn test_lead_sources_proportions() {
        let sources = compute_lead_sources(&RawInputs::default());
        assert_eq!(sources.len(), 6);
        assert_eq!(sources[0].leads, 45.0); // 118 * 0.38 = 44.84
        assert_eq!(sources[3].source, "Referrals");
        assert_eq!(sources[3].conversion, 94.0);
    }

    #[test]
    fn test_response_time_status_thresholds() {
        assert_eq!(response_time_status(3.0), Status::Good);
        assert_eq!(response_time_status(4.9), Status::Good);
        assert_eq!(response_time_status(5.0), Status::Warning);
        assert_eq!(response_time_status(29.9), Status::Warning);
        assert_eq!(response_time_status(30.0), Status::Critical);
        assert_eq!(response_time_status(480.0), Status::Critical);
    }

    #[test]
    fn test_response_times_statuses_are_derived() {
        let times = compute_response_times();
        assert_eq!(times.phone_calls.status, Status::Good);
        assert_eq!(times.text_messages.status, Status::Warning);
        assert_eq!(times.contact_forms.status, Status::Critical);
        assert_eq!(times.after_hours.status, Status::Critical);
    }

    #[test]
    fn test_weekly_summary_change_derivation() {
        let cards = compute_weekly_summary(&RawInputs::default(), 22470.0);
        assert_eq!(cards.len(), 4);
        // 142/4 = 35.5 -> 36; 35.5 * 0.8 = 28.4 -> 28; (36-28)/28 = 28.6%
        assert_eq!(cards[0].this_week, 36.0);
        assert_eq!(cards[0].last_week, 28.0);
        assert_eq!(cards[0].change, 28.6);
    }

    #[test]
    fn test_weekly_summary_zero_last_week() {
        let mut inputs = RawInputs::default();
        inputs.total_calls = 0.0.into();
        inputs.calls_answered = 0.0.into();
        inputs.current_reviews = 0.0.into();
        let cards = compute_weekly_summary(&inputs, 0.0);
        for card in &cards {
            assert!(card.change.is_finite(), "{} change not finite", card.label);
        }
    }

    #[test]
    fn test_action_items_interpolate_inputs() {
        let items = compute_action_items(&RawInputs::default());
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title, "24 customers are waiting for your call");
        assert_eq!(items[1].severity, Severity::Warning);
        assert_eq!(items[2].title, "12 more reviews needed to hit your goal");
    }
}
