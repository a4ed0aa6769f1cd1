//! Dashboard assembly and rendering
//!
//! `Dashboard` is the complete output contract: every derived view, the
//! leak breakdown, the protection score, and the ranked recommendations in
//! one serializable bundle.
//!
//! Global invariants enforced:
//! - `total_revenue_leak` is always the authoritative core-leak sum, never
//!   a sum over all categories
//! - Assembly is deterministic: identical inputs yield an identical bundle
//! - An imported bundle deserializes with every absent field filled from
//!   the default dashboard

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::actions::{rank_recommendations_with_settings, RankerSettings, Recommendation};
use crate::format::{format_currency, format_minutes, format_number};
use crate::inputs::RawInputs;
use crate::leaks::{compute_leak_categories, compute_money_lost, LeakCategory};
use crate::score::{compute_protection_score_with_calibration, ProtectionScore, ScoreCalibration};
use crate::views::{
    compute_action_items, compute_funnel, compute_header_stats, compute_lead_sources,
    compute_monthly_comparison, compute_monthly_performance, compute_response_times,
    compute_review_tracker, compute_weekly_summary, ActionItem, FunnelStage, HeaderStats,
    LeadSource, MonthlyComparison, MonthlyPoint, ResponseTimes, ReviewTracker, TierStatus,
    WeeklyCard,
};

/// Tunable engine knobs resolved from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineSettings {
    pub score: ScoreCalibration,
    pub recommendations: RankerSettings,
}

/// The complete dashboard bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dashboard {
    pub business_name: String,
    pub current_month: String,
    pub header_stats: HeaderStats,
    pub revenue_leak: Vec<LeakCategory>,
    pub total_revenue_leak: f64,
    pub monthly_performance: Vec<MonthlyPoint>,
    pub monthly_comparison: MonthlyComparison,
    pub lead_sources: Vec<LeadSource>,
    pub response_time: ResponseTimes,
    pub reviews: ReviewTracker,
    pub conversion_funnel: Vec<FunnelStage>,
    pub weekly_summary: Vec<WeeklyCard>,
    pub action_items: Vec<ActionItem>,
    pub protection_score: ProtectionScore,
    pub recommended_actions: Vec<Recommendation>,
    pub tier_status: TierStatus,
    pub has_website: bool,
}

impl Default for Dashboard {
    /// The default dashboard is the computed bundle for default inputs, so
    /// fields absent from an imported JSON object fall back to meaningful
    /// sample values rather than zeroes.
    fn default() -> Self {
        compute_dashboard(&RawInputs::default())
    }
}

impl Dashboard {
    /// Deserialize a bundle from a JSON value, filling absent fields from
    /// the default dashboard.
    pub fn from_value(value: serde_json::Value) -> Result<Dashboard, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Assemble the dashboard with default settings.
pub fn compute_dashboard(inputs: &RawInputs) -> Dashboard {
    compute_dashboard_with_settings(inputs, &EngineSettings::default())
}

/// Assemble the dashboard with custom settings.
pub fn compute_dashboard_with_settings(inputs: &RawInputs, settings: &EngineSettings) -> Dashboard {
    let money = compute_money_lost(inputs);
    let categories = compute_leak_categories(inputs, &money);
    let protection_score =
        compute_protection_score_with_calibration(&categories, money.total, &settings.score);
    let recommended_actions =
        rank_recommendations_with_settings(&categories, &settings.recommendations);

    Dashboard {
        business_name: inputs.business_name.clone(),
        current_month: inputs.current_month.clone(),
        header_stats: compute_header_stats(inputs),
        total_revenue_leak: money.total,
        monthly_performance: compute_monthly_performance(inputs),
        monthly_comparison: compute_monthly_comparison(inputs),
        lead_sources: compute_lead_sources(inputs),
        response_time: compute_response_times(),
        reviews: compute_review_tracker(inputs),
        conversion_funnel: compute_funnel(inputs),
        weekly_summary: compute_weekly_summary(inputs, money.total),
        action_items: compute_action_items(inputs),
        protection_score,
        recommended_actions,
        tier_status: TierStatus::default(),
        has_website: inputs.has_website,
        revenue_leak: categories,
    }
}

/// Render the bundle as pretty-printed JSON.
pub fn render_json(dashboard: &Dashboard) -> anyhow::Result<String> {
    serde_json::to_string_pretty(dashboard).map_err(Into::into)
}

/// Render a plain-text report of the bundle.
pub fn render_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} - {}",
        dashboard.business_name, dashboard.current_month
    );
    let _ = writeln!(
        out,
        "Protection score: {} ({})",
        format_number(dashboard.protection_score.score),
        dashboard.protection_score.label.as_str()
    );
    let _ = writeln!(
        out,
        "Estimated monthly revenue leak: {}",
        format_currency(dashboard.total_revenue_leak)
    );
    let _ = writeln!(
        out,
        "Calls: {} total, {} answered, {} missed ({}% captured)",
        format_number(dashboard.header_stats.total_calls),
        format_number(dashboard.header_stats.calls_answered),
        format_number(dashboard.header_stats.calls_missed),
        format_number(dashboard.header_stats.capture_rate),
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Revenue leaks:");
    for leak in &dashboard.revenue_leak {
        let _ = writeln!(
            out,
            "  [{}] {} - {} ({} lost opportunities)",
            leak.status.as_str(),
            leak.name,
            format_currency(leak.estimated_revenue),
            format_number(leak.lost_opportunities),
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Conversion funnel:");
    for stage in &dashboard.conversion_funnel {
        let _ = writeln!(
            out,
            "  {}: {}",
            stage.stage,
            format_number(stage.count)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Response times:");
    let channels = [
        ("Phone calls", &dashboard.response_time.phone_calls),
        ("Text messages", &dashboard.response_time.text_messages),
        ("Contact forms", &dashboard.response_time.contact_forms),
        ("After hours", &dashboard.response_time.after_hours),
    ];
    for (label, channel) in channels {
        let _ = writeln!(
            out,
            "  {}: {} [{}]",
            label,
            format_minutes(channel.average),
            channel.status.as_str(),
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Reviews: {} of {} goal ({} new this month)",
        format_number(dashboard.reviews.current),
        format_number(dashboard.reviews.monthly_goal),
        format_number(dashboard.reviews.new_this_month),
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Recommended actions:");
    for (i, rec) in dashboard.recommended_actions.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({}/month at stake) - {}",
            i + 1,
            rec.title,
            format_currency(rec.monthly_loss),
            rec.impact,
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Needs attention:");
    for item in &dashboard.action_items {
        let _ = writeln!(out, "  [{}] {}", item.severity.as_str(), item.title);
    }

    out
}
