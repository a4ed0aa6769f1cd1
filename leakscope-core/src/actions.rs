//! Recommendation ranker
//!
//! Maps leak categories to a static action catalog, ranks by revenue
//! impact, and selects the top three.
//!
//! Global invariants enforced:
//! - Never more than three recommendations
//! - Zero qualifying categories yields the fixed default trio, never an
//!   empty or randomized set
//! - Ranking is descending by monthly loss, stable for equal values

use crate::leaks::LeakCategory;
use serde::{Deserialize, Serialize};

/// Ranker settings.
#[derive(Debug, Clone, Copy)]
pub struct RankerSettings {
    /// Minimum estimated monthly revenue for a category to qualify.
    pub revenue_threshold: f64,
    /// Maximum number of recommendations returned.
    pub top_n: usize,
}

impl Default for RankerSettings {
    fn default() -> Self {
        RankerSettings {
            revenue_threshold: 5000.0,
            top_n: 3,
        }
    }
}

/// One recommended recovery action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    /// Display name of the leak the recommendation addresses.
    pub leak_type: String,
    pub monthly_loss: f64,
    pub title: String,
    pub description: String,
    /// Qualitative impact shown when no dollar figure applies.
    pub impact: String,
    pub icon: String,
}

/// One static catalog entry.
struct CatalogEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    impact: &'static str,
    icon: &'static str,
}

/// Static action catalog keyed by leak category id.
const ACTION_CATALOG: [CatalogEntry; 6] = [
    CatalogEntry {
        id: "lead-response",
        title: "Improve Lead Response Time",
        description: "Quick response to leads increases conversion rates significantly. Speed matters.",
        impact: "18% revenue lift",
        icon: "trending-up",
    },
    CatalogEntry {
        id: "review-strategy",
        title: "Boost Google & Reviews",
        description: "More reviews = higher ranking in search results. Target 5 new reviews this month.",
        impact: "24% lead growth",
        icon: "bar-chart",
    },
    CatalogEntry {
        id: "scheduling",
        title: "Implement Online Booking",
        description: "Reduce friction in scheduling with self-service online calendar.",
        impact: "$8,400/month",
        icon: "target",
    },
    CatalogEntry {
        id: "quote-process",
        title: "Streamline Quote Process",
        description: "Faster quotes = faster conversions. Train team on speed benchmarks.",
        impact: "14% quote-to-booking",
        icon: "trending-up",
    },
    CatalogEntry {
        id: "website-conversion",
        title: "Optimize Website CTA",
        description: "Update homepage with clear, prominent call-to-action buttons.",
        impact: "12% form submissions",
        icon: "bar-chart",
    },
    CatalogEntry {
        id: "offline-leads",
        title: "Capture Walk-In/Phone Leads",
        description: "Implement lead qualification system for phone & in-person inquiries.",
        impact: "$6,200/month",
        icon: "target",
    },
];

fn catalog_entry(id: &str) -> Option<&'static CatalogEntry> {
    ACTION_CATALOG.iter().find(|e| e.id == id)
}

fn recommendation_from(entry: &CatalogEntry, leak_type: &str, monthly_loss: f64) -> Recommendation {
    Recommendation {
        id: entry.id.to_string(),
        leak_type: leak_type.to_string(),
        monthly_loss,
        title: entry.title.to_string(),
        description: entry.description.to_string(),
        impact: entry.impact.to_string(),
        icon: entry.icon.to_string(),
    }
}

/// Fixed default trio returned when no category qualifies: the first three
/// catalog entries with preset illustrative loss figures, not derived from
/// inputs.
fn default_recommendations() -> Vec<Recommendation> {
    [
        ("Lead Response Time", 18800.0),
        ("Review Count", 14600.0),
        ("Scheduling Friction", 12400.0),
    ]
    .iter()
    .zip(&ACTION_CATALOG)
    .map(|(&(leak_type, loss), entry)| recommendation_from(entry, leak_type, loss))
    .collect()
}

/// Rank recommendations with default settings.
pub fn rank_recommendations(categories: &[LeakCategory]) -> Vec<Recommendation> {
    rank_recommendations_with_settings(categories, &RankerSettings::default())
}

/// Rank recommendations with custom settings.
///
/// A category qualifies when its estimated revenue exceeds the threshold
/// and the catalog carries an entry for its id. Qualifying candidates are
/// ranked descending by monthly loss; the top N survive. With zero
/// qualifiers the fixed default trio is returned.
pub fn rank_recommendations_with_settings(
    categories: &[LeakCategory],
    settings: &RankerSettings,
) -> Vec<Recommendation> {
    let mut candidates: Vec<Recommendation> = categories
        .iter()
        .filter(|c| c.estimated_revenue > settings.revenue_threshold)
        .filter_map(|c| {
            catalog_entry(&c.id).map(|entry| recommendation_from(entry, &c.name, c.estimated_revenue))
        })
        .collect();

    if candidates.is_empty() {
        return default_recommendations();
    }

    candidates.sort_by(|a, b| {
        b.monthly_loss
            .partial_cmp(&a.monthly_loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(settings.top_n);
    candidates
}
