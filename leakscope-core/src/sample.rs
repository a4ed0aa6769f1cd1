//! Sample data and demo profiles
//!
//! The sample dashboard is the computed bundle for the default input set;
//! it backs the silent fallback when no stored snapshot exists. The demo
//! profiles are input presets for three business stages.

use crate::dashboard::{compute_dashboard, Dashboard};
use crate::inputs::RawInputs;

/// One of the three demo business stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoProfile {
    /// Just started (1 month in). Low volume, poor capture, few reviews.
    New,
    /// Growing steady (2-3 years in). Healthy volume and capture.
    Established,
    /// Losing revenue (seasonal downturn). Weak capture, slow response.
    Struggling,
}

impl DemoProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoProfile::New => "new",
            DemoProfile::Established => "established",
            DemoProfile::Struggling => "struggling",
        }
    }

    pub fn from_name(name: &str) -> Option<DemoProfile> {
        match name {
            "new" => Some(DemoProfile::New),
            "established" => Some(DemoProfile::Established),
            "struggling" => Some(DemoProfile::Struggling),
            _ => None,
        }
    }

    /// Input preset for this profile. Fields the preset does not cover
    /// keep their defaults.
    pub fn inputs(&self) -> RawInputs {
        let base = RawInputs::default();
        match self {
            DemoProfile::New => RawInputs {
                business_name: "New Client".to_string(),
                total_calls: 45.0.into(),
                calls_answered: 28.0.into(),
                avg_job_value: 900.0.into(),
                current_reviews: 3.0.into(),
                avg_response_time: 22.0.into(),
                ..base
            },
            DemoProfile::Established => RawInputs {
                business_name: "Established".to_string(),
                total_calls: 142.0.into(),
                calls_answered: 118.0.into(),
                avg_job_value: 1500.0.into(),
                current_reviews: 45.0.into(),
                avg_response_time: 8.0.into(),
                ..base
            },
            DemoProfile::Struggling => RawInputs {
                business_name: "Struggling Client".to_string(),
                total_calls: 78.0.into(),
                calls_answered: 45.0.into(),
                avg_job_value: 1200.0.into(),
                current_reviews: 18.0.into(),
                avg_response_time: 35.0.into(),
                ..base
            },
        }
    }
}

/// The sample dashboard used when no stored snapshot exists.
pub fn sample_dashboard() -> Dashboard {
    compute_dashboard(&RawInputs::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_matches_default_inputs() {
        let sample = sample_dashboard();
        assert_eq!(sample.total_revenue_leak, 22470.0);
        assert_eq!(sample.business_name, "My Service Business");
    }

    #[test]
    fn test_profile_round_trip_names() {
        for profile in [
            DemoProfile::New,
            DemoProfile::Established,
            DemoProfile::Struggling,
        ] {
            assert_eq!(DemoProfile::from_name(profile.as_str()), Some(profile));
        }
        assert_eq!(DemoProfile::from_name("enterprise"), None);
    }

    #[test]
    fn test_profiles_differ_in_capture() {
        let new = compute_dashboard(&DemoProfile::New.inputs());
        let struggling = compute_dashboard(&DemoProfile::Struggling.inputs());
        let established = compute_dashboard(&DemoProfile::Established.inputs());
        // 28/45 = 62.2; 45/78 = 57.7; 118/142 = 83.1
        assert_eq!(new.header_stats.capture_rate, 62.2);
        assert_eq!(struggling.header_stats.capture_rate, 57.7);
        assert_eq!(established.header_stats.capture_rate, 83.1);
    }

    #[test]
    fn test_struggling_profile_flags_slow_response() {
        let dashboard = compute_dashboard(&DemoProfile::Struggling.inputs());
        let slow = dashboard
            .revenue_leak
            .iter()
            .find(|c| c.id == "slow-response")
            .unwrap();
        assert_eq!(slow.status, crate::leaks::Status::Critical);
    }
}
