//! Leakscope core library - revenue-leak analysis for service businesses

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Derivation is strictly pure (no clocks, randomness, threads, or async)
// - Caller-supplied inputs are never mutated
// - Identical inputs yield an identical dashboard bundle
// - Arithmetic never panics; bad numbers surface as NaN in the affected
//   metric only
// - All monetary figures are rounded half away from zero before display

pub mod actions;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod inputs;
pub mod leaks;
pub mod projection;
pub mod sample;
pub mod score;
pub mod store;
pub mod views;
pub mod whatif;

pub use config::ResolvedConfig;
pub use dashboard::{
    compute_dashboard, compute_dashboard_with_settings, render_json, render_text, Dashboard,
    EngineSettings,
};
pub use inputs::{FieldValue, RawInputs};
pub use projection::{project, ProjectionSet};
pub use sample::{sample_dashboard, DemoProfile};
pub use score::ProtectionScore;
pub use store::ImportError;
pub use whatif::{compute_what_if, WhatIfInputs, WhatIfScenario};
