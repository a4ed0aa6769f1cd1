//! Dashboard persistence
//!
//! Stores one dashboard snapshot as pretty-printed JSON under
//! `.leakscope/dashboard.json` in a caller-chosen root directory.
//!
//! Global invariants enforced:
//! - Loading never fails: a missing snapshot silently yields the sample
//!   dashboard, an unreadable one warns once and yields the sample
//! - Importing is strict: bad JSON or a non-dashboard shape is an error,
//!   never a silent fallback

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

use crate::dashboard::Dashboard;
use crate::sample::sample_dashboard;

const STORE_DIR: &str = ".leakscope";
const STORE_FILE: &str = "dashboard.json";

/// Why an external JSON document could not be imported.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    /// The document is valid JSON but not a dashboard object.
    #[error("not a dashboard object: {0}")]
    Shape(String),
}

/// Path of the snapshot file under `root`.
pub fn store_path(root: &Path) -> PathBuf {
    root.join(STORE_DIR).join(STORE_FILE)
}

/// Persist the dashboard snapshot, creating the store directory if needed.
pub fn save(root: &Path, dashboard: &Dashboard) -> anyhow::Result<()> {
    let dir = root.join(STORE_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create store directory {}", dir.display()))?;
    let path = dir.join(STORE_FILE);
    let json = serde_json::to_string_pretty(dashboard)?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    Ok(())
}

/// Load the stored snapshot, or the sample dashboard when none exists.
///
/// A missing file is the expected first-run state and stays silent. Any
/// other failure (unreadable file, corrupt JSON, wrong shape) warns on
/// stderr and falls back to the sample.
pub fn load(root: &Path) -> Dashboard {
    let path = store_path(root);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return sample_dashboard(),
        Err(e) => {
            eprintln!("warning: could not read {}: {}", path.display(), e);
            return sample_dashboard();
        }
    };
    match import_json(&text) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            eprintln!(
                "warning: ignoring stored snapshot {}: {}",
                path.display(),
                e
            );
            sample_dashboard()
        }
    }
}

/// Parse an external JSON document into a dashboard.
///
/// The document must be a JSON object; absent fields fill from the default
/// dashboard, present fields must carry the right types.
pub fn import_json(text: &str) -> Result<Dashboard, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    if !value.is_object() {
        return Err(ImportError::Shape(
            "top-level value is not an object".to_string(),
        ));
    }
    Dashboard::from_value(value).map_err(|e| ImportError::Shape(e.to_string()))
}
