//! Required artifact verification

use std::path::Path;

use tracing::{debug, warn};

use crate::filesys::file::File;

/// Existence of each required artifact, in the order it was requested
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrerequisiteReport {
    entries: Vec<(String, bool)>,
}

impl PrerequisiteReport {
    /// Whether `path` exists; `None` if it was not checked
    pub fn get(&self, path: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, exists)| *exists)
    }

    pub fn missing(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, exists)| !exists)
            .map(|(p, _)| p.clone())
            .collect()
    }

    pub fn all_present(&self) -> bool {
        self.entries.iter().all(|(_, exists)| *exists)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(p, exists)| (p.as_str(), *exists))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check that every required path exists under `root`.
///
/// A missing artifact is recorded, never an error.
pub async fn check_prerequisites(root: &Path, required: &[String]) -> PrerequisiteReport {
    let mut report = PrerequisiteReport::default();

    for path in required {
        if report.get(path).is_some() {
            continue;
        }

        let exists = File::new(root.join(path)).exists().await;
        if exists {
            debug!("Verified file exists: {}", path);
        } else {
            warn!("Required file not found: {}", path);
        }
        report.entries.push((path.clone(), exists));
    }

    report
}
