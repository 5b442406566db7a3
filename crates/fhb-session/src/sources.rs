use std::path::PathBuf;

use anyhow::{Context, Result};

use fhb_core::{FreelancerTier, Project};

/// Project-data collaborator: supplies the project once per session. The
/// engine treats the result as read-only and never re-fetches.
pub trait ProjectSource: Send + Sync {
    fn fetch_project(&self) -> Result<Project>;
}

/// Account/subscription collaborator: supplies the current tier.
pub trait TierSource: Send + Sync {
    fn current_tier(&self) -> Result<FreelancerTier>;
}

/// Fixture-file implementation used by the CLI and tests.
pub struct JsonProjectFile {
    pub path: PathBuf,
}

impl JsonProjectFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProjectSource for JsonProjectFile {
    fn fetch_project(&self) -> Result<Project> {
        let s = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read project file {}", self.path.display()))?;
        let project: Project =
            serde_json::from_str(&s).with_context(|| "parse project json")?;
        Ok(project)
    }
}

/// Tier pinned at construction time (what a real account service would
/// have answered).
pub struct FixedTier(pub FreelancerTier);

impl TierSource for FixedTier {
    fn current_tier(&self) -> Result<FreelancerTier> {
        Ok(self.0)
    }
}
