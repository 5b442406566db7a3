use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use fhb_core::TierLimits;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    pub tiers: TierLimits,
    pub submission: SubmissionConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub max_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tiers: TierLimits::default(),
            submission: SubmissionConfig { max_attempts: 3 },
        }
    }
}

impl SessionConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: SessionConfig = toml::from_str(&s).with_context(|| "parse fhb.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Load the config, writing defaults on first run.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".fhb").join("fhb.toml")
    }

    pub fn state_path(root: &Path) -> PathBuf {
        root.join(".fhb").join("session.json")
    }

    pub fn project_path(root: &Path) -> PathBuf {
        root.join(".fhb").join("project.json")
    }
}
