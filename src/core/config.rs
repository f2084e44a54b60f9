use crate::core::ledger::{Ledger, ParticipantId};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

fn default_currency() -> String {
    "$".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Symbol printed in front of every amount.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Participant the balances are phrased for ("you owe", "you are owed").
    #[serde(default)]
    pub current_user: Option<ParticipantId>,
    #[serde(flatten)]
    pub ledger: Ledger,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default ledger");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "splitbook", "splitbook")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("ledger.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read ledger file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse ledger file: {}", path.as_ref().display()))?;
        debug!(
            participants = config.ledger.participants.len(),
            expenses = config.ledger.expenses.len(),
            "Successfully loaded ledger"
        );
        config.check_current_user();
        Ok(config)
    }

    fn check_current_user(&self) {
        if let Some(me) = &self.current_user {
            if self.ledger.participant(me).is_none() {
                warn!(%me, "current_user does not match any participant");
            }
        }
    }
}
