use anyhow::{bail, Result};

use super::{Action, Config};

impl Config {
    /// Checks the config before any API call is made.
    ///
    /// Event names are left alone: the add action skips names it doesn't
    /// recognize.
    pub fn validate(&self) -> Result<()> {
        tracing::debug!("validating repo configuration for {}", self.action.as_str());

        if self.org.is_empty() {
            bail!("no repo org provided");
        }

        if self.name.is_empty() {
            bail!("no repo name provided");
        }

        if self.action == Action::Add {
            if self.branch.is_empty() {
                bail!("no repo branch provided");
            }

            if self.timeout <= 0 {
                bail!("repo timeout must be greater than 0, got {}", self.timeout);
            }
        }

        Ok(())
    }
}
