use std::io::Write;

use vela_core::{RepoService, Result};

use super::Config;
use crate::output;

impl Config {
    /// Removes the repository and renders the server's confirmation.
    pub async fn remove<C, W>(&self, client: &C, out: &mut W) -> Result<()>
    where
        C: RepoService + ?Sized,
        W: Write + ?Sized,
    {
        tracing::debug!("executing remove for repo configuration");

        tracing::trace!("removing repo {}/{}", self.org, self.name);

        let message = client.remove(&self.org, &self.name).await?;

        output::render(self.output, message.as_str(), out)
    }
}
