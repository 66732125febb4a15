use std::io::Write;

use vela_core::{RepoService, Result};

use super::Config;
use crate::output;

impl Config {
    /// Fetches the repository and renders it.
    pub async fn view<C, W>(&self, client: &C, out: &mut W) -> Result<()>
    where
        C: RepoService + ?Sized,
        W: Write + ?Sized,
    {
        tracing::debug!("executing view for repo configuration");

        tracing::trace!("inspecting repo {}/{}", self.org, self.name);

        let repo = client.get(&self.org, &self.name).await?;

        output::render(self.output, &repo, out)
    }
}
