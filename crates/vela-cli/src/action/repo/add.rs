use std::io::Write;

use vela_core::models::{Event, Repo};
use vela_core::{RepoService, Result};

use super::Config;
use crate::output;

impl Config {
    /// Builds the repository the add action sends to the server.
    ///
    /// Fields are copied as given; the server is left to reject bad values.
    pub fn to_repo(&self) -> Repo {
        let mut repo = Repo {
            org: Some(self.org.clone()),
            name: Some(self.name.clone()),
            full_name: Some(Repo::full_name_of(&self.org, &self.name)),
            link: Some(self.link.clone()),
            clone: Some(self.clone.clone()),
            branch: Some(self.branch.clone()),
            timeout: Some(self.timeout),
            counter: Some(self.counter),
            visibility: Some(self.visibility.clone()),
            private: Some(self.private),
            trusted: Some(self.trusted),
            active: Some(self.active),
            pipeline_type: Some(self.pipeline_type.clone()),
            ..Default::default()
        };

        for event in self.events.iter().filter_map(|name| Event::parse(name)) {
            repo.allow(event);
        }

        repo
    }

    /// Creates the repository and renders what the server returned.
    pub async fn add<C, W>(&self, client: &C, out: &mut W) -> Result<()>
    where
        C: RepoService + ?Sized,
        W: Write + ?Sized,
    {
        tracing::debug!("executing add for repo configuration");

        let request = self.to_repo();

        tracing::trace!("adding repo {}/{}", self.org, self.name);

        let repo = client.add(&request).await?;

        output::render(self.output, &repo, out)
    }
}
