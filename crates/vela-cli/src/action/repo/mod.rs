//! Repository actions.

mod add;
mod remove;
mod validate;
mod view;

use crate::output::Driver;

/// Which repository action a [`Config`] is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    View,
    Remove,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::View => "view",
            Action::Remove => "remove",
        }
    }
}

/// Everything a repository action needs, already resolved from flags,
/// environment and profile.
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub org: String,
    pub name: String,
    pub link: String,
    pub clone: String,
    pub branch: String,
    pub timeout: i64,
    pub counter: i32,
    pub visibility: String,
    pub private: bool,
    pub trusted: bool,
    pub active: bool,
    /// Event names; unknown names and duplicates are ignored on add.
    pub events: Vec<String>,
    pub pipeline_type: String,
    pub output: Driver,
}

impl Config {
    /// A config carrying only the repository's identity, as used by view and remove.
    pub fn for_repo(action: Action, org: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            action,
            org: org.into(),
            name: name.into(),
            link: String::new(),
            clone: String::new(),
            branch: String::new(),
            timeout: 0,
            counter: 0,
            visibility: String::new(),
            private: false,
            trusted: false,
            active: false,
            events: Vec::new(),
            pipeline_type: String::new(),
            output: Driver::default(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`RepoService`] double shared by the action tests.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use vela_core::models::Repo;
    use vela_core::{RepoService, Result, VelaError};

    /// Records requests and answers with canned responses.
    #[derive(Default)]
    pub struct MockRepoService {
        pub added: Mutex<Vec<Repo>>,
        pub fetched: Mutex<Vec<(String, String)>>,
        pub removed: Mutex<Vec<(String, String)>>,
        /// When set, every call fails with this status and message.
        pub fail_with: Option<(u16, String)>,
        /// Overrides the repo returned by `add` and `get`.
        pub response: Option<Repo>,
    }

    impl MockRepoService {
        pub fn failing(status: u16, message: &str) -> Self {
            Self {
                fail_with: Some((status, message.to_string())),
                ..Default::default()
            }
        }

        pub fn responding(repo: Repo) -> Self {
            Self {
                response: Some(repo),
                ..Default::default()
            }
        }

        fn check(&self) -> Result<()> {
            match &self.fail_with {
                Some((status, message)) => Err(VelaError::Api {
                    status: *status,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl RepoService for MockRepoService {
        async fn add(&self, repo: &Repo) -> Result<Repo> {
            self.added.lock().unwrap().push(repo.clone());
            self.check()?;
            Ok(self.response.clone().unwrap_or_else(|| repo.clone()))
        }

        async fn get(&self, org: &str, name: &str) -> Result<Repo> {
            self.fetched
                .lock()
                .unwrap()
                .push((org.to_string(), name.to_string()));
            self.check()?;
            Ok(self.response.clone().unwrap_or_else(|| Repo {
                org: Some(org.to_string()),
                name: Some(name.to_string()),
                full_name: Some(Repo::full_name_of(org, name)),
                ..Default::default()
            }))
        }

        async fn remove(&self, org: &str, name: &str) -> Result<String> {
            self.removed
                .lock()
                .unwrap()
                .push((org.to_string(), name.to_string()));
            self.check()?;
            Ok(format!("repo {}/{} deleted", org, name))
        }
    }
}
