//! Repository model.

use serde::{Deserialize, Serialize};

use super::Event;

/// A repository registered with the Vela server.
///
/// Every field is optional: requests only carry what the caller set, and
/// responses may leave out anything the server doesn't report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Always `<org>/<name>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Build timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    /// Next build number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_pull: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_push: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deploy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_tag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_comment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_type: Option<String>,
}

impl Repo {
    /// Builds the `<org>/<name>` full name.
    pub fn full_name_of(org: &str, name: &str) -> String {
        format!("{}/{}", org, name)
    }

    /// Marks the repository as building on `event`.
    pub fn allow(&mut self, event: Event) {
        let flag = match event {
            Event::Push => &mut self.allow_push,
            Event::PullRequest => &mut self.allow_pull,
            Event::Tag => &mut self.allow_tag,
            Event::Deployment => &mut self.allow_deploy,
            Event::Comment => &mut self.allow_comment,
        };
        *flag = Some(true);
    }

    /// Whether the repository builds on `event`. Unset counts as no.
    pub fn allows(&self, event: Event) -> bool {
        let flag = match event {
            Event::Push => self.allow_push,
            Event::PullRequest => self.allow_pull,
            Event::Tag => self.allow_tag,
            Event::Deployment => self.allow_deploy,
            Event::Comment => self.allow_comment,
        };
        flag.unwrap_or(false)
    }

    /// Events the repository builds on, in canonical order.
    pub fn allowed_events(&self) -> Vec<Event> {
        Event::ALL
            .into_iter()
            .filter(|event| self.allows(*event))
            .collect()
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

impl std::fmt::Display for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(id) = self.id {
            writeln!(f, "ID:            {}", id)?;
        }
        writeln!(f, "Full Name:     {}", text(&self.full_name))?;
        writeln!(f, "Link:          {}", text(&self.link))?;
        writeln!(f, "Clone URL:     {}", text(&self.clone))?;
        writeln!(f, "Branch:        {}", text(&self.branch))?;
        match self.timeout {
            Some(timeout) => writeln!(f, "Timeout:       {}", timeout)?,
            None => writeln!(f, "Timeout:       -")?,
        }
        match self.counter {
            Some(counter) => writeln!(f, "Counter:       {}", counter)?,
            None => writeln!(f, "Counter:       -")?,
        }
        writeln!(f, "Visibility:    {}", text(&self.visibility))?;
        writeln!(f, "Private:       {}", yes_no(self.private))?;
        writeln!(f, "Trusted:       {}", yes_no(self.trusted))?;
        writeln!(f, "Active:        {}", yes_no(self.active))?;

        let events: Vec<&str> = self.allowed_events().iter().map(|e| e.as_str()).collect();
        if events.is_empty() {
            writeln!(f, "Events:        (none)")?;
        } else {
            writeln!(f, "Events:        {}", events.join(", "))?;
        }

        write!(f, "Pipeline Type: {}", text(&self.pipeline_type))
    }
}
