//! Build trigger events.

use serde::{Deserialize, Serialize};

/// Source-control activity a repository can be configured to build on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Push,
    PullRequest,
    Tag,
    Deployment,
    Comment,
}

impl Event {
    /// Every event the API knows about.
    pub const ALL: [Event; 5] = [
        Event::Push,
        Event::PullRequest,
        Event::Tag,
        Event::Deployment,
        Event::Comment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Push => "push",
            Event::PullRequest => "pull_request",
            Event::Tag => "tag",
            Event::Deployment => "deployment",
            Event::Comment => "comment",
        }
    }

    /// Looks up an event by its exact wire name.
    ///
    /// Returns `None` for names outside the fixed set so callers can skip
    /// them without treating it as an error.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.as_str() == name)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Event {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown event: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_events() {
        assert_eq!(Event::parse("push"), Some(Event::Push));
        assert_eq!(Event::parse("pull_request"), Some(Event::PullRequest));
        assert_eq!(Event::parse("tag"), Some(Event::Tag));
        assert_eq!(Event::parse("deployment"), Some(Event::Deployment));
        assert_eq!(Event::parse("comment"), Some(Event::Comment));
    }

    #[test]
    fn test_parse_unknown_event() {
        assert_eq!(Event::parse("schedule"), None);
        assert_eq!(Event::parse(""), None);
        // Wire names are matched exactly
        assert_eq!(Event::parse("PUSH"), None);
    }

    #[test]
    fn test_serde_matches_wire_names() {
        for event in Event::ALL {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{}\"", event.as_str()));
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<Event>().unwrap_err();
        assert!(err.contains("nope"));
    }
}
