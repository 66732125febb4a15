//! Output drivers for rendering API resources.

use std::fmt::{Debug, Display};
use std::io::Write;

use serde::Serialize;
use vela_core::Result;

/// Format used to render a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Driver {
    /// Single-line structured dump.
    Dump,
    Json,
    /// Verbose multi-line debug dump.
    Spew,
    Yaml,
    /// Human-readable text.
    #[default]
    Stdout,
}

impl Driver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Dump => "dump",
            Driver::Json => "json",
            Driver::Spew => "spew",
            Driver::Yaml => "yaml",
            Driver::Stdout => "stdout",
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Any unrecognized name, including the empty string, selects [`Driver::Stdout`].
impl From<&str> for Driver {
    fn from(s: &str) -> Self {
        match s {
            "dump" => Driver::Dump,
            "json" => Driver::Json,
            "spew" => Driver::Spew,
            "yaml" => Driver::Yaml,
            _ => Driver::Stdout,
        }
    }
}

/// Renders `value` to `out` with exactly one driver.
pub fn render<T, W>(driver: Driver, value: &T, out: &mut W) -> Result<()>
where
    T: Serialize + Debug + Display + ?Sized,
    W: Write + ?Sized,
{
    tracing::trace!(driver = %driver, "rendering output");

    match driver {
        Driver::Dump => dump(value, out),
        Driver::Json => json(value, out),
        Driver::Spew => spew(value, out),
        Driver::Yaml => yaml(value, out),
        Driver::Stdout => stdout(value, out),
    }
}

pub fn dump<T: Debug + ?Sized, W: Write + ?Sized>(value: &T, out: &mut W) -> Result<()> {
    writeln!(out, "{:?}", value)?;
    Ok(())
}

pub fn json<T: Serialize + ?Sized, W: Write + ?Sized>(value: &T, out: &mut W) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", content)?;
    Ok(())
}

pub fn spew<T: Debug + ?Sized, W: Write + ?Sized>(value: &T, out: &mut W) -> Result<()> {
    writeln!(out, "{:#?}", value)?;
    Ok(())
}

pub fn yaml<T: Serialize + ?Sized, W: Write + ?Sized>(value: &T, out: &mut W) -> Result<()> {
    // serde_yaml already terminates the document with a newline
    let content = serde_yaml::to_string(value)?;
    out.write_all(content.as_bytes())?;
    Ok(())
}

pub fn stdout<T: Display + ?Sized, W: Write + ?Sized>(value: &T, out: &mut W) -> Result<()> {
    writeln!(out, "{}", value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::models::Repo;
    use vela_core::VelaError;

    fn sample_repo() -> Repo {
        Repo {
            id: Some(1),
            org: Some("octo".to_string()),
            name: Some("repo".to_string()),
            full_name: Some("octo/repo".to_string()),
            allow_push: Some(true),
            ..Default::default()
        }
    }

    fn render_to_string(driver: Driver, repo: &Repo) -> String {
        let mut out = Vec::new();
        render(driver, repo, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_driver_from_str() {
        assert_eq!(Driver::from("dump"), Driver::Dump);
        assert_eq!(Driver::from("json"), Driver::Json);
        assert_eq!(Driver::from("spew"), Driver::Spew);
        assert_eq!(Driver::from("yaml"), Driver::Yaml);
        assert_eq!(Driver::from("stdout"), Driver::Stdout);
        assert_eq!(Driver::from(""), Driver::Stdout);
        assert_eq!(Driver::from("xml"), Driver::Stdout);
        assert_eq!(Driver::from("JSON"), Driver::Stdout);
    }

    #[test]
    fn test_render_json() {
        let output = render_to_string(Driver::Json, &sample_repo());
        let parsed: Repo = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample_repo());
        assert!(output.contains("\n  \"org\": \"octo\""));
    }

    #[test]
    fn test_render_yaml() {
        let output = render_to_string(Driver::Yaml, &sample_repo());
        assert!(output.contains("full_name: octo/repo\n"));
        assert!(output.contains("allow_push: true\n"));
        assert!(!output.contains("allow_pull"));
    }

    #[test]
    fn test_render_dump_is_single_line() {
        let output = render_to_string(Driver::Dump, &sample_repo());
        assert!(output.starts_with("Repo {"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_render_spew_is_multi_line() {
        let output = render_to_string(Driver::Spew, &sample_repo());
        assert!(output.starts_with("Repo {\n"));
        assert!(output.contains("    full_name: Some(\n"));
    }

    #[test]
    fn test_render_stdout_uses_display() {
        let output = render_to_string(Driver::Stdout, &sample_repo());
        assert!(output.contains("Full Name:     octo/repo"));
        assert!(output.contains("Events:        push"));
    }

    #[test]
    fn test_render_plain_message() {
        let mut out = Vec::new();
        render(Driver::Json, "repo octo/repo deleted", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"repo octo/repo deleted\"\n");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_propagates_write_failure() {
        let err = render(Driver::Stdout, &sample_repo(), &mut FailingWriter).unwrap_err();
        assert!(matches!(err, VelaError::Io(_)));
    }
}
