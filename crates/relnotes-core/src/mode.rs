//! Output mode.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Which views of history end up in the changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Categorized pull requests only.
    #[default]
    Pr,
    /// A flat commit list only.
    Commit,
    /// Categorized pull requests plus commits not already covered by them.
    Hybrid,
}

impl Mode {
    /// Returns true if pull request sections are rendered.
    #[must_use]
    pub fn includes_pulls(self) -> bool {
        match self {
            Mode::Pr | Mode::Hybrid => true,
            Mode::Commit => false,
        }
    }

    /// Returns true if the commit section is rendered.
    #[must_use]
    pub fn includes_commits(self) -> bool {
        match self {
            Mode::Commit | Mode::Hybrid => true,
            Mode::Pr => false,
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Pr => "PR",
            Mode::Commit => "COMMIT",
            Mode::Hybrid => "HYBRID",
        }
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PR" => Ok(Mode::Pr),
            "COMMIT" => Ok(Mode::Commit),
            "HYBRID" => Ok(Mode::Hybrid),
            _ => Err(CoreError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        assert_eq!("PR".parse::<Mode>().unwrap(), Mode::Pr);
        assert_eq!("COMMIT".parse::<Mode>().unwrap(), Mode::Commit);
        assert_eq!("HYBRID".parse::<Mode>().unwrap(), Mode::Hybrid);
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("hybrid".parse::<Mode>().unwrap(), Mode::Hybrid);
        assert_eq!(" Pr ".parse::<Mode>().unwrap(), Mode::Pr);
    }

    #[test]
    fn test_parse_invalid() {
        let err = "everything".parse::<Mode>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidMode(ref m) if m == "everything"));
    }

    #[test]
    fn test_parse_empty_is_invalid() {
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_sections() {
        assert!(Mode::Pr.includes_pulls());
        assert!(!Mode::Pr.includes_commits());
        assert!(!Mode::Commit.includes_pulls());
        assert!(Mode::Commit.includes_commits());
        assert!(Mode::Hybrid.includes_pulls());
        assert!(Mode::Hybrid.includes_commits());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [Mode::Pr, Mode::Commit, Mode::Hybrid] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(Mode::default(), Mode::Pr);
    }
}
