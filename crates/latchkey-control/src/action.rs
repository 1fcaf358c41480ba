//! The untyped-to-typed boundary for remote commands.

use std::fmt;

/// A recognized remote action.
///
/// Unknown action names never make it past [`Action::parse`], so nothing
/// downstream needs an "unknown command" branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Report the current door state.
    State,

    /// Pulse the Open pin and respond after the pulse completes.
    Unlock,

    /// Acknowledge without driving any pin.
    Lock,
}

impl Action {
    /// Parse an action name from a query parameter.
    ///
    /// Matching is exact: no case folding, no trimming, so `"Unlock"` and
    /// `" state"` are rejected like any other unknown name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "state" => Some(Self::State),
            "unlock" => Some(Self::Unlock),
            "lock" => Some(Self::Lock),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => write!(f, "state"),
            Self::Unlock => write!(f, "unlock"),
            Self::Lock => write!(f, "lock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("state", Some(Action::State))]
    #[case("unlock", Some(Action::Unlock))]
    #[case("lock", Some(Action::Lock))]
    #[case("open", None)]
    #[case("UNLOCK", None)]
    #[case(" state", None)]
    #[case("", None)]
    fn test_parse(#[case] raw: &str, #[case] expected: Option<Action>) {
        assert_eq!(Action::parse(raw), expected);
    }
}
