use serde::{Deserialize, Serialize};
use std::fmt;

/// A credential token extracted from one reader frame.
///
/// Tokens are opaque strings: the daemon compares them exactly as received,
/// case- and whitespace-sensitive, against the authorized roster. The
/// framer guarantees a token never contains the frame delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
    /// Wrap a framed credential payload.
    pub fn new(value: impl Into<String>) -> Self {
        Token(value.into())
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this read is reader noise rather than a real credential.
    ///
    /// Readers in a quiescent or glitching state produce frames made up of
    /// only `'0'` and `'F'` characters. If stripping those characters
    /// leaves nothing, the token is noise and is never looked up.
    #[must_use]
    pub fn is_noise(&self) -> bool {
        self.0.chars().all(|c| c == '0' || c == 'F')
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::new(s)
    }
}

/// Digital level of a GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Returns `true` if the line reads High.
    #[inline]
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

/// Door state derived from the two status sensor lines.
///
/// This is a pure function of one sensor snapshot; there is no hidden
/// state and no caching. `Failure` (both lines High) is an alarm
/// condition, not a transient read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    /// Neither sensor asserted. Typically the lock is unpowered.
    Unknown,
    Locked,
    Unlocked,
    /// Both sensors asserted simultaneously. Mechanically impossible for a
    /// healthy lock; callers must treat it as an alarm.
    Failure,
}

impl DoorState {
    /// Map a snapshot of the two sensor lines to a door state.
    ///
    /// Both lines must come from the same sampling pass so the mapping
    /// never represents a state that did not physically exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use latchkey_core::{DoorState, Level};
    ///
    /// assert_eq!(DoorState::from_levels(Level::High, Level::Low), DoorState::Unlocked);
    /// assert_eq!(DoorState::from_levels(Level::Low, Level::High), DoorState::Locked);
    /// ```
    #[must_use]
    pub fn from_levels(status_a: Level, status_b: Level) -> Self {
        match (status_a, status_b) {
            (Level::Low, Level::Low) => DoorState::Unknown,
            (Level::High, Level::High) => DoorState::Failure,
            (Level::High, Level::Low) => DoorState::Unlocked,
            (Level::Low, Level::High) => DoorState::Locked,
        }
    }

    /// Returns `true` if this state must be treated as an alarm.
    #[must_use]
    pub fn is_alarm(self) -> bool {
        matches!(self, DoorState::Failure)
    }
}

impl fmt::Display for DoorState {
    /// Renders the uppercase wire form used by the control surface.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            DoorState::Unknown => "UNKNOWN",
            DoorState::Locked => "LOCKED",
            DoorState::Unlocked => "UNLOCKED",
            DoorState::Failure => "FAILURE",
        };
        write!(f, "{s}")
    }
}

/// A command for the actuation arbiter.
///
/// Carries no payload: the arbiter decides which pin to pulse from the
/// kind alone. Anything that is not one of these kinds is rejected at the
/// boundary where untyped input enters the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuationCommand {
    Open,
    Close,
}

impl fmt::Display for ActuationCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActuationCommand::Open => write!(f, "open"),
            ActuationCommand::Close => write!(f, "close"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0000")]
    #[case("FFFF")]
    #[case("0F0F")]
    #[case("F")]
    #[case("")]
    fn test_token_noise(#[case] input: &str) {
        assert!(Token::new(input).is_noise());
    }

    #[rstest]
    #[case("A1B2")]
    #[case("00F1")]
    #[case("f")] // lowercase 'f' is significant, not noise
    #[case(" 0F")] // whitespace is significant
    fn test_token_not_noise(#[case] input: &str) {
        assert!(!Token::new(input).is_noise());
    }

    #[rstest]
    #[case(Level::Low, Level::Low, DoorState::Unknown)]
    #[case(Level::High, Level::High, DoorState::Failure)]
    #[case(Level::High, Level::Low, DoorState::Unlocked)]
    #[case(Level::Low, Level::High, DoorState::Locked)]
    fn test_door_state_mapping(#[case] a: Level, #[case] b: Level, #[case] expected: DoorState) {
        assert_eq!(DoorState::from_levels(a, b), expected);
    }

    #[test]
    fn test_door_state_wire_form() {
        assert_eq!(DoorState::Unlocked.to_string(), "UNLOCKED");
        assert_eq!(DoorState::Locked.to_string(), "LOCKED");
        assert_eq!(DoorState::Unknown.to_string(), "UNKNOWN");
        assert_eq!(DoorState::Failure.to_string(), "FAILURE");
    }

    #[test]
    fn test_failure_is_alarm() {
        assert!(DoorState::Failure.is_alarm());
        assert!(!DoorState::Unlocked.is_alarm());
    }

    #[test]
    fn test_command_display() {
        assert_eq!(ActuationCommand::Open.to_string(), "open");
        assert_eq!(ActuationCommand::Close.to_string(), "close");
    }
}
