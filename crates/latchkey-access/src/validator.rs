//! Token validation against the authorized roster.

use crate::roster::AccessRoster;
use latchkey_core::Token;

/// Outcome of validating one presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Token is in the roster; carries the owner label.
    Authorized { owner: String },

    /// Well-formed token with no roster match. No lock action is taken.
    Unauthorized,

    /// Noise read: only `'0'`/`'F'` characters. Logged at most, never
    /// looked up, no side effect on debounce or actuation.
    Malformed,
}

/// Validates presented tokens.
///
/// Matching is exact: no partial or fuzzy matching, case and whitespace
/// significant as received from the framer.
///
/// # Examples
///
/// ```
/// use latchkey_access::{AccessRoster, TokenValidator, Validation};
/// use latchkey_core::Token;
///
/// let roster = AccessRoster::parse("A1B2 Alice\n");
/// let validator = TokenValidator::new(roster);
///
/// assert_eq!(
///     validator.validate(&Token::new("A1B2")),
///     Validation::Authorized { owner: "Alice".into() }
/// );
/// assert_eq!(validator.validate(&Token::new("0000")), Validation::Malformed);
/// assert_eq!(validator.validate(&Token::new("C3D4")), Validation::Unauthorized);
/// ```
#[derive(Debug, Clone)]
pub struct TokenValidator {
    roster: AccessRoster,
}

impl TokenValidator {
    /// Create a validator over a loaded roster.
    pub fn new(roster: AccessRoster) -> Self {
        Self { roster }
    }

    /// Classify one presented token.
    ///
    /// Noise reads are classified Malformed before any lookup, so a roster
    /// that (mis)contains a noise-shaped token can never authorize one.
    pub fn validate(&self, token: &Token) -> Validation {
        if token.is_noise() {
            return Validation::Malformed;
        }
        match self.roster.owner_of(token) {
            Some(owner) => Validation::Authorized {
                owner: owner.to_string(),
            },
            None => Validation::Unauthorized,
        }
    }

    /// The roster backing this validator.
    pub fn roster(&self) -> &AccessRoster {
        &self.roster
    }
}
