//! Authorized-token roster.
//!
//! The roster is a flat text file, one entry per line:
//!
//! ```text
//! A1B2C3D4  Alice Example
//! 9F027A11  Bob
//!
//! # blank lines and single-field lines are ignored
//! DEADBEEF
//! ```
//!
//! The first whitespace-delimited field is the token; the remainder of the
//! line is the owner label. The roster is built once at startup and
//! treated as immutable afterwards; reloading means restarting the daemon.

use latchkey_core::{Error, Result, Token};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Immutable token → owner-label table.
#[derive(Debug, Clone, Default)]
pub struct AccessRoster {
    entries: HashMap<String, String>,
}

impl AccessRoster {
    /// Parse roster text.
    ///
    /// Blank lines and lines with fewer than two fields are skipped. The
    /// owner label is the rest of the line re-joined single-spaced, so
    /// alignment whitespace in the file does not leak into labels.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let Some(token) = fields.next() else { continue };
            let owner = fields.collect::<Vec<_>>().join(" ");
            if owner.is_empty() {
                continue;
            }
            entries.insert(token.to_string(), owner);
        }
        Self { entries }
    }

    /// Load the roster from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is missing or unreadable.
    /// This is a startup fault: the daemon must not begin accepting input
    /// without an authorization table.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::config(format!("cannot read roster {}: {e}", path.display())))?;
        let roster = Self::parse(&text);
        info!(
            path = %path.display(),
            entries = roster.len(),
            "authorized-token roster loaded"
        );
        Ok(roster)
    }

    /// Look up the owner label for a token, exact match only.
    pub fn owner_of(&self, token: &Token) -> Option<&str> {
        self.entries.get(token.as_str()).map(String::as_str)
    }

    /// Number of authorized tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the roster has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
