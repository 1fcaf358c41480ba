//! Authorization logic for latchkey.
//!
//! Three pieces, all pure relative to hardware:
//!
//! - [`AccessRoster`]: the authorized-token table, loaded once from a flat
//!   file and immutable for the process lifetime.
//! - [`TokenValidator`]: decides whether a presented token is a noise
//!   read, an unknown credential, or an authorized one (with owner label).
//! - [`DebounceGate`]: suppresses repeated reader-path unlocks inside a
//!   cool-down window.

pub mod debounce;
pub mod roster;
pub mod validator;

pub use debounce::DebounceGate;
pub use roster::AccessRoster;
pub use validator::{TokenValidator, Validation};
