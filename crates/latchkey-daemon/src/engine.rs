//! Reader-path engine: token in, pulse (maybe) out.
//!
//! The pipeline per presented token is fixed:
//!
//! 1. validate against the roster (noise reads never reach the lookup),
//! 2. if authorized, ask the debounce gate for admission,
//! 3. if admitted, submit an Open command to the arbiter, fire-and-forget.
//!
//! Only step 3 touches hardware. Rejected tokens of every kind are logged
//! and otherwise without effect; in particular a suppressed duplicate
//! does not refresh the debounce timestamp.

use anyhow::Context;
use latchkey_access::{DebounceGate, TokenValidator, Validation};
use latchkey_core::{ActuationCommand, Token};
use latchkey_hardware::ArbiterHandle;
use latchkey_reader::{ByteSource, TokenStream};
use tracing::{info, warn};

/// What the engine did with one presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    /// Authorized and admitted; an Open pulse was queued.
    Unlocked { owner: String },

    /// Authorized, but suppressed by the debounce window.
    Debounced { owner: String },

    /// Well-formed token with no roster match.
    Unauthorized,

    /// Noise read; never looked up.
    Ignored,
}

/// The decision pipeline between the token stream and the arbiter.
pub struct AccessEngine {
    validator: TokenValidator,
    debounce: DebounceGate,
    arbiter: ArbiterHandle,
}

impl AccessEngine {
    /// Assemble the engine from its three stages.
    pub fn new(validator: TokenValidator, debounce: DebounceGate, arbiter: ArbiterHandle) -> Self {
        Self {
            validator,
            debounce,
            arbiter,
        }
    }

    /// Run one token through the pipeline.
    ///
    /// # Errors
    ///
    /// Fails only if the actuation executor is gone, which is fatal for
    /// the whole daemon.
    pub fn handle_token(&self, token: &Token) -> anyhow::Result<TokenOutcome> {
        match self.validator.validate(token) {
            Validation::Malformed => {
                warn!(token = token.as_str(), "noise read ignored");
                Ok(TokenOutcome::Ignored)
            },
            Validation::Unauthorized => {
                warn!(token = token.as_str(), "unauthorized token");
                Ok(TokenOutcome::Unauthorized)
            },
            Validation::Authorized { owner } => {
                if !self.debounce.admit() {
                    info!(owner, "unlock suppressed by debounce window");
                    return Ok(TokenOutcome::Debounced { owner });
                }
                self.arbiter
                    .submit(ActuationCommand::Open)
                    .context("submitting unlock pulse")?;
                info!(owner, "access granted, unlock pulse queued");
                Ok(TokenOutcome::Unlocked { owner })
            },
        }
    }

    /// Consume the token stream until it faults.
    ///
    /// Never returns `Ok`: the stream is infinite while healthy, and the
    /// first stream fault (or a dead actuation executor) propagates out so
    /// the process can exit and be restarted by its supervisor.
    pub async fn run<S: ByteSource>(&self, stream: &mut TokenStream<S>) -> anyhow::Result<()> {
        loop {
            let token = stream
                .next_token()
                .await
                .context("credential reader stream")?;
            self.handle_token(&token)?;
        }
    }
}
