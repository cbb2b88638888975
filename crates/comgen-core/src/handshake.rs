//! Channel handshake state machine
//!
//! The generated `connectChannels`, `openConnections` and `closeConnections`
//! functions all share one shape. [`HandshakeMachine`] runs that same shape
//! over [`ChannelOperation`] implementations, so the protocol contract baked
//! into the emitted C can be exercised from Rust.
//!
//! Per channel:
//! ```text
//! NotIssued → Pending → Complete
//!     │          (polled up to retry_limit times)
//!     ├──────→ Complete   (immediate success)
//!     └──────→ Failed     (aborts the whole phase)
//! ```

use crate::{Diagnostic, DiagnosticKind, Direction, GeneratorConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// State of one channel within a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    #[default]
    NotIssued,
    /// Issued; waiting on the stored request
    Pending,
    Complete,
    Failed,
}

impl ChannelState {
    pub fn can_transition_to(&self, target: ChannelState) -> bool {
        use ChannelState::*;
        matches!(
            (self, target),
            (NotIssued, Pending) | (NotIssued, Complete) | (NotIssued, Failed) | (Pending, Complete)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ChannelState::Complete | ChannelState::Failed)
    }
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelState::NotIssued => write!(f, "NotIssued"),
            ChannelState::Pending => write!(f, "Pending"),
            ChannelState::Complete => write!(f, "Complete"),
            ChannelState::Failed => write!(f, "Failed"),
        }
    }
}

/// The three handshake phases, in the order the generated `main` runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakePhase {
    Connect,
    Open,
    Close,
}

impl HandshakePhase {
    pub const ALL: [HandshakePhase; 3] = [
        HandshakePhase::Connect,
        HandshakePhase::Open,
        HandshakePhase::Close,
    ];

    /// Name of the generated C function
    pub fn function_name(&self) -> &'static str {
        match self {
            HandshakePhase::Connect => "connectChannels",
            HandshakePhase::Open => "openConnections",
            HandshakePhase::Close => "closeConnections",
        }
    }

    /// Prefix of the generated request/complete arrays and error messages
    pub fn verb(&self) -> &'static str {
        match self {
            HandshakePhase::Connect => "connect",
            HandshakePhase::Open => "open",
            HandshakePhase::Close => "close",
        }
    }

    /// Whether a channel end with `direction` issues an operation in this
    /// phase. Only the sender connects; both ends open and close.
    pub fn issues_for(&self, direction: Direction) -> bool {
        match self {
            HandshakePhase::Connect => direction.is_sender(),
            HandshakePhase::Open | HandshakePhase::Close => true,
        }
    }
}

impl std::fmt::Display for HandshakePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// Immediate status of a non-blocking issue call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStatus {
    Success,
    Pending,
    Failed,
}

/// One channel end as seen by the handshake
pub trait ChannelOperation {
    fn name(&self) -> &str;

    fn direction(&self) -> Direction;

    /// Issue the non-blocking operation for `phase`
    fn issue(&mut self, phase: HandshakePhase) -> IssueStatus;

    /// Wait up to `timeout` on the stored request; `true` once it succeeded
    fn poll(&mut self, phase: HandshakePhase, timeout: u32) -> bool;
}

/// Result of running one phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeOutcome {
    pub phase: HandshakePhase,
    /// Final state per channel, in channel order
    pub states: Vec<ChannelState>,
    /// Retry rounds used by the completion loop
    pub attempts: u32,
    pub diagnostics: Vec<Diagnostic>,
}

impl HandshakeOutcome {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty() && self.states.iter().all(|s| *s == ChannelState::Complete)
    }
}

/// Issue, bounded retry, finalize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeMachine {
    pub phase: HandshakePhase,
    pub retry_limit: u32,
    pub timeout: u32,
}

impl HandshakeMachine {
    pub fn new(phase: HandshakePhase, retry_limit: u32, timeout: u32) -> Self {
        Self {
            phase,
            retry_limit,
            timeout,
        }
    }

    pub fn from_config(phase: HandshakePhase, config: &GeneratorConfig) -> Self {
        Self::new(phase, config.retry_limit, config.timeout)
    }

    pub fn run<C: ChannelOperation>(&self, channels: &mut [C]) -> HandshakeOutcome {
        let mut outcome = HandshakeOutcome {
            phase: self.phase,
            states: vec![ChannelState::NotIssued; channels.len()],
            attempts: 0,
            diagnostics: Vec::new(),
        };

        for (index, channel) in channels.iter_mut().enumerate() {
            if !self.phase.issues_for(channel.direction()) {
                outcome.states[index] = ChannelState::Complete;
                continue;
            }
            let status = channel.issue(self.phase);
            outcome.states[index] = match status {
                IssueStatus::Success => ChannelState::Complete,
                IssueStatus::Pending => ChannelState::Pending,
                IssueStatus::Failed => ChannelState::Failed,
            };
            if status == IssueStatus::Failed {
                warn!(phase = %self.phase, channel = channel.name(), "Issue failed");
                outcome.diagnostics.push(Diagnostic::error(
                    DiagnosticKind::Handshake,
                    format!("failed to {} channel '{}'", self.phase, channel.name()),
                ));
                return outcome;
            }
        }

        while outcome.attempts < self.retry_limit
            && outcome.states.contains(&ChannelState::Pending)
        {
            outcome.attempts += 1;
            for (index, channel) in channels.iter_mut().enumerate() {
                if outcome.states[index] == ChannelState::Pending
                    && channel.poll(self.phase, self.timeout)
                {
                    debug!(
                        phase = %self.phase,
                        channel = channel.name(),
                        attempt = outcome.attempts,
                        "Channel complete"
                    );
                    outcome.states[index] = ChannelState::Complete;
                }
            }
        }

        for (index, channel) in channels.iter().enumerate() {
            if outcome.states[index] != ChannelState::Complete {
                outcome.diagnostics.push(Diagnostic::error(
                    DiagnosticKind::Handshake,
                    format!(
                        "failed to {} channel '{}' within {} attempts",
                        self.phase,
                        channel.name(),
                        self.retry_limit
                    ),
                ));
            }
        }

        outcome
    }
}

#[cfg(test)]
#[path = "handshake/handshake_tests.rs"]
mod handshake_tests;

#[cfg(test)]
#[path = "handshake/handshake_parameterized_tests.rs"]
mod handshake_parameterized_tests;
